
use serenity::model::permissions::Permissions;
use nonempty::nonempty;

use crate::commands::command::*;
use crate::commands::moderation::reason_of;
use crate::utility::*;


pub struct KickCommand;

impl Command for KickCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Moderation,
            nonempty!["kick".to_string(), "remove".to_string(), "k".to_string()]
        )
            .description("Kick a user from the server")
            .add_required("user", ParameterKind::User, "The user to kick")
            .add_optional("reason", ParameterKind::Text, "Reason for the kick")
            .permission(Permissions::KICK_MEMBERS)
            .cooldown(10)
    }

    fn run<'a>(&'a self, params: CommandParams<'a>) -> BoxedFuture<'a, Result<OutgoingMessage, CommandError>> {
        Box::pin(
            async move {

                let target = params.args.require_user("user")?;
                let reason = reason_of(&params.args);

                params.state.ledger.kick(ModRequest {
                    guild: params.guild_id,
                    guild_name: &params.guild_name,
                    target,
                    moderator: params.author,
                    moderator_tag: &params.author_tag,
                    reason,
                }).await?;

                Ok(LogBuilder::new("✅ User Kicked")
                    .description(&format!("{} has been kicked from the server", mention_user(target)))
                    .color(0xff8200)
                    .inline("Reason", reason)
                    .inline("Moderator", &params.author_tag)
                    .timestamp()
                    .to_message())
            }
        )
    }

}
