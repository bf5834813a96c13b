
use serenity::model::permissions::Permissions;
use nonempty::nonempty;

use crate::commands::command::*;
use crate::commands::moderation::reason_of;
use crate::utility::*;


pub struct BanCommand;

impl Command for BanCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Moderation,
            nonempty!["ban".to_string(), "banish".to_string(), "b".to_string()]
        )
            .description("Ban a user from the server")
            .add_required("user", ParameterKind::User, "The user to ban")
            .add_optional("reason", ParameterKind::Text, "Reason for the ban")
            .add_optional("days", ParameterKind::Integer { min: 0, max: 7 }, "Days of messages to delete (0-7)")
            .permission(Permissions::BAN_MEMBERS)
            .cooldown(10)
            .example("@JuicyJuggler raiding 1")
    }

    fn run<'a>(&'a self, params: CommandParams<'a>) -> BoxedFuture<'a, Result<OutgoingMessage, CommandError>> {
        Box::pin(
            async move {

                let target = params.args.require_user("user")?;
                let reason = reason_of(&params.args);
                let days = params.args.integer("days").unwrap_or(0);
                let days = u8::try_from(days).ok()
                    .filter(|days| *days <= 7)
                    .ok_or_else(|| CommandError::InvalidUsage("days must be between 0 and 7".to_string()))?;

                params.state.ledger.ban(ModRequest {
                    guild: params.guild_id,
                    guild_name: &params.guild_name,
                    target,
                    moderator: params.author,
                    moderator_tag: &params.author_tag,
                    reason,
                }, days).await?;

                Ok(LogBuilder::new("✅ User Banned")
                    .description(&format!("{} has been banned from the server", mention_user(target)))
                    .color(0xff0000)
                    .inline("Reason", reason)
                    .inline("Moderator", &params.author_tag)
                    .inline("Messages Deleted", &format!("{} days", days))
                    .timestamp()
                    .to_message())
            }
        )
    }

}
