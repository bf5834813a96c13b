
use serenity::model::permissions::Permissions;
use nonempty::nonempty;

use crate::commands::command::*;
use crate::utility::*;


pub struct PrefixCommand;

impl Command for PrefixCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Utility,
            nonempty!["prefix".to_string()]
        )
            .description("Change the bot prefix")
            .add_required("new_prefix", ParameterKind::Text, "New prefix (1-2 characters)")
            .permission(Permissions::MANAGE_GUILD)
            .example("!")
    }

    fn run<'a>(&'a self, params: CommandParams<'a>) -> BoxedFuture<'a, Result<OutgoingMessage, CommandError>> {
        Box::pin(
            async move {

                let prefix = params.args.require_text("new_prefix")?.trim().to_string();
                if prefix.chars().count() > 2 {
                    return Err(CommandError::Validation("❌ The prefix may be at most 2 characters long.".to_string()));
                }

                let guild = params.guild_id.to_string();
                let stored = prefix.clone();
                params.state.store.mutate(|data| {
                    data.prefixes.insert(guild, stored);
                }).await?;

                Ok(OutgoingMessage::text(format!("✅ Prefix changed to `{}`", prefix)))
            }
        )
    }

}
