
use serenity::model::permissions::Permissions;
use nonempty::nonempty;

use crate::commands::command::*;
use crate::utility::*;


pub struct WarnCommand;

impl Command for WarnCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Moderation,
            nonempty!["warn".to_string(), "warning".to_string(), "w".to_string()]
        )
            .description("Warn a user")
            .add_required("user", ParameterKind::User, "The user to warn")
            .add_required("reason", ParameterKind::Text, "Reason for the warning")
            .permission(Permissions::MODERATE_MEMBERS)
            .cooldown(5)
            .example("@BadBoy spamming in general")
    }

    fn run<'a>(&'a self, params: CommandParams<'a>) -> BoxedFuture<'a, Result<OutgoingMessage, CommandError>> {
        Box::pin(
            async move {

                let target = params.args.require_user("user")?;
                let reason = params.args.require_text("reason")?;

                let state = params.state;
                if state.gateway.fetch_member(params.guild_id, target).await?.is_none() {
                    return Err(ModerationError::TargetNotInGuild.into());
                }

                let count = state.ledger.warn(params.guild_id, target, params.author, reason).await?;

                let notice = format!("You've received a warning in **{}**\nReason: {}\nTotal warnings: {}",
                    params.guild_name, reason, count);
                state.ledger.notify(target, notice).await;

                Ok(LogBuilder::new("⚠ Warning Issued")
                    .description(&format!("{} has been warned", mention_user(target)))
                    .color(0xffff00)
                    .inline("Reason", reason)
                    .inline("Moderator", &params.author_tag)
                    .inline("Total Warnings", &count.to_string())
                    .timestamp()
                    .to_message())
            }
        )
    }

}
