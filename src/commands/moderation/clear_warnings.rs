
use serenity::model::permissions::Permissions;
use nonempty::nonempty;

use crate::commands::command::*;
use crate::utility::*;


pub struct ClearWarningsCommand;

impl Command for ClearWarningsCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Moderation,
            nonempty!["clearwarnings".to_string()]
        )
            .description("Clear all warnings from a user")
            .add_required("user", ParameterKind::User, "User to clear warnings from")
            .permission(Permissions::MODERATE_MEMBERS)
    }

    fn run<'a>(&'a self, params: CommandParams<'a>) -> BoxedFuture<'a, Result<OutgoingMessage, CommandError>> {
        Box::pin(
            async move {

                let target = params.args.require_user("user")?;

                match params.state.ledger.clear_warnings(params.guild_id, target).await? {
                    ClearOutcome::Nothing => Ok(OutgoingMessage::text(
                        format!("ℹ {} has no warnings to clear", mention_user(target))).ephemeral()),
                    ClearOutcome::Cleared(count) => Ok(LogBuilder::new("✅ Warnings Cleared")
                        .description(&format!("Removed {} warning(s) from {}", count, mention_user(target)))
                        .color(0x00ff00)
                        .timestamp()
                        .to_message()),
                }
            }
        )
    }

}
