
use serenity::model::permissions::Permissions;
use nonempty::nonempty;

use crate::commands::command::*;
use crate::utility::*;


// embeds hold at most 25 fields
const MAX_LISTED: usize = 25;

pub struct WarningsCommand;

impl Command for WarningsCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Moderation,
            nonempty!["warnings".to_string()]
        )
            .description("Check a user's warnings")
            .add_required("user", ParameterKind::User, "User to check")
            .permission(Permissions::MODERATE_MEMBERS)
            .example("@BadBoy")
    }

    fn run<'a>(&'a self, params: CommandParams<'a>) -> BoxedFuture<'a, Result<OutgoingMessage, CommandError>> {
        Box::pin(
            async move {

                let target = params.args.require_user("user")?;
                let warnings = params.state.ledger.list_warnings(params.guild_id, target).await;

                if warnings.is_empty() {
                    return Ok(OutgoingMessage::text(format!("ℹ {} has no warnings", mention_user(target))).ephemeral());
                }

                let total = warnings.len();
                let mut builder = LogBuilder::new("⚠ Warnings")
                    .description(&format!("{}\nTotal: {} warning(s)", mention_user(target), total))
                    .color(0xffff00);
                for (index, warning) in warnings.iter().enumerate().take(MAX_LISTED) {
                    builder = builder.arbitrary(
                        &format!("Warning #{}", index + 1),
                        &format!("**Reason:** {}\n**By:** <@{}>\n**Date:** <t:{}:f>",
                            warning.reason, warning.moderator_id, warning.date.timestamp()));
                }
                if total > MAX_LISTED {
                    builder = builder.footer(&format!("Displaying {} of {} Warnings", MAX_LISTED, total));
                }

                Ok(builder.to_message().ephemeral())
            }
        )
    }

}
