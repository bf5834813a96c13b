
use serenity::model::permissions::Permissions;
use nonempty::nonempty;

use crate::commands::command::*;
use crate::utility::*;


pub struct TicketSetupCommand;

impl Command for TicketSetupCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Tickets,
            nonempty!["ticket-setup".to_string(), "setup-tickets".to_string()]
        )
            .description("Set up the ticket system")
            .add_required("channel", ParameterKind::Channel, "Channel for the ticket panel")
            .add_optional("category", ParameterKind::Channel, "Category for new tickets")
            .permission(Permissions::ADMINISTRATOR)
            .example("#support")
    }

    fn run<'a>(&'a self, params: CommandParams<'a>) -> BoxedFuture<'a, Result<OutgoingMessage, CommandError>> {
        Box::pin(
            async move {
                let panel = params.args.require_channel("channel")?;
                let category = params.args.channel("category");

                params.state.tickets.setup(params.guild_id, panel, category).await?;

                let channel = mention_channel(panel);
                Ok(OutgoingMessage::text(params.lang.render(Text::TicketsConfigured, &[("channel", channel.as_str())]))
                    .ephemeral())
            }
        )
    }

}
