
use serenity::model::permissions::Permissions;
use nonempty::nonempty;

use crate::commands::command::*;
use crate::utility::*;
use crate::utility::ticket_handler::CLOSE_TICKET_ID;


pub struct CloseTicketCommand;

impl Command for CloseTicketCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Tickets,
            nonempty!["close-ticket".to_string(), CLOSE_TICKET_ID.to_string()]
        )
            .description("Close the ticket in this channel")
            .permission(Permissions::MANAGE_CHANNELS)
    }

    fn run<'a>(&'a self, params: CommandParams<'a>) -> BoxedFuture<'a, Result<OutgoingMessage, CommandError>> {
        Box::pin(
            async move {
                let tickets = &params.state.tickets;
                tickets.close(params.guild_id, params.channel_id, params.author).await?;
                let seconds = whole_seconds(tickets.close_delay()).to_string();
                Ok(OutgoingMessage::text(params.lang.render(Text::TicketClosing, &[("seconds", seconds.as_str())]))
                    .ephemeral())
            }
        )
    }

}
