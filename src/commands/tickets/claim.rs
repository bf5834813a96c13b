
use serenity::model::permissions::Permissions;
use nonempty::nonempty;

use crate::commands::command::*;
use crate::utility::*;
use crate::utility::ticket_handler::CLAIM_TICKET_ID;


pub struct ClaimTicketCommand;

impl Command for ClaimTicketCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Tickets,
            nonempty!["claim-ticket".to_string(), CLAIM_TICKET_ID.to_string()]
        )
            .description("Claim the ticket in this channel")
            .permission(Permissions::MANAGE_MESSAGES)
    }

    fn run<'a>(&'a self, params: CommandParams<'a>) -> BoxedFuture<'a, Result<OutgoingMessage, CommandError>> {
        Box::pin(
            async move {
                let ticket = params.state.tickets
                    .claim(params.guild_id, params.channel_id, params.author).await?;
                let number = ticket.number.to_string();
                Ok(OutgoingMessage::text(params.lang.render(Text::TicketClaimed, &[("number", number.as_str())]))
                    .ephemeral())
            }
        )
    }

}
