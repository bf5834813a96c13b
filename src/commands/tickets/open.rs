
use nonempty::nonempty;

use crate::commands::command::*;
use crate::utility::*;
use crate::utility::ticket_handler::CREATE_TICKET_ID;


/// Behind the panel's button.
pub struct OpenTicketCommand;

impl Command for OpenTicketCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Tickets,
            nonempty![CREATE_TICKET_ID.to_string()]
        )
            .description("Open a support ticket")
            .component_only()
    }

    fn run<'a>(&'a self, params: CommandParams<'a>) -> BoxedFuture<'a, Result<OutgoingMessage, CommandError>> {
        Box::pin(
            async move {
                let ticket = params.state.tickets.create(params.guild_id, params.author).await?;
                let channel = mention_channel(ticket.channel);
                Ok(OutgoingMessage::text(params.lang.render(Text::TicketCreated, &[("channel", channel.as_str())]))
                    .ephemeral())
            }
        )
    }

}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::command_manager::{CommandManager, DispatchOutcome};
    use crate::commands::tickets::close::CloseTicketCommand;
    use crate::state::testing::*;
    use crate::utility::ticket_handler::CLOSE_TICKET_ID;
    use serenity::model::id::{ChannelId, UserId};
    use std::time::Duration;

    const OWNER: UserId = UserId::new(200);

    fn button<'a>(state: &'a crate::state::BotState, channel: ChannelId) -> CommandParams<'a> {
        let mut params = CommandParams::new(state, GUILD, channel, OWNER, Language::En);
        params.from_component = true;
        params
    }

    #[tokio::test]
    async fn ticket_flow_through_buttons() {
        let t = test_state().await;
        let panel = t.gateway.add_channel(GUILD, "support", ChannelKind::Text, None);
        t.state.tickets.setup(GUILD, panel, None).await.unwrap();
        let manager = CommandManager::with_commands(vec![Box::new(OpenTicketCommand), Box::new(CloseTicketCommand)]);

        let reply = manager.dispatch(CREATE_TICKET_ID, button(&t.state, panel)).await.reply().unwrap();
        let first = t.gateway.channel_named("ticket-1").unwrap();
        assert_eq!(reply.content, Some(format!("Your ticket has been created: <#{}>", first.id)));

        // a member without channel permissions may close through the button
        let closing = manager.dispatch(CLOSE_TICKET_ID, button(&t.state, first.id)).await;
        assert!(matches!(closing, DispatchOutcome::Completed(_)));
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(t.gateway.channel_named("ticket-1").is_none());
    }

    #[tokio::test]
    async fn duplicate_ticket_names_the_existing_channel() {
        let t = test_state().await;
        let panel = t.gateway.add_channel(GUILD, "support", ChannelKind::Text, None);
        t.state.tickets.setup(GUILD, panel, None).await.unwrap();
        let manager = CommandManager::with_commands(vec![Box::new(OpenTicketCommand)]);

        manager.dispatch(CREATE_TICKET_ID, button(&t.state, panel)).await;
        let first = t.gateway.channel_named("ticket-1").unwrap();
        let second = OpenTicketCommand.run(button(&t.state, panel)).await;

        let error = second.unwrap_err();
        assert_eq!(error.user_message(Language::En), Some(format!("You already have an open ticket: <#{}>", first.id)));
    }

    #[tokio::test]
    async fn unconfigured_guild_is_told_so() {
        let t = test_state().await;

        let result = OpenTicketCommand.run(button(&t.state, CHANNEL)).await;

        let error = result.unwrap_err();
        assert_eq!(error.user_message(Language::Es).as_deref(),
            Some("❌ El sistema de tickets no está configurado en este servidor."));
    }
}
