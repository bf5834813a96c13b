
use nonempty::nonempty;
use strum::IntoEnumIterator;

use crate::commands::command::*;
use crate::utility::*;


pub struct HelpCommand;

impl HelpCommand {

    fn category_page(category: CommandType, usages: &[UsageBuilder]) -> OutgoingMessage {
        let mut builder = LogBuilder::new(&format!("Commands: {}", category))
            .color(0x0099ff);
        let mut shown = 0;
        for usage in usages.iter().filter(|usage| usage.command_type == category) {
            let description = match usage.get_description() {
                "" => "-",
                description => description,
            };
            builder = builder.arbitrary(
                &format!("/{}", usage.name()),
                &format!("{}\n```{}```", description, usage.build("/")));
            shown += 1;
        }
        builder.footer(&format!("Total: {} commands", shown)).to_message().ephemeral()
    }

    fn overview(usages: &[UsageBuilder], prefix: &str) -> OutgoingMessage {
        let mut builder = LogBuilder::new("📚 Available commands")
            .description("Use `/help [category]` for details")
            .color(0x0099ff);
        for category in CommandType::iter() {
            let names: Vec<String> = usages.iter()
                .filter(|usage| usage.command_type == category)
                .map(|usage| format!("`/{}`", usage.name()))
                .collect();
            let mut listed = names.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
            if names.len() > 3 {
                listed.push_str(&format!("... +{} more", names.len() - 3));
            }
            if listed.is_empty() {
                listed = "-".to_string();
            }
            builder = builder.inline(&format!("{} ({})", category, names.len()), &listed);
        }
        builder
            .footer(&format!("Total: {} commands | Prefix: {}", usages.len(), prefix))
            .to_message()
            .ephemeral()
    }

}

impl Command for HelpCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Utility,
            nonempty!["help".to_string()]
        )
            .description("Show every available command")
            .add_optional("category", ParameterKind::Choice(vec![
                ("Moderación", "moderation"),
                ("Tickets", "tickets"),
                ("Bienvenidas", "welcome"),
                ("Utilidades", "utility"),
            ]), "Only show one category")
            .example("tickets")
    }

    fn run<'a>(&'a self, params: CommandParams<'a>) -> BoxedFuture<'a, Result<OutgoingMessage, CommandError>> {
        Box::pin(
            async move {

                // component-only commands have no slash form to document
                let usages: Vec<UsageBuilder> = params.commands.iter()
                    .map(|command| command.define_usage())
                    .filter(|usage| !usage.is_component_only())
                    .collect();

                match params.args.text("category") {
                    Some(raw) => {
                        let category = raw.trim().to_lowercase().parse::<CommandType>()
                            .map_err(|_| CommandError::InvalidUsage(format!("unknown category '{}'", raw)))?;
                        Ok(HelpCommand::category_page(category, &usages))
                    },
                    None => {
                        let prefix = params.state.prefix_of(params.guild_id).await;
                        Ok(HelpCommand::overview(&usages, &prefix))
                    }
                }
            }
        )
    }

}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::command_manager::CommandManager;
    use crate::state::testing::*;
    use serenity::model::id::UserId;

    #[tokio::test]
    async fn overview_counts_every_category() {
        let t = test_state().await;
        let manager = CommandManager::new();
        let mut params = invocation(&t.state, UserId::new(1), CommandArgs::new());
        params.commands = manager.commands();

        let reply = HelpCommand.run(params).await.unwrap();

        let embed = reply.embed.unwrap();
        assert_eq!(embed.fields.len(), 4);
        assert!(embed.field("moderation (5)").unwrap().contains("`/ban`"));
        assert!(embed.footer.unwrap().ends_with("Prefix: /"));
    }

    #[tokio::test]
    async fn category_page_shows_usage() {
        let t = test_state().await;
        let manager = CommandManager::new();
        let args = CommandArgs::new().with("category", ArgValue::Text("Moderation".to_string()));
        let mut params = invocation(&t.state, UserId::new(1), args);
        params.commands = manager.commands();

        let reply = HelpCommand.run(params).await.unwrap();

        let embed = reply.embed.unwrap();
        assert!(embed.field("/ban").unwrap().contains("/ban <user> [reason] [days]"));
        assert_eq!(embed.footer.as_deref(), Some("Total: 5 commands"));
    }

    #[tokio::test]
    async fn unknown_category_is_invalid_usage() {
        let t = test_state().await;
        let args = CommandArgs::new().with("category", ArgValue::Text("fun".to_string()));

        let result = HelpCommand.run(invocation(&t.state, UserId::new(1), args)).await;

        assert!(matches!(result, Err(CommandError::InvalidUsage(_))));
    }
}
