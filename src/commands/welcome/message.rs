
use serenity::model::permissions::Permissions;
use nonempty::nonempty;

use crate::commands::command::*;
use crate::commands::welcome::update_config;
use crate::utility::*;
use crate::utility::welcome::{Greeting, render_template};


pub struct WelcomeMessageCommand;

impl Command for WelcomeMessageCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Welcome,
            nonempty!["welcome-message".to_string()]
        )
            .description("Establecer el mensaje de bienvenida personalizado")
            .add_required("message", ParameterKind::Text,
                "El mensaje de bienvenida (usa {user}, {username}, {server}, {membercount} como placeholders)")
            .permission(Permissions::MANAGE_GUILD)
            .example("¡Hola {user}, eres el miembro {membercount}!")
    }

    fn run<'a>(&'a self, params: CommandParams<'a>) -> BoxedFuture<'a, Result<OutgoingMessage, CommandError>> {
        Box::pin(
            async move {

                let message = params.args.require_text("message")?.to_string();
                let stored = message.clone();
                update_config(&params, |config| config.message = stored).await?;

                let preview = render_template(&message, &Greeting {
                    user: params.author,
                    username: &params.author_tag,
                    server: &params.guild_name,
                    member_count: params.member_count,
                    avatar_url: params.author_avatar.as_deref(),
                });

                Ok(LogBuilder::new("Mensaje de Bienvenida Actualizado")
                    .description("¡El mensaje de bienvenida ha sido actualizado correctamente!")
                    .color(0x00ff00)
                    .arbitrary("Vista previa", &preview)
                    .timestamp()
                    .to_message())
            }
        )
    }

}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::databases::WelcomeConfig;
    use crate::commands::welcome::SETUP_FIRST;
    use crate::state::testing::*;
    use serenity::model::id::{ChannelId, UserId};

    fn args() -> CommandArgs {
        CommandArgs::new().with("message", ArgValue::Text("Hola {user} en {server} ({membercount})".to_string()))
    }

    #[tokio::test]
    async fn message_needs_setup_first() {
        let t = test_state().await;

        let result = WelcomeMessageCommand.run(invocation(&t.state, UserId::new(3), args())).await;

        match result {
            Err(CommandError::Validation(message)) => assert_eq!(message, SETUP_FIRST),
            _ => panic!("expected a validation error"),
        }
    }

    #[tokio::test]
    async fn message_is_stored_and_previewed() {
        let t = test_state().await;
        t.state.store.mutate(|data| {
            data.welcome_configs.insert(GUILD.to_string(), WelcomeConfig::new(ChannelId::new(55)));
        }).await.unwrap();

        let reply = WelcomeMessageCommand.run(invocation(&t.state, UserId::new(3), args())).await.unwrap();

        assert_eq!(reply.embed.unwrap().field("Vista previa"), Some("Hola <@3> en Test Guild (10)"));
        let stored = t.state.store.snapshot().await.welcome_configs[&GUILD.to_string()].message.clone();
        assert_eq!(stored, "Hola {user} en {server} ({membercount})");
    }
}
