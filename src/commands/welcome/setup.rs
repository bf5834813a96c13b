
use serenity::model::permissions::Permissions;
use nonempty::nonempty;

use crate::commands::command::*;
use crate::databases::WelcomeConfig;
use crate::utility::*;


pub struct WelcomeSetupCommand;

impl Command for WelcomeSetupCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Welcome,
            nonempty!["welcome-setup".to_string()]
        )
            .description("Configurar mensajes de bienvenida en el servidor")
            .add_required("channel", ParameterKind::Channel, "El canal para enviar mensajes de bienvenida")
            .permission(Permissions::MANAGE_GUILD)
            .example("#bienvenidas")
    }

    fn run<'a>(&'a self, params: CommandParams<'a>) -> BoxedFuture<'a, Result<OutgoingMessage, CommandError>> {
        Box::pin(
            async move {

                let channel = params.args.require_channel("channel")?;
                let guild = params.guild_id.to_string();
                params.state.store.mutate(|data| {
                    data.welcome_configs.insert(guild, WelcomeConfig::new(channel));
                }).await?;

                Ok(LogBuilder::new("Sistema de Bienvenida Configurado")
                    .description(&format!("Los mensajes de bienvenida se enviarán a {}", mention_channel(channel)))
                    .color(0x00ff00)
                    .arbitrary("Personalización", "Usa `/welcome-message` para personalizar el mensaje")
                    .arbitrary("Configuración de Embed", "Usa `/welcome-embed` para configurar el aspecto del embed")
                    .arbitrary("Roles", "Usa `/welcome-roles` para asignar roles a nuevos miembros")
                    .timestamp()
                    .to_message())
            }
        )
    }

}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::*;
    use serenity::model::id::{ChannelId, UserId};

    #[tokio::test]
    async fn setup_stores_the_defaults() {
        let t = test_state().await;
        let args = CommandArgs::new().with("channel", ArgValue::Channel(ChannelId::new(55)));

        let reply = WelcomeSetupCommand.run(invocation(&t.state, UserId::new(1), args)).await.unwrap();

        assert!(reply.rendered().contains("<#55>"));
        let stored = t.state.store.snapshot().await.welcome_configs.get(&GUILD.to_string()).cloned().unwrap();
        assert_eq!(stored, WelcomeConfig::new(ChannelId::new(55)));
    }
}
