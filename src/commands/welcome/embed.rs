
use serenity::model::permissions::Permissions;
use nonempty::nonempty;

use crate::commands::command::*;
use crate::commands::welcome::update_config;
use crate::utility::*;
use crate::utility::welcome::parse_color;


pub struct WelcomeEmbedCommand;

impl Command for WelcomeEmbedCommand {

    fn define_usage(&self) -> UsageBuilder {
        UsageBuilder::new(
            CommandType::Welcome,
            nonempty!["welcome-embed".to_string()]
        )
            .description("Configurar el aspecto del embed de bienvenida")
            .add_optional("color", ParameterKind::Text, "Color del embed (código hex)")
            .add_optional("title", ParameterKind::Text, "Título del embed")
            .add_optional("image", ParameterKind::Text, "URL de una imagen para incluir en el embed")
            .add_optional("enabled", ParameterKind::Boolean, "¿Usar embeds para los mensajes de bienvenida?")
            .add_optional("ping", ParameterKind::Boolean, "¿Mencionar al nuevo miembro?")
            .permission(Permissions::MANAGE_GUILD)
            .example("#ff8800 Hola")
    }

    fn run<'a>(&'a self, params: CommandParams<'a>) -> BoxedFuture<'a, Result<OutgoingMessage, CommandError>> {
        Box::pin(
            async move {

                let color = params.args.text("color").map(str::trim).filter(|color| !color.is_empty());
                let parsed = match color {
                    Some(raw) => Some(parse_color(raw)
                        .ok_or_else(|| CommandError::Validation(format!("❌ `{}` no es un color válido, usa el formato #rrggbb.", raw)))?),
                    None => None,
                };
                let title = params.args.text("title").filter(|title| !title.trim().is_empty());
                let image = params.args.text("image").filter(|image| !image.trim().is_empty());
                let enabled = params.args.boolean("enabled");
                let ping = params.args.boolean("ping");

                update_config(&params, |config| {
                    if let Some(color) = color {
                        config.embed_color = Some(color.to_string());
                    }
                    if let Some(title) = title {
                        config.embed_title = Some(title.to_string());
                    }
                    if let Some(image) = image {
                        config.embed_image = Some(image.to_string());
                    }
                    if let Some(enabled) = enabled {
                        config.embed_enabled = enabled;
                    }
                    if let Some(ping) = ping {
                        config.ping_user = ping;
                    }
                }).await?;

                let mut builder = LogBuilder::new(title.unwrap_or("Embed de Bienvenida Actualizado"))
                    .description("¡La configuración del embed de bienvenida ha sido actualizada correctamente!")
                    .color(parsed.unwrap_or(0x00ff00))
                    .timestamp();
                if let Some(image) = image {
                    builder = builder.image(image);
                }
                Ok(builder.to_message())
            }
        )
    }

}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::databases::WelcomeConfig;
    use crate::state::testing::*;
    use serenity::model::id::{ChannelId, UserId};

    async fn configured() -> TestState {
        let t = test_state().await;
        t.state.store.mutate(|data| {
            data.welcome_configs.insert(GUILD.to_string(), WelcomeConfig::new(ChannelId::new(55)));
        }).await.unwrap();
        t
    }

    #[tokio::test]
    async fn only_given_fields_change() {
        let t = configured().await;
        let args = CommandArgs::new()
            .with("color", ArgValue::Text("#FF8800".to_string()))
            .with("ping", ArgValue::Boolean(false));

        let reply = WelcomeEmbedCommand.run(invocation(&t.state, UserId::new(1), args)).await.unwrap();

        assert_eq!(reply.embed.unwrap().color, Some(0xff8800));
        let config = t.state.store.snapshot().await.welcome_configs[&GUILD.to_string()].clone();
        assert_eq!(config.embed_color.as_deref(), Some("#FF8800"));
        assert!(!config.ping_user);
        assert!(config.embed_enabled);
        assert_eq!(config.embed_title.as_deref(), Some("¡Bienvenido!"));
    }

    #[tokio::test]
    async fn invalid_colors_are_rejected_untouched() {
        let t = configured().await;
        let args = CommandArgs::new()
            .with("color", ArgValue::Text("orange".to_string()))
            .with("enabled", ArgValue::Boolean(false));

        let result = WelcomeEmbedCommand.run(invocation(&t.state, UserId::new(1), args)).await;

        assert!(matches!(result, Err(CommandError::Validation(_))));
        let config = t.state.store.snapshot().await.welcome_configs[&GUILD.to_string()].clone();
        assert!(config.embed_enabled);
        assert_eq!(config.embed_color.as_deref(), Some("#00ff00"));
    }
}
