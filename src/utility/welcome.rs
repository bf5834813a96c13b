
use serenity::model::id::{GuildId, UserId};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::databases::*;
use crate::utility::*;


static HEX_COLOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#([0-9a-fA-F]{6})$").unwrap());

/// Who joined where, as the template placeholders see it.
pub struct Greeting<'a> {
    pub user: UserId,
    pub username: &'a str,
    pub server: &'a str,
    pub member_count: u64,
    pub avatar_url: Option<&'a str>,
}

pub fn parse_color(raw: &str) -> Option<u32> {
    let captures = HEX_COLOR.captures(raw.trim())?;
    u32::from_str_radix(&captures[1], 16).ok()
}

pub fn render_template(template: &str, greeting: &Greeting) -> String {
    template
        .replace("{user}", &mention_user(greeting.user))
        .replace("{username}", greeting.username)
        .replace("{server}", greeting.server)
        .replace("{membercount}", &greeting.member_count.to_string())
}

pub fn build_welcome_message(config: &WelcomeConfig, greeting: &Greeting) -> OutgoingMessage {

    let text = render_template(&config.message, greeting);
    if !config.embed_enabled {
        return match config.ping_user {
            true  => OutgoingMessage::text(format!("{} {}", mention_user(greeting.user), text)),
            false => OutgoingMessage::text(text),
        };
    }

    let title = config.embed_title.clone()
        .unwrap_or_else(|| format!("¡Bienvenido a {}!", greeting.server));
    let mut builder = LogBuilder::new(&title)
        .description(&text)
        .color(config.embed_color.as_deref().and_then(parse_color).unwrap_or(0x00ff00))
        .footer(&format!("Miembro #{}", greeting.member_count))
        .timestamp();
    if let Some(avatar) = greeting.avatar_url {
        builder = builder.thumbnail(avatar);
    }
    if let Some(image) = &config.embed_image {
        builder = builder.image(image);
    }

    let message = builder.to_message();
    match config.ping_user {
        true  => message.with_content(mention_user(greeting.user)),
        false => message,
    }
}

/// Sends the configured greeting and grants the join roles. Returns `false`
/// when the guild has no (enabled) welcome config.
pub async fn greet(gateway: &dyn Gateway, store: &Store, guild: GuildId, greeting: &Greeting<'_>) -> Result<bool, GatewayError> {

    let config = store.read(|data| data.welcome_configs.get(&guild.to_string()).cloned()).await;
    let config = match config {
        Some(config) if config.enabled => config,
        _ => return Ok(false),
    };
    let channel = match config.channel() {
        Some(channel) => channel,
        None => {
            Logger::warn_long("Welcome channel id is malformed", &config.channel_id);
            return Ok(false);
        }
    };

    gateway.send_message(channel, build_welcome_message(&config, greeting)).await?;

    for role in config.role_ids() {
        if let Err(why) = gateway.add_role(guild, greeting.user, role).await {
            Logger::warn_long(&format!("Couldn't grant join role {} to {}", role, greeting.user), &why.to_string());
        }
    }

    Ok(true)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::utility::gateway::mock::MockGateway;
    use serenity::model::id::RoleId;

    const GUILD: GuildId = GuildId::new(5);

    fn greeting() -> Greeting<'static> {
        Greeting {
            user: UserId::new(9),
            username: "newbie",
            server: "Rustaceans",
            member_count: 42,
            avatar_url: None,
        }
    }

    #[test]
    fn colors_must_be_six_hex_digits() {
        assert_eq!(parse_color("#00ff00"), Some(0x00ff00));
        assert_eq!(parse_color("#ABCDEF"), Some(0xabcdef));
        assert_eq!(parse_color("00ff00"), None);
        assert_eq!(parse_color("#0f0"), None);
        assert_eq!(parse_color("#gggggg"), None);
    }

    #[test]
    fn every_placeholder_is_replaced() {
        let text = render_template("{user} ({username}) joined {server}, member {membercount}", &greeting());
        assert_eq!(text, "<@9> (newbie) joined Rustaceans, member 42");
    }

    #[test]
    fn plain_text_greeting_when_embed_disabled() {
        let mut config = WelcomeConfig::new(serenity::model::id::ChannelId::new(1));
        config.embed_enabled = false;

        let message = build_welcome_message(&config, &greeting());
        assert!(message.embed.is_none());
        assert_eq!(message.content.as_deref(), Some("<@9> ¡Bienvenido <@9> a Rustaceans!"));

        config.ping_user = false;
        let message = build_welcome_message(&config, &greeting());
        assert_eq!(message.content.as_deref(), Some("¡Bienvenido <@9> a Rustaceans!"));
    }

    #[test]
    fn missing_title_names_the_server() {
        let mut config = WelcomeConfig::new(serenity::model::id::ChannelId::new(1));
        config.embed_title = None;

        let embed = build_welcome_message(&config, &greeting()).embed.unwrap();
        assert_eq!(embed.title.as_deref(), Some("¡Bienvenido a Rustaceans!"));
    }

    #[test]
    fn embed_greeting_pings_and_colors() {
        let mut config = WelcomeConfig::new(serenity::model::id::ChannelId::new(1));
        config.embed_color = Some("#123456".to_string());

        let message = build_welcome_message(&config, &greeting());

        let embed = message.embed.unwrap();
        assert_eq!(embed.color, Some(0x123456));
        assert_eq!(embed.footer.as_deref(), Some("Miembro #42"));
        assert_eq!(message.content.as_deref(), Some("<@9>"));
    }

    #[tokio::test]
    async fn greet_sends_and_survives_role_failures() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("config.json")).await.unwrap();
        let gateway = MockGateway::new();
        let channel = gateway.add_channel(GUILD, "welcome", ChannelKind::Text, None);
        gateway.missing_roles.lock().unwrap().push(RoleId::new(71));

        let mut config = WelcomeConfig::new(channel);
        config.roles = vec!["70".to_string(), "71".to_string(), "72".to_string()];
        store.mutate(|data| { data.welcome_configs.insert(GUILD.to_string(), config); }).await.unwrap();

        assert!(greet(&gateway, &store, GUILD, &greeting()).await.unwrap());

        assert_eq!(gateway.messages_in(channel).len(), 1);
        let granted: Vec<_> = gateway.granted_roles.lock().unwrap().iter().map(|(_, _, role)| role.get()).collect();
        assert_eq!(granted, vec![70, 72]);
    }

    #[tokio::test]
    async fn greet_skips_unconfigured_or_disabled_guilds() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open(dir.path().join("config.json")).await.unwrap();
        let gateway = MockGateway::new();

        assert!(!greet(&gateway, &store, GUILD, &greeting()).await.unwrap());

        let channel = gateway.add_channel(GUILD, "welcome", ChannelKind::Text, None);
        let mut config = WelcomeConfig::new(channel);
        config.enabled = false;
        store.mutate(|data| { data.welcome_configs.insert(GUILD.to_string(), config); }).await.unwrap();

        assert!(!greet(&gateway, &store, GUILD, &greeting()).await.unwrap());
        assert!(gateway.messages.lock().unwrap().is_empty());
    }
}
