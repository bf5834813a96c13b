
use serenity::model::id::RoleId;

use std::path::PathBuf;
use std::time::Duration;

use crate::utility::locale::Language;


#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("environment variable {name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    pub staff_role: RoleId,
    pub store_path: PathBuf,
    pub close_delay: Duration,
    pub default_language: Language,
}

impl BotConfig {

    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> Result<BotConfig, ConfigError> {
        dotenvy::dotenv().ok();
        BotConfig::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<BotConfig, ConfigError> {

        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let invalid = |name: &'static str, value: &str| ConfigError::Invalid {
            name,
            value: value.to_string(),
        };

        let token = required("DISCORD_TOKEN")?;

        let raw_role = required("STAFF_ROLE_ID")?;
        let staff_role = raw_role.trim().parse::<u64>().ok()
            .filter(|id| *id != 0)
            .map(RoleId::new)
            .ok_or_else(|| invalid("STAFF_ROLE_ID", &raw_role))?;

        let store_path = lookup("STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("config.json"));

        let close_delay = match lookup("TICKET_CLOSE_DELAY_SECS") {
            Some(raw) => raw.trim().parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| invalid("TICKET_CLOSE_DELAY_SECS", &raw))?,
            None => Duration::from_secs(5),
        };

        let default_language = match lookup("DEFAULT_LANGUAGE") {
            Some(raw) => Language::from_code(&raw)
                .ok_or_else(|| invalid("DEFAULT_LANGUAGE", &raw))?,
            None => Language::Es,
        };

        Ok(BotConfig { token, staff_role, store_path, close_delay, default_language })
    }

}
