
use serenity::model::id::{ChannelId, GuildId, RoleId, UserId};
use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};
use chrono::{DateTime, Utc};
use strum_macros::{Display, EnumIter};
use uuid::Uuid;

use std::collections::BTreeMap;
use std::str::FromStr;


fn enabled_by_default() -> bool {
    true
}

fn parse_id<T: FromStr>(raw: &str) -> Option<T> {
    raw.parse().ok()
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TicketConfig {
    pub channel_id: String,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

impl TicketConfig {
    pub fn category(&self) -> Option<ChannelId> {
        self.category_id.as_deref().and_then(parse_id)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Open,
    Closing,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TicketRecord {
    pub id: Uuid,
    pub guild_id: String,
    pub owner_id: Option<String>,
    pub number: u64,
    pub channel_id: String,
    pub status: TicketStatus,
    #[serde(default)]
    pub claimants: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl TicketRecord {

    pub fn new(guild: GuildId, owner: Option<UserId>, number: u64, channel: ChannelId) -> Self {
        TicketRecord {
            id: Uuid::new_v4(),
            guild_id: guild.to_string(),
            owner_id: owner.map(|owner| owner.to_string()),
            number,
            channel_id: channel.to_string(),
            status: TicketStatus::Open,
            claimants: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn channel(&self) -> Option<ChannelId> {
        parse_id(&self.channel_id)
    }

    pub fn owner(&self) -> Option<UserId> {
        self.owner_id.as_deref().and_then(parse_id)
    }

    pub fn is_open(&self) -> bool {
        self.status == TicketStatus::Open
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WarnRecord {
    pub reason: String,
    #[serde(rename = "moderator", alias = "moderatorId")]
    pub moderator_id: String,
    pub date: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ModAction {
    Ban,
    Kick,
    Warn,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ModActionRecord {
    #[serde(rename = "type")]
    pub action: ModAction,
    pub user: String,
    pub moderator: String,
    pub reason: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeConfig {
    pub channel_id: String,
    pub message: String,
    pub embed_enabled: bool,
    #[serde(default)]
    pub embed_title: Option<String>,
    #[serde(default)]
    pub embed_color: Option<String>,
    #[serde(default)]
    pub embed_image: Option<String>,
    pub ping_user: bool,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

impl WelcomeConfig {

    pub fn new(channel: ChannelId) -> Self {
        WelcomeConfig {
            channel_id: channel.to_string(),
            message: "¡Bienvenido {user} a {server}!".to_string(),
            embed_enabled: true,
            embed_title: Some("¡Bienvenido!".to_string()),
            embed_color: Some("#00ff00".to_string()),
            embed_image: None,
            ping_user: true,
            roles: Vec::new(),
            enabled: true,
        }
    }

    pub fn channel(&self) -> Option<ChannelId> {
        parse_id(&self.channel_id)
    }

    pub fn role_ids(&self) -> Vec<RoleId> {
        self.roles.iter().filter_map(|role| parse_id(role)).collect()
    }
}

/// The whole persisted document. Every map is keyed by guild id, `warns`
/// and `openTickets` are nested by user / channel id.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreData {
    pub welcome_configs: BTreeMap<String, WelcomeConfig>,
    pub ticket_counters: BTreeMap<String, u64>,
    pub mod_actions: BTreeMap<String, Vec<ModActionRecord>>,
    pub warns: BTreeMap<String, BTreeMap<String, Vec<WarnRecord>>>,
    pub tickets: BTreeMap<String, TicketConfig>,
    pub open_tickets: BTreeMap<String, BTreeMap<String, TicketRecord>>,
    pub prefixes: BTreeMap<String, String>,
    pub user_languages: BTreeMap<String, String>,
}

impl StoreData {

    pub fn ticket_config(&self, guild: GuildId) -> Option<&TicketConfig> {
        self.tickets.get(&guild.to_string())
    }

    pub fn ticket_counter(&self, guild: GuildId) -> u64 {
        self.ticket_counters.get(&guild.to_string()).copied().unwrap_or(0)
    }

    pub fn next_ticket_number(&mut self, guild: GuildId) -> u64 {
        let counter = self.ticket_counters.entry(guild.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }

    pub fn open_ticket_of(&self, guild: GuildId, owner: UserId) -> Option<TicketRecord> {
        self.open_tickets.get(&guild.to_string())?
            .values()
            .find(|record| record.is_open() && record.owner() == Some(owner))
            .cloned()
    }

    pub fn ticket_by_channel(&self, guild: GuildId, channel: ChannelId) -> Option<TicketRecord> {
        self.open_tickets.get(&guild.to_string())?
            .get(&channel.to_string())
            .cloned()
    }

    pub fn closing_channels(&self, guild: GuildId) -> Vec<ChannelId> {
        self.open_tickets.get(&guild.to_string())
            .map(|records| records.values()
                .filter(|record| !record.is_open())
                .filter_map(|record| record.channel())
                .collect())
            .unwrap_or_default()
    }

    pub fn insert_ticket(&mut self, record: TicketRecord) {
        self.open_tickets.entry(record.guild_id.clone()).or_default()
            .insert(record.channel_id.clone(), record);
    }

    pub fn ticket_mut(&mut self, guild: GuildId, channel: ChannelId) -> Option<&mut TicketRecord> {
        self.open_tickets.get_mut(&guild.to_string())?
            .get_mut(&channel.to_string())
    }

    pub fn remove_ticket(&mut self, guild: GuildId, channel: ChannelId) -> Option<TicketRecord> {
        let guild_key = guild.to_string();
        let records = self.open_tickets.get_mut(&guild_key)?;
        let removed = records.remove(&channel.to_string());
        if records.is_empty() {
            self.open_tickets.remove(&guild_key);
        }
        removed
    }

    pub fn language_of(&self, user: UserId) -> Option<&str> {
        self.user_languages.get(&user.to_string()).map(|code| code.as_str())
    }
}
