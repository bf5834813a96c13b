
use serenity::model::id::{GuildId, UserId};
use serde_json::{Map, Value};
use chrono::Utc;

use std::sync::Arc;

use crate::databases::*;
use crate::utility::*;


#[derive(Debug, thiserror::Error)]
pub enum ModerationError {
    #[error("missing permissions")]
    PermissionDenied,
    #[error("target user not found")]
    TargetNotFound,
    #[error("target user is not in the guild")]
    TargetNotInGuild,
    #[error(transparent)]
    Gateway(GatewayError),
    #[error(transparent)]
    Persistence(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    Nothing,
    Cleared(usize),
}

pub struct ModRequest<'a> {
    pub guild: GuildId,
    pub guild_name: &'a str,
    pub target: UserId,
    pub moderator: UserId,
    pub moderator_tag: &'a str,
    pub reason: &'a str,
}

/// Per-guild moderation history: the append-only action log and the
/// per-user warning lists.
#[derive(Clone)]
pub struct ModLedger {
    store: Store,
    gateway: Arc<dyn Gateway>,
}

impl ModLedger {

    pub fn new(store: Store, gateway: Arc<dyn Gateway>) -> Self {
        ModLedger { store, gateway }
    }

    pub async fn record_action(&self,
            guild: GuildId,
            action: ModAction,
            target: UserId,
            moderator: UserId,
            reason: &str,
            extra: Map<String, Value>) -> Result<ModActionRecord, StoreError>
    {
        let record = ModActionRecord {
            action,
            user: target.to_string(),
            moderator: moderator.to_string(),
            reason: reason.to_string(),
            date: Utc::now(),
            extra,
        };
        let stored = record.clone();
        self.store.mutate(move |data| {
            data.mod_actions.entry(guild.to_string()).or_default().push(stored);
        }).await?;
        Ok(record)
    }

    /// Returns the user's warning count including the new one.
    pub async fn warn(&self, guild: GuildId, target: UserId, moderator: UserId, reason: &str) -> Result<usize, StoreError> {
        let warning = WarnRecord {
            reason: reason.to_string(),
            moderator_id: moderator.to_string(),
            date: Utc::now(),
        };
        let action = ModActionRecord {
            action: ModAction::Warn,
            user: target.to_string(),
            moderator: moderator.to_string(),
            reason: reason.to_string(),
            date: warning.date,
            extra: Map::new(),
        };
        self.store.mutate(move |data| {
            let guild_key = guild.to_string();
            data.mod_actions.entry(guild_key.clone()).or_default().push(action);
            let warnings = data.warns.entry(guild_key).or_default()
                .entry(target.to_string()).or_default();
            warnings.push(warning);
            warnings.len()
        }).await
    }

    pub async fn list_warnings(&self, guild: GuildId, target: UserId) -> Vec<WarnRecord> {
        self.store.read(|data| {
            data.warns.get(&guild.to_string())
                .and_then(|users| users.get(&target.to_string()))
                .cloned()
                .unwrap_or_default()
        }).await
    }

    pub async fn clear_warnings(&self, guild: GuildId, target: UserId) -> Result<ClearOutcome, StoreError> {
        let stored = self.list_warnings(guild, target).await.len();
        if stored == 0 {
            return Ok(ClearOutcome::Nothing);
        }
        let removed = self.store.mutate(|data| {
            data.warns.get_mut(&guild.to_string())
                .and_then(|users| users.remove(&target.to_string()))
                .map(|warnings| warnings.len())
                .unwrap_or(0)
        }).await?;
        Ok(match removed {
            0 => ClearOutcome::Nothing,
            count => ClearOutcome::Cleared(count),
        })
    }

    #[cfg(test)]
    pub async fn actions(&self, guild: GuildId) -> Vec<ModActionRecord> {
        self.store.read(|data| {
            data.mod_actions.get(&guild.to_string()).cloned().unwrap_or_default()
        }).await
    }

    pub async fn ban(&self, request: ModRequest<'_>, delete_message_days: u8) -> Result<ModActionRecord, ModerationError> {

        #[cfg(feature = "debug")]
        Logger::info_long("Start", &format!("Banning {}", request.target));

        let audit_reason = format!("{} (Banned by {})", request.reason, request.moderator_tag);
        self.gateway.ban_member(request.guild, request.target, &audit_reason, delete_message_days).await
            .map_err(|why| match why {
                GatewayError::PermissionDenied => ModerationError::PermissionDenied,
                GatewayError::NotFound         => ModerationError::TargetNotFound,
                other                          => ModerationError::Gateway(other),
            })?;

        let mut extra = Map::new();
        extra.insert("deleteMessageDays".to_string(), Value::from(delete_message_days));
        let record = self.record_action(request.guild, ModAction::Ban,
            request.target, request.moderator, request.reason, extra).await?;

        let notice = format!("You've been banned from **{}**\nReason: {}", request.guild_name, request.reason);
        self.notify(request.target, notice).await;

        Ok(record)
    }

    pub async fn kick(&self, request: ModRequest<'_>) -> Result<ModActionRecord, ModerationError> {

        #[cfg(feature = "debug")]
        Logger::info_long("Start", &format!("Kicking {}", request.target));

        let audit_reason = format!("{} (Kicked by {})", request.reason, request.moderator_tag);
        self.gateway.kick_member(request.guild, request.target, &audit_reason).await
            .map_err(|why| match why {
                GatewayError::PermissionDenied => ModerationError::PermissionDenied,
                GatewayError::NotFound         => ModerationError::TargetNotInGuild,
                other                          => ModerationError::Gateway(other),
            })?;

        let record = self.record_action(request.guild, ModAction::Kick,
            request.target, request.moderator, request.reason, Map::new()).await?;

        let notice = format!("You've been kicked from **{}**\nReason: {}", request.guild_name, request.reason);
        self.notify(request.target, notice).await;

        Ok(record)
    }

    /// Direct messages are best-effort; users may have them disabled.
    pub async fn notify(&self, target: UserId, notice: String) {
        let sent = self.gateway.send_direct_message(target, OutgoingMessage::text(notice)).await;
        if let Err(why) = sent {
            Logger::warn_long(&format!("Couldn't DM {}", target), &why.to_string());
        }
    }

}
