
use serenity::model::id::{ChannelId, GuildId, RoleId, UserId};
use serenity::model::permissions::Permissions;
use nonempty::NonEmpty;

use std::collections::HashMap;

use crate::databases::StoreError;
use crate::state::BotState;
use crate::utility::*;


#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    User(UserId),
    Text(String),
    Integer(i64),
    Channel(ChannelId),
    Role(RoleId),
    Boolean(bool),
}

/// Named options of one invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandArgs {
    values: HashMap<String, ArgValue>,
}

impl CommandArgs {

    pub fn new() -> Self {
        CommandArgs::default()
    }

    #[cfg(test)]
    pub fn with(mut self, name: &str, value: ArgValue) -> Self {
        self.values.insert(name.to_string(), value);
        self
    }

    pub fn insert(&mut self, name: &str, value: ArgValue) {
        self.values.insert(name.to_string(), value);
    }

    pub fn user(&self, name: &str) -> Option<UserId> {
        match self.values.get(name) {
            Some(ArgValue::User(user)) => Some(*user),
            _ => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ArgValue::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(ArgValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn channel(&self, name: &str) -> Option<ChannelId> {
        match self.values.get(name) {
            Some(ArgValue::Channel(channel)) => Some(*channel),
            _ => None,
        }
    }

    pub fn role(&self, name: &str) -> Option<RoleId> {
        match self.values.get(name) {
            Some(ArgValue::Role(role)) => Some(*role),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(ArgValue::Boolean(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn require_user(&self, name: &str) -> Result<UserId, CommandError> {
        self.user(name).ok_or_else(|| CommandError::InvalidUsage(format!("missing <{}>", name)))
    }

    pub fn require_text(&self, name: &str) -> Result<&str, CommandError> {
        self.text(name)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| CommandError::InvalidUsage(format!("missing <{}>", name)))
    }

    pub fn require_channel(&self, name: &str) -> Result<ChannelId, CommandError> {
        self.channel(name).ok_or_else(|| CommandError::InvalidUsage(format!("missing <{}>", name)))
    }

}

pub struct CommandParams<'a> {
    pub state: &'a BotState,
    pub guild_id: GuildId,
    pub guild_name: String,
    pub member_count: u64,
    pub channel_id: ChannelId,
    pub author: UserId,
    pub author_tag: String,
    pub author_avatar: Option<String>,
    pub member_permissions: Permissions,
    pub lang: Language,
    pub args: CommandArgs,
    /// Set for button presses.
    pub from_component: bool,
    pub commands: &'a [Box<dyn Command>],
}

impl<'a> CommandParams<'a> {

    pub fn new(state: &'a BotState, guild_id: GuildId, channel_id: ChannelId, author: UserId, lang: Language) -> Self {
        CommandParams {
            state,
            guild_id,
            guild_name: String::new(),
            member_count: 0,
            channel_id,
            author,
            author_tag: author.to_string(),
            author_avatar: None,
            member_permissions: Permissions::empty(),
            lang,
            args: CommandArgs::new(),
            from_component: false,
            commands: &[],
        }
    }

}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("invalid usage: {0}")]
    InvalidUsage(String),
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Ticket(#[from] TicketError),
    #[error(transparent)]
    Moderation(#[from] ModerationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl CommandError {

    /// What the invoking user gets to read, `None` for failures that only
    /// deserve the generic notice.
    pub fn user_message(&self, lang: Language) -> Option<String> {
        match self {
            CommandError::InvalidUsage(detail) => Some(lang.render(Text::InvalidUsage, &[("detail", detail.as_str())])),
            CommandError::Validation(message)  => Some(message.clone()),
            CommandError::Ticket(why) => match why {
                TicketError::Disabled                => Some(lang.text(Text::TicketsDisabled).to_string()),
                TicketError::DuplicateTicket(channel) => Some(lang.render(Text::DuplicateTicket, &[("channel", mention_channel(channel).as_str())])),
                TicketError::NotATicket              => Some(lang.text(Text::NotATicket).to_string()),
                TicketError::AlreadyClosing          => Some(lang.text(Text::AlreadyClosing).to_string()),
                TicketError::Gateway(GatewayError::PermissionDenied) => Some(lang.text(Text::PermissionDenied).to_string()),
                _ => None,
            },
            CommandError::Moderation(why) => match why {
                ModerationError::PermissionDenied => Some(lang.text(Text::PermissionDenied).to_string()),
                ModerationError::TargetNotFound   => Some(lang.text(Text::TargetNotFound).to_string()),
                ModerationError::TargetNotInGuild => Some(lang.text(Text::TargetNotInGuild).to_string()),
                _ => None,
            },
            CommandError::Gateway(GatewayError::PermissionDenied) => Some(lang.text(Text::PermissionDenied).to_string()),
            _ => None,
        }
    }

    /// Errors the user caused, as opposed to failures worth an error log.
    pub fn is_expected(&self) -> bool {
        match self {
            CommandError::Store(_) => false,
            CommandError::Moderation(ModerationError::Persistence(_)) => false,
            CommandError::Ticket(TicketError::Persistence(_)) => false,
            _ => self.user_message(Language::En).is_some(),
        }
    }

}

pub trait Command: Send + Sync {

    fn define_usage(&self) -> UsageBuilder;

    /// Compares the member's permissions with the ones the usage demands.
    fn permission(&self, params: &CommandParams<'_>) -> bool {
        match self.define_usage().get_permission() {
            Some(required) => params.member_permissions.contains(required)
                || params.member_permissions.administrator(),
            None => true,
        }
    }

    fn run<'a>(&'a self, params: CommandParams<'a>) -> BoxedFuture<'a, Result<OutgoingMessage, CommandError>>;

    fn get_triggers(&self) -> NonEmpty<String> {
        self.define_usage().triggers
    }

    fn is_triggered_by(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.get_triggers().iter().any(|trigger| *trigger == name)
    }

}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors_ignore_other_kinds() {
        let args = CommandArgs::new()
            .with("user", ArgValue::User(UserId::new(3)))
            .with("reason", ArgValue::Text("spam".to_string()))
            .with("days", ArgValue::Integer(2));

        assert_eq!(args.user("user"), Some(UserId::new(3)));
        assert_eq!(args.text("user"), None);
        assert_eq!(args.integer("days"), Some(2));
        assert!(args.require_user("target").is_err());
        assert_eq!(args.require_text("reason").unwrap(), "spam");
    }

    #[test]
    fn blank_text_counts_as_missing() {
        let args = CommandArgs::new().with("reason", ArgValue::Text("   ".to_string()));
        assert!(matches!(args.require_text("reason"), Err(CommandError::InvalidUsage(_))));
    }

    #[test]
    fn user_errors_get_specific_messages() {
        let missing = CommandError::Moderation(ModerationError::TargetNotInGuild);
        assert_eq!(missing.user_message(Language::En).as_deref(), Some("❌ This user isn't in the server."));
        assert!(missing.is_expected());

        let transient = CommandError::Gateway(GatewayError::Transient("timeout".to_string()));
        assert_eq!(transient.user_message(Language::En), None);
        assert!(!transient.is_expected());
    }
}
