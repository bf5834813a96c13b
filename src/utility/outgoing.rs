
use serenity::model::id::{RoleId, UserId};


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Primary,
    Danger,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub custom_id: String,
    pub label: String,
    pub kind: ButtonKind,
    pub emoji: Option<char>,
}

impl Button {

    pub fn new(custom_id: &str, label: &str, kind: ButtonKind) -> Self {
        Button {
            custom_id: custom_id.to_string(),
            label: label.to_string(),
            kind,
            emoji: None,
        }
    }

    pub fn emoji(mut self, emoji: char) -> Self {
        self.emoji = Some(emoji);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Embed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<u32>,
    pub fields: Vec<(String, String, bool)>,
    pub thumbnail: Option<String>,
    pub image: Option<String>,
    pub footer: Option<String>,
    pub timestamp: bool,
}

impl Embed {

    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields.iter()
            .find(|(name, _, _)| name == label)
            .map(|(_, value, _)| value.as_str())
    }
}

/// Platform-neutral message. Converted into serenity builders right before
/// it leaves the process (see `traits::ToMessage`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutgoingMessage {
    pub content: Option<String>,
    pub embed: Option<Embed>,
    pub buttons: Vec<Button>,
    pub ephemeral: bool,
}

impl OutgoingMessage {

    pub fn text(content: impl Into<String>) -> Self {
        OutgoingMessage {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn embed(embed: Embed) -> Self {
        OutgoingMessage {
            embed: Some(embed),
            ..Default::default()
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_button(mut self, button: Button) -> Self {
        self.buttons.push(button);
        self
    }

    pub fn ephemeral(mut self) -> Self {
        self.ephemeral = true;
        self
    }

    /// Everything a reader would see, used by logs and tests.
    pub fn rendered(&self) -> String {
        let mut parts = Vec::new();
        if let Some(content) = &self.content {
            parts.push(content.clone());
        }
        if let Some(embed) = &self.embed {
            parts.extend(embed.title.clone());
            parts.extend(embed.description.clone());
            for (name, value, _) in embed.fields.iter() {
                parts.push(format!("{}: {}", name, value));
            }
        }
        parts.join("\n")
    }
}

pub fn mention_user(user: UserId) -> String {
    format!("<@{}>", user)
}

pub fn mention_role(role: RoleId) -> String {
    format!("<@&{}>", role)
}

pub fn mention_channel(channel: impl std::fmt::Display) -> String {
    format!("<#{}>", channel)
}
