
use serenity::model::id::UserId;

use crate::utility::outgoing::{Embed, OutgoingMessage, mention_user};


#[derive(Clone)]
pub struct LogBuilder {
    title: String,
    description: Option<String>,
    color: Option<u32>,
    fields: Vec<(String, String, bool)>,
    footer: Option<String>,
    thumbnail: Option<String>,
    image: Option<String>,
    timestamp: bool,
}

impl LogBuilder {

    pub fn new(title: &str) -> LogBuilder {
        LogBuilder {
            title: title.to_string(),
            description: None,
            color: None,
            fields: Vec::new(),
            footer: None,
            thumbnail: None,
            image: None,
            timestamp: false,
        }
    }

    pub fn build(&self) -> Embed {
        Embed {
            title: Some(self.title.clone()),
            description: self.description.clone(),
            color: self.color,
            fields: self.fields.clone(),
            thumbnail: self.thumbnail.clone(),
            image: self.image.clone(),
            footer: self.footer.clone(),
            timestamp: self.timestamp,
        }
    }

    pub fn to_message(&self) -> OutgoingMessage {
        OutgoingMessage::embed(self.build())
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn user(mut self, user: UserId) -> Self {
        self.fields.push(("User".to_string(), mention_user(user), true));
        self
    }

    pub fn timestamp(mut self) -> Self {
        self.timestamp = true;
        self
    }

    pub fn footer(mut self, footer: &str) -> Self {
        self.footer = Some(footer.to_string());
        self
    }

    pub fn thumbnail(mut self, url: &str) -> Self {
        self.thumbnail = Some(url.to_string());
        self
    }

    pub fn image(mut self, url: &str) -> Self {
        self.image = Some(url.to_string());
        self
    }

    pub fn inline(mut self, label: &str, content: &str) -> Self {
        self.fields.push((label.to_string(), content.to_string(), true));
        self
    }

    pub fn arbitrary(mut self, label: &str, content: &str) -> Self {
        self.fields.push((label.to_string(), content.to_string(), false));
        self
    }

}
