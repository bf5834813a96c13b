
use serenity::builder::{
    CreateActionRow,
    CreateButton,
    CreateEmbed,
    CreateEmbedFooter,
    CreateInteractionResponse,
    CreateInteractionResponseMessage,
    CreateMessage,
};
use serenity::model::application::ButtonStyle;
use serenity::model::Timestamp;

use crate::utility::outgoing::{Button, ButtonKind, Embed, OutgoingMessage};


pub trait ToList<T> {
    fn to_list(&self) -> Vec<T> where T: Clone;
}

impl<T> ToList<T> for T {
    fn to_list(&self) -> Vec<T> where T: Clone {
        vec![self.clone()]
    }
}

impl<T> ToList<T> for Vec<T> {
    fn to_list(&self) -> Vec<T> where T: Clone {
        self.clone()
    }
}

impl<T> ToList<T> for &[T] {
    fn to_list(&self) -> Vec<T> where T: Clone {
        self.to_vec()
    }
}


pub trait ToMessage {
    fn to_message(&self) -> CreateMessage;
    fn to_response(&self) -> CreateInteractionResponse;
}

impl ToMessage for OutgoingMessage {

    fn to_message(&self) -> CreateMessage {
        let mut message = CreateMessage::default();
        if let Some(content) = &self.content {
            message = message.content(content);
        }
        if let Some(embed) = &self.embed {
            message = message.embed(embed.to_embed());
        }
        if !self.buttons.is_empty() {
            message = message.components(action_rows(&self.buttons));
        }
        message
    }

    fn to_response(&self) -> CreateInteractionResponse {
        let mut message = CreateInteractionResponseMessage::new()
            .ephemeral(self.ephemeral);
        if let Some(content) = &self.content {
            message = message.content(content);
        }
        if let Some(embed) = &self.embed {
            message = message.embed(embed.to_embed());
        }
        if !self.buttons.is_empty() {
            message = message.components(action_rows(&self.buttons));
        }
        CreateInteractionResponse::Message(message)
    }
}


pub trait ToEmbed {
    fn to_embed(&self) -> CreateEmbed;
}

impl ToEmbed for Embed {
    fn to_embed(&self) -> CreateEmbed {
        let mut embed = CreateEmbed::new()
            .fields(self.fields.clone());
        if let Some(title) = &self.title {
            embed = embed.title(title);
        }
        if let Some(description) = &self.description {
            embed = embed.description(description);
        }
        if let Some(color) = self.color {
            embed = embed.colour(color);
        }
        if let Some(thumbnail) = &self.thumbnail {
            embed = embed.thumbnail(thumbnail);
        }
        if let Some(image) = &self.image {
            embed = embed.image(image);
        }
        if let Some(footer) = &self.footer {
            embed = embed.footer(CreateEmbedFooter::new(footer));
        }
        if self.timestamp {
            embed = embed.timestamp(Timestamp::now());
        }
        embed
    }
}

// Discord allows up to 5 buttons per action row
fn action_rows(buttons: &[Button]) -> Vec<CreateActionRow> {
    buttons.chunks(5)
        .map(|chunk| {
            let row = chunk.iter().map(|button| {
                let style = match button.kind {
                    ButtonKind::Primary => ButtonStyle::Primary,
                    ButtonKind::Danger  => ButtonStyle::Danger,
                };
                let mut created = CreateButton::new(&button.custom_id)
                    .label(&button.label)
                    .style(style);
                if let Some(emoji) = button.emoji {
                    created = created.emoji(emoji);
                }
                created
            }).collect();
            CreateActionRow::Buttons(row)
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_values_and_lists_convert() {
        assert_eq!(5u8.to_list(), vec![5]);
        assert_eq!(ToList::<u8>::to_list(&vec![1u8, 2]), vec![1, 2]);
        let slice: &[u8] = &[3, 4];
        assert_eq!(ToList::<u8>::to_list(&slice), vec![3, 4]);
    }

    #[test]
    fn buttons_are_split_into_rows_of_five() {
        let buttons: Vec<Button> = (0..7)
            .map(|i| Button::new(&format!("b{}", i), "x", ButtonKind::Primary))
            .collect();
        assert_eq!(action_rows(&buttons).len(), 2);
    }
}
