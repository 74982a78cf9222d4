use teloxide::types::{ChatId, ReplyMarkup, User, UserId};

use crate::telegram::Command;

/// The parts of a Telegram user the bot reports to admins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sender {
    pub id: UserId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

impl Sender {
    pub fn new(id: UserId, first_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: None,
            username: None,
        }
    }

    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last_name) => format!("{} {}", self.first_name, last_name),
            None => self.first_name.clone(),
        }
    }
}

impl From<&User> for Sender {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Inbound {
    Command { sender: Sender, command: Command },
    Contact { sender: Sender, phone_number: String },
    Text { sender: Sender, text: String },
    Callback { sender: Sender, data: String },
}

/// Side effects requested by the dispatcher, executed against Telegram in
/// order.
#[derive(Debug, Clone)]
pub enum Outbound {
    /// Publish the command list shown in the client's menu.
    RegisterCommands,
    /// Answer in the chat the event came from.
    Reply {
        text: String,
        markup: Option<ReplyMarkup>,
    },
    /// Message another chat. Delivery failures are isolated per recipient.
    Notify {
        chat_id: ChatId,
        text: String,
        markup: Option<ReplyMarkup>,
    },
}

impl Outbound {
    pub fn reply(text: impl Into<String>) -> Self {
        Outbound::Reply {
            text: text.into(),
            markup: None,
        }
    }

    pub fn reply_with(text: impl Into<String>, markup: impl Into<ReplyMarkup>) -> Self {
        Outbound::Reply {
            text: text.into(),
            markup: Some(markup.into()),
        }
    }

    pub fn notify(chat_id: ChatId, text: impl Into<String>) -> Self {
        Outbound::Notify {
            chat_id,
            text: text.into(),
            markup: None,
        }
    }
}
