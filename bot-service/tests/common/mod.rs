#![allow(dead_code)]

pub mod telegram_api;

use std::collections::BTreeSet;

use emergency_bot::telegram::Command;
use emergency_bot::{CommandDispatcher, ConversationStore, Inbound, Outbound, Sender};
use teloxide::types::{ChatId, ReplyMarkup, UserId};

pub const ADMIN_A: u64 = 7355079609;
pub const ADMIN_B: u64 = 6468400089;
pub const BOT_USERNAME: &str = "EmergencyNumbersBot";

pub fn create_test_dispatcher() -> CommandDispatcher {
    let admins: BTreeSet<u64> = [ADMIN_A, ADMIN_B].into_iter().collect();
    CommandDispatcher::new(ConversationStore::new(), admins, BOT_USERNAME)
}

pub fn sender(id: u64) -> Sender {
    Sender::new(UserId(id), format!("User{}", id))
}

pub fn command(id: u64, command: Command) -> Inbound {
    Inbound::Command {
        sender: sender(id),
        command,
    }
}

pub fn contact(id: u64, phone: &str) -> Inbound {
    Inbound::Contact {
        sender: sender(id),
        phone_number: phone.to_string(),
    }
}

pub fn text(id: u64, text: &str) -> Inbound {
    Inbound::Text {
        sender: sender(id),
        text: text.to_string(),
    }
}

pub fn press(id: u64, data: &str) -> Inbound {
    Inbound::Callback {
        sender: sender(id),
        data: data.to_string(),
    }
}

/// Texts sent back to the originating chat.
pub fn replies(actions: &[Outbound]) -> Vec<&str> {
    actions
        .iter()
        .filter_map(|action| match action {
            Outbound::Reply { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

/// `(recipient, text, markup)` of every notification.
pub fn notifications(actions: &[Outbound]) -> Vec<(ChatId, &str, Option<&ReplyMarkup>)> {
    actions
        .iter()
        .filter_map(|action| match action {
            Outbound::Notify {
                chat_id,
                text,
                markup,
            } => Some((*chat_id, text.as_str(), markup.as_ref())),
            _ => None,
        })
        .collect()
}

pub fn admin_chats() -> Vec<ChatId> {
    vec![ChatId(ADMIN_B as i64), ChatId(ADMIN_A as i64)]
}
