use shared::{EmergencyService, ALL_NUMBERS_KEY};
use teloxide::types::{
    ButtonRequest, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup,
    UserId,
};

use crate::callback::block_payload;

pub fn make_services_keyboard() -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = EmergencyService::ALL
        .iter()
        .map(|service| {
            vec![InlineKeyboardButton::callback(
                service.button_label(),
                service.key(),
            )]
        })
        .collect();

    rows.push(vec![InlineKeyboardButton::callback(
        "Search all numbers",
        ALL_NUMBERS_KEY,
    )]);

    InlineKeyboardMarkup::new(rows)
}

pub fn make_contact_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new("📱 Share phone number").request(ButtonRequest::Contact),
    ]])
    .resize_keyboard()
    .one_time_keyboard()
}

pub fn make_block_keyboard(user_id: UserId) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "🚫 Block User",
        block_payload(user_id),
    )]])
}
