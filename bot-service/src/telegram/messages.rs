use teloxide::types::UserId;

use crate::events::Sender;

pub const BLOCKED_NOTICE: &str = "🚫 Siz botdan foydalanishdan bloklangansiz.";
pub const BLOCKED_TARGET_NOTICE: &str = "🚫 Siz botdan foydalanishdan bloklandingiz.";

pub const START_PROMPT: &str = "Choose the button from the following list:";
pub const HELP_TEXT: &str = "For using bot please type /start!";
pub const INFO_TEXT: &str = "Bot info.";
pub const COMMENT_PROMPT: &str = "📌 Iltimos, komment yozishda hurmatli bo‘ling.\n\
    ❗ Haqoratli so‘z ishlatsangiz bloklanasiz.\n\n\
    ☎ Telefon raqamingizni ulashing:";
pub const PHONE_RECEIVED: &str = "✅ Phone number received!\n✏️ Now please write your comment:";
pub const COMMENT_THANKS: &str =
    "✅ Thank you for commenting. Your comment has been sent to the admin.";
pub const INVALID_TEXT_REPLY: &str = "Sorry, I can't do that.";
pub const NOT_AUTHORIZED: &str = "❌ You are not authorized to use this command.";
pub const ADMIN_WELCOME: &str = "✅ Welcome to Admin Panel.";

pub fn format_comment_notification(sender: &Sender, phone: &str, comment: &str) -> String {
    format!(
        "📩 New comment from {} ({}):\n\
        📞 Phone: {}\n\n\
        {}",
        sender.full_name(),
        sender.id.0,
        phone,
        comment
    )
}

pub fn format_invalid_text_notification(
    bot_username: &str,
    sender: &Sender,
    phone: &str,
    text: &str,
) -> String {
    format!(
        "🚫 Invalid text from @{}:\n\
        First name: {}\n\
        Last name: {}\n\
        Username: {}\n\
        📞 Phone: {}\n\
        Message: {}",
        bot_username,
        sender.first_name,
        sender.last_name.as_deref().unwrap_or("No lastname"),
        sender.username.as_deref().unwrap_or("No username"),
        phone,
        text
    )
}

pub fn format_block_confirmation(user_id: UserId) -> String {
    format!("✅ User {} blocked.", user_id.0)
}

pub fn format_already_blocked(user_id: UserId) -> String {
    format!("ℹ️ User {} is already blocked.", user_id.0)
}
