mod commands;
pub mod handlers;
pub mod keyboards;
pub mod messages;

pub use commands::Command;
pub use handlers::{handle_callback_query, handle_message};
