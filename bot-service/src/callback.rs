use shared::errors::{Result, ServiceError};
use shared::{EmergencyService, ALL_NUMBERS_KEY};
use teloxide::types::UserId;

pub const BLOCK_PREFIX: &str = "block_";

pub fn block_payload(user_id: UserId) -> String {
    format!("{}{}", BLOCK_PREFIX, user_id.0)
}

/// Inline button payloads the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    Block(UserId),
    Lookup(EmergencyService),
    AllNumbers,
}

impl CallbackAction {
    /// `Ok(None)` for payloads the bot doesn't know about. A `block_` payload
    /// with a bad id is an error.
    pub fn parse(data: &str) -> Result<Option<Self>> {
        if let Some(raw_id) = data.strip_prefix(BLOCK_PREFIX) {
            let id = raw_id.parse::<u64>().map_err(|e| {
                ServiceError::Validation(format!("Invalid block payload '{}': {}", data, e))
            })?;
            return Ok(Some(CallbackAction::Block(UserId(id))));
        }

        if data == ALL_NUMBERS_KEY {
            return Ok(Some(CallbackAction::AllNumbers));
        }

        Ok(data.parse::<EmergencyService>().ok().map(CallbackAction::Lookup))
    }
}
