use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use shared::errors::{Result, ServiceError};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};
use teloxide::types::{ChatId, UserId};
use tokio::sync::RwLock;

use crate::state::State;

pub type BotDialogue = Dialogue<State, InMemStorage<State>>;

/// Shown in place of a phone number the user never shared.
pub const NO_PHONE_NUMBER: &str = "No phone number";

/// Process-wide conversation state, phone cache and block list.
///
/// Dialogues are keyed by the user's private chat, which Telegram numbers the
/// same as the user. Nothing here outlives the process.
pub struct ConversationStore {
    dialogues: Arc<InMemStorage<State>>,
    phones: RwLock<HashMap<UserId, String>>,
    blocked: RwLock<HashSet<UserId>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self {
            dialogues: InMemStorage::<State>::new(),
            phones: RwLock::new(HashMap::new()),
            blocked: RwLock::new(HashSet::new()),
        }
    }

    fn dialogue(&self, user_id: UserId) -> BotDialogue {
        Dialogue::new(self.dialogues.clone(), ChatId::from(user_id))
    }

    pub async fn state(&self, user_id: UserId) -> Result<State> {
        self.dialogue(user_id)
            .get_or_default()
            .await
            .map_err(|e| ServiceError::Storage(format!("Failed to read dialogue: {}", e)))
    }

    pub async fn set_state(&self, user_id: UserId, state: State) -> Result<()> {
        self.dialogue(user_id)
            .update(state)
            .await
            .map_err(|e| ServiceError::Storage(format!("Failed to update dialogue: {}", e)))
    }

    pub async fn remember_phone(&self, user_id: UserId, phone_number: String) {
        self.phones.write().await.insert(user_id, phone_number);
    }

    pub async fn phone(&self, user_id: UserId) -> String {
        self.phones
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_else(|| NO_PHONE_NUMBER.to_string())
    }

    pub async fn is_blocked(&self, user_id: UserId) -> bool {
        self.blocked.read().await.contains(&user_id)
    }

    /// Returns `false` when the user was already blocked.
    pub async fn block(&self, user_id: UserId) -> bool {
        self.blocked.write().await.insert(user_id)
    }

    pub async fn blocked_count(&self) -> usize {
        self.blocked.read().await.len()
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}
