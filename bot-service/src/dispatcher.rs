use std::collections::BTreeSet;

use shared::errors::Result;
use shared::{all_numbers, record_counter, record_gauge};
use teloxide::types::{ChatId, UserId};

use crate::callback::CallbackAction;
use crate::events::{Inbound, Outbound, Sender};
use crate::state::State;
use crate::store::ConversationStore;
use crate::telegram::keyboards::{
    make_block_keyboard, make_contact_keyboard, make_services_keyboard,
};
use crate::telegram::messages::{self, BLOCKED_NOTICE};
use crate::telegram::Command;

/// Routes every inbound event to one handler and returns the resulting
/// Telegram side effects. Holds no transport, so it can run without a bot.
pub struct CommandDispatcher {
    store: ConversationStore,
    admin_ids: BTreeSet<u64>,
    bot_username: String,
}

impl CommandDispatcher {
    pub fn new(
        store: ConversationStore,
        admin_ids: BTreeSet<u64>,
        bot_username: impl Into<String>,
    ) -> Self {
        Self {
            store,
            admin_ids,
            bot_username: bot_username.into(),
        }
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn is_admin(&self, user_id: UserId) -> bool {
        self.admin_ids.contains(&user_id.0)
    }

    pub async fn dispatch(&self, event: Inbound) -> Result<Vec<Outbound>> {
        record_counter("bot_updates_total", 1);

        match event {
            Inbound::Command { sender, command } => self.handle_command(sender, command).await,
            Inbound::Contact {
                sender,
                phone_number,
            } => self.handle_contact(sender, phone_number).await,
            Inbound::Text { sender, text } => self.handle_text(sender, text).await,
            Inbound::Callback { sender, data } => self.handle_callback(sender, &data).await,
        }
    }

    async fn blocked_reply(&self, sender: &Sender) -> Option<Vec<Outbound>> {
        if self.store.is_blocked(sender.id).await {
            tracing::info!(user_id = sender.id.0, "Ignoring blocked user");
            Some(vec![Outbound::reply(BLOCKED_NOTICE)])
        } else {
            None
        }
    }

    async fn handle_command(&self, sender: Sender, command: Command) -> Result<Vec<Outbound>> {
        // /info answers everyone, blocked or not.
        if command != Command::Info {
            if let Some(reply) = self.blocked_reply(&sender).await {
                return Ok(reply);
            }
        }

        let actions = match command {
            Command::Start => {
                tracing::info!("User {} started bot!", sender.id.0);
                vec![
                    Outbound::RegisterCommands,
                    Outbound::reply_with(messages::START_PROMPT, make_services_keyboard()),
                ]
            }
            Command::Help => {
                tracing::info!("User {} get help from bot!", sender.id.0);
                vec![Outbound::reply(messages::HELP_TEXT)]
            }
            Command::Comment => {
                tracing::info!("User {} start commenting!", sender.id.0);
                vec![Outbound::reply_with(
                    messages::COMMENT_PROMPT,
                    make_contact_keyboard(),
                )]
            }
            Command::Admin => {
                if self.is_admin(sender.id) {
                    vec![Outbound::reply(messages::ADMIN_WELCOME)]
                } else {
                    tracing::warn!(user_id = sender.id.0, "Unauthorized /admin attempt");
                    vec![Outbound::reply(messages::NOT_AUTHORIZED)]
                }
            }
            Command::Info => vec![Outbound::reply(messages::INFO_TEXT)],
        };

        Ok(actions)
    }

    async fn handle_contact(&self, sender: Sender, phone_number: String) -> Result<Vec<Outbound>> {
        if let Some(reply) = self.blocked_reply(&sender).await {
            return Ok(reply);
        }

        tracing::info!("User {} shared phone: {}", sender.id.0, phone_number);

        self.store.remember_phone(sender.id, phone_number).await;
        self.store.set_state(sender.id, State::AwaitingComment).await?;

        Ok(vec![Outbound::reply(messages::PHONE_RECEIVED)])
    }

    async fn handle_text(&self, sender: Sender, text: String) -> Result<Vec<Outbound>> {
        if let Some(reply) = self.blocked_reply(&sender).await {
            return Ok(reply);
        }

        let phone = self.store.phone(sender.id).await;

        match self.store.state(sender.id).await? {
            State::AwaitingComment => {
                let notification = messages::format_comment_notification(&sender, &phone, &text);
                let mut actions: Vec<Outbound> = self
                    .admin_chats()
                    .map(|chat_id| Outbound::Notify {
                        chat_id,
                        text: notification.clone(),
                        markup: Some(make_block_keyboard(sender.id).into()),
                    })
                    .collect();
                actions.push(Outbound::reply(messages::COMMENT_THANKS));

                self.store.set_state(sender.id, State::Idle).await?;

                tracing::info!("User {} write {}!", sender.id.0, text);
                record_counter("bot_comments_forwarded_total", 1);

                Ok(actions)
            }
            State::Idle => {
                tracing::info!("User {} type invalid text: {}!", sender.id.0, text);
                record_counter("bot_invalid_messages_total", 1);

                let notification = messages::format_invalid_text_notification(
                    &self.bot_username,
                    &sender,
                    &phone,
                    &text,
                );
                let mut actions = vec![Outbound::reply(messages::INVALID_TEXT_REPLY)];
                actions.extend(
                    self.admin_chats()
                        .map(|chat_id| Outbound::notify(chat_id, notification.clone())),
                );

                Ok(actions)
            }
        }
    }

    async fn handle_callback(&self, sender: Sender, data: &str) -> Result<Vec<Outbound>> {
        let action = match CallbackAction::parse(data) {
            Ok(Some(action)) => action,
            Ok(None) => {
                tracing::debug!(user_id = sender.id.0, data, "Ignoring unknown callback");
                return Ok(Vec::new());
            }
            Err(e) => {
                tracing::warn!(user_id = sender.id.0, "Dropping callback: {}", e);
                return Ok(Vec::new());
            }
        };

        if let Some(reply) = self.blocked_reply(&sender).await {
            return Ok(reply);
        }

        let actions = match action {
            CallbackAction::Block(target) => self.block_user(&sender, target).await,
            CallbackAction::Lookup(service) => vec![Outbound::reply(service.describe())],
            CallbackAction::AllNumbers => vec![Outbound::reply(all_numbers())],
        };

        Ok(actions)
    }

    async fn block_user(&self, admin: &Sender, target: UserId) -> Vec<Outbound> {
        if !self.is_admin(admin.id) {
            tracing::warn!(
                user_id = admin.id.0,
                blocked_user = target.0,
                "Non-admin tried to block a user"
            );
            return vec![Outbound::reply(messages::NOT_AUTHORIZED)];
        }

        if !self.store.block(target).await {
            return vec![Outbound::reply(messages::format_already_blocked(target))];
        }

        tracing::info!(admin_id = admin.id.0, blocked_user = target.0, "User blocked");
        record_counter("bot_users_blocked_total", 1);
        record_gauge("bot_blocked_users", self.store.blocked_count().await as f64);

        vec![
            Outbound::notify(ChatId::from(target), messages::BLOCKED_TARGET_NOTICE),
            Outbound::reply(messages::format_block_confirmation(target)),
        ]
    }

    fn admin_chats(&self) -> impl Iterator<Item = ChatId> + '_ {
        self.admin_ids.iter().map(|&id| ChatId::from(UserId(id)))
    }
}
