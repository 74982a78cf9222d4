pub mod callback;
pub mod dispatcher;
pub mod events;
pub mod state;
pub mod store;
pub mod telegram;

pub use dispatcher::CommandDispatcher;
pub use events::{Inbound, Outbound, Sender};
pub use state::State;
pub use store::{ConversationStore, NO_PHONE_NUMBER};
