pub mod config;
pub mod directory;
pub mod errors;
pub mod telemetry;

pub use config::BotConfig;
pub use directory::{all_numbers, EmergencyService, ALL_NUMBERS_KEY};
pub use errors::{Result, ServiceError};
pub use telemetry::{init_metrics, init_tracing, record_counter, record_gauge, record_timing};
