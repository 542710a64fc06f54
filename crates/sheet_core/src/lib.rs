//! Core domain logic for the question sheet tracker.
//! This crate is the single source of truth for topic tree invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod ordering;
pub mod service;
pub mod store;

pub use config::{ConfigError, SheetConfig};
pub use logging::{
    default_log_level, init_from_config, init_logging, logging_status, LoggingError,
};
pub use model::ids::{generate_id, EntityId, QuestionId, SubTopicId, TopicId};
pub use model::progress::Progress;
pub use model::sheet::{
    Difficulty, ParseDifficultyError, Question, QuestionDraft, QuestionPatch, Sheet, SubTopic,
    Topic,
};
pub use ordering::{array_move, moved};
pub use service::sheet_service::{normalize_link, normalize_title, SheetService, SheetServiceError};
pub use store::seed::default_sheet;
pub use store::sheet_store::{SheetStore, SheetStoreError};
pub use store::subscription::{SnapshotListener, SubscriptionId};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
