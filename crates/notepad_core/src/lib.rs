//! Core domain logic for the notepad.
//! Polymorphic posts (memo, task, link), their SQLite row mapping and text
//! export.

pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod registry;
pub mod repo;
pub mod service;

pub use config::{NotepadConfig, StoreConfig, DEFAULT_DB_FILE, DEFAULT_EXPORT_DIR};
pub use export::{export_file_name, export_post};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::countdown::{Countdown, CountdownPart, Direction, TimeUnit};
pub use model::dates::{parse_date, DateParseError};
pub use model::intake::{ConsoleIntake, Intake};
pub use model::link::Link;
pub use model::memo::Memo;
pub use model::post::{Post, PostBase, PostError, PostResult};
pub use model::row::{Row, RowValue};
pub use model::task::Task;
pub use registry::{register_types, PostConstructor, PostRegistry, RegistryError};
pub use repo::post_repo::{
    PostFilter, PostId, PostStore, SqlitePostStore, StoreError, StoreResult, StoredRow,
};
pub use service::post_service::{NotepadError, NotepadService, SavedPost};
