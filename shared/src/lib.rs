//! Shared types for AssetFlow
//!
//! Domain models, the row normalizer, the CSV tokenizer, visibility rules
//! and write payloads. Everything here is pure: no I/O, no async.

pub mod csv;
pub mod error;
pub mod intent;
pub mod models;
pub mod normalize;
pub mod query;
pub mod record;
pub mod util;
pub mod visibility;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{ErrorCode, ValidationError};
pub use intent::{Command, WriteRequest};
pub use models::{AssetStatus, Device, HistoryAction, HistoryEntry, Snapshot, User, UserRole};
pub use normalize::Normalizer;
pub use record::RawRecord;
pub use visibility::Actor;
