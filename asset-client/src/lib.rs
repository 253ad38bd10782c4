//! Asset Client - talks to the spreadsheet-backed store
//!
//! Reads the whole dataset (JSON endpoint or CSV exports), keeps it in an
//! [`AppState`], and turns user actions into fire-and-forget writes through
//! [`AssetClient`].

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod http;
pub mod source;
pub mod state;

pub use config::{ClientConfig, CsvExports};
pub use dispatcher::AssetClient;
pub use error::{ClientError, ClientResult};
pub use http::{HttpTransport, NetworkTransport};
pub use source::DataSource;
pub use state::{AppState, Banner};

// Re-export shared types for convenience
pub use shared::models::{
    AssetStatus, Device, DeviceCreate, DeviceUpdate, HistoryEntry, Snapshot, User, UserCreate,
    UserRole, UserUpdate,
};
