//! Data models
//!
//! Value objects rebuilt from the remote sheet on every fetch.
//! Serialized field names are camelCase, matching the sheet script.

pub mod device;
pub mod history;
pub mod user;

// Re-exports
pub use device::*;
pub use history::*;
pub use user::*;

use serde::{Deserialize, Serialize};

/// One complete fetch of the remote store
///
/// Replaced wholesale on every refresh; never merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub devices: Vec<Device>,
    pub users: Vec<User>,
    /// Most recent first
    pub history: Vec<HistoryEntry>,
}

impl Snapshot {
    pub fn device_by_tag(&self, tag_id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.tag_id == tag_id)
    }

    pub fn user_by_employee_id(&self, employee_id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.employee_id == employee_id)
    }
}
