//! Device Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetStatus {
    #[default]
    Available,
    Assigned,
    Pending,
    Repair,
}

impl AssetStatus {
    pub const ALL: [AssetStatus; 4] = [
        AssetStatus::Available,
        AssetStatus::Assigned,
        AssetStatus::Pending,
        AssetStatus::Repair,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Assigned => "ASSIGNED",
            Self::Pending => "PENDING",
            Self::Repair => "REPAIR",
        }
    }

    /// Trim + uppercase match. `None` for anything unrecognized.
    pub fn parse(raw: &str) -> Option<Self> {
        let upper = raw.trim().to_uppercase();
        Self::ALL.into_iter().find(|s| s.as_str() == upper)
    }

    /// Whether a device in this status may be removed
    pub fn is_deletable(&self) -> bool {
        matches!(self, Self::Available | Self::Pending)
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Device entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    /// Local id, unique within one fetch only
    pub id: String,
    /// User-assigned asset tag, the remote row key
    pub tag_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub location: String,
    pub configuration: String,
    pub accessory: String,
    pub note: String,
    pub status: AssetStatus,
    /// Name or employee ID; set only while ASSIGNED
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    pub last_updated: String,
}

impl Device {
    /// Whether the holder matches either identifier of a person
    pub fn is_assigned_to(&self, name: &str, employee_id: &str) -> bool {
        self.assigned_to
            .as_deref()
            .is_some_and(|a| a == name || a == employee_id)
    }
}

/// Create device payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceCreate {
    pub tag_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub configuration: String,
    pub location: String,
}

/// Update device payload
///
/// `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceUpdate {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub location: Option<String>,
    pub configuration: Option<String>,
    pub accessory: Option<String>,
    pub note: Option<String>,
    pub status: Option<AssetStatus>,
    pub assigned_to: Option<String>,
}

impl DeviceUpdate {
    /// Apply this update on top of an existing device
    pub fn apply(&self, device: &Device) -> Device {
        let mut updated = device.clone();
        if let Some(v) = &self.name {
            updated.name = v.clone();
        }
        if let Some(v) = &self.kind {
            updated.kind = v.clone();
        }
        if let Some(v) = &self.location {
            updated.location = v.clone();
        }
        if let Some(v) = &self.configuration {
            updated.configuration = v.clone();
        }
        if let Some(v) = &self.accessory {
            updated.accessory = v.clone();
        }
        if let Some(v) = &self.note {
            updated.note = v.clone();
        }
        if let Some(v) = self.status {
            updated.status = v;
        }
        if let Some(v) = &self.assigned_to {
            updated.assigned_to = if v.trim().is_empty() {
                None
            } else {
                Some(v.clone())
            };
        }
        updated
    }
}
