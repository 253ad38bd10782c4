//! History Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse bucket a history row's free-text action falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HistoryAction {
    Assign,
    Return,
    Repair,
    #[default]
    Update,
}

impl HistoryAction {
    /// Substring classifier over the uppercased raw action.
    ///
    /// Checked in order ASSIGN, RETURN, REPAIR; first hit wins.
    pub fn classify(raw: &str) -> Self {
        let upper = raw.to_uppercase();
        if upper.contains("ASSIGN") {
            Self::Assign
        } else if upper.contains("RETURN") {
            Self::Return
        } else if upper.contains("REPAIR") {
            Self::Repair
        } else {
            Self::Update
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assign => "ASSIGN",
            Self::Return => "RETURN",
            Self::Repair => "REPAIR",
            Self::Update => "UPDATE",
        }
    }
}

impl fmt::Display for HistoryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// History log row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    /// Tag of the referenced device
    pub tag_id: String,
    pub device_name: String,
    pub action: HistoryAction,
    /// Action text exactly as the sheet stored it
    pub raw_action: String,
    /// Display timestamp, or the raw value when unparseable
    pub timestamp: String,
    pub performer: String,
    /// Receiving party, empty when none
    pub target: String,
}
