//! Validation errors raised before any write is sent
//!
//! - [`ErrorCode`]: stable numeric codes
//! - [`ValidationError`]: guard failures, each mapped to a code

mod codes;

pub use codes::{ErrorCode, InvalidErrorCode};

use thiserror::Error;

use crate::models::AssetStatus;

/// A pre-write guard rejected the action
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required field missing: {0}")]
    RequiredField(&'static str),

    #[error("Tag ID already exists: {0}")]
    DuplicateTagId(String),

    #[error("Employee ID already exists: {0}")]
    DuplicateEmployeeId(String),

    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Device {tag_id} is {status}, expected AVAILABLE")]
    DeviceNotAvailable { tag_id: String, status: AssetStatus },

    #[error("Device {tag_id} is {status}, expected ASSIGNED")]
    DeviceNotAssigned { tag_id: String, status: AssetStatus },

    #[error("Device {tag_id} is {status} and cannot be deleted")]
    DeviceNotDeletable { tag_id: String, status: AssetStatus },
}

impl ValidationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::RequiredField(_) => ErrorCode::RequiredField,
            Self::DuplicateTagId(_) => ErrorCode::DuplicateTagId,
            Self::DuplicateEmployeeId(_) => ErrorCode::DuplicateEmployeeId,
            Self::DeviceNotFound(_) => ErrorCode::DeviceNotFound,
            Self::UserNotFound(_) => ErrorCode::UserNotFound,
            Self::DeviceNotAvailable { .. } => ErrorCode::DeviceNotAvailable,
            Self::DeviceNotAssigned { .. } => ErrorCode::DeviceNotAssigned,
            Self::DeviceNotDeletable { .. } => ErrorCode::DeviceNotDeletable,
        }
    }
}

/// Case-insensitive, whitespace-trimmed identifier comparison
pub fn same_identifier(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
