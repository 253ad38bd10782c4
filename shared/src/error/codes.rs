//! Error codes for AssetFlow
//!
//! Organized by category:
//! - 0xxx: General errors
//! - 1xxx: Identification errors
//! - 2xxx: Permission errors
//! - 4xxx: Device errors
//! - 5xxx: User errors
//! - 9xxx: Transport errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code enum
///
/// Serialized as a bare u16.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Unknown error
    Unknown = 1,
    /// Required field missing
    RequiredField = 7,
    /// Destructive action was not confirmed
    NotConfirmed = 9,

    // ==================== 1xxx: Identification ====================
    /// No actor has been identified
    NotIdentified = 1001,
    /// Admin password missing or wrong
    InvalidCredentials = 1002,
    /// No user matches the given name or employee ID
    UnknownUser = 1003,

    // ==================== 2xxx: Permission ====================
    /// Management role required
    ManagementRequired = 2001,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 4xxx: Device ====================
    /// Device not found
    DeviceNotFound = 4001,
    /// Tag ID already used by another device
    DuplicateTagId = 4002,
    /// Device is not AVAILABLE
    DeviceNotAvailable = 4003,
    /// Device is not ASSIGNED
    DeviceNotAssigned = 4004,
    /// Device status does not allow deletion
    DeviceNotDeletable = 4005,

    // ==================== 5xxx: User ====================
    /// User not found
    UserNotFound = 5001,
    /// Employee ID already used by another user
    DuplicateEmployeeId = 5002,

    // ==================== 9xxx: Transport ====================
    /// Network request failed
    NetworkError = 9001,
    /// Remote returned a non-success status
    RemoteError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Developer-facing English message
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::NotConfirmed => "Action was not confirmed",
            ErrorCode::NotIdentified => "No user is identified",
            ErrorCode::InvalidCredentials => "Invalid admin password",
            ErrorCode::UnknownUser => "No matching user",
            ErrorCode::ManagementRequired => "Admin or operation role required",
            ErrorCode::AdminRequired => "Admin role required",
            ErrorCode::DeviceNotFound => "Device not found",
            ErrorCode::DuplicateTagId => "Tag ID already exists",
            ErrorCode::DeviceNotAvailable => "Device is not available for assignment",
            ErrorCode::DeviceNotAssigned => "Device is not assigned",
            ErrorCode::DeviceNotDeletable => "Device cannot be deleted in its current status",
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::DuplicateEmployeeId => "Employee ID already exists",
            ErrorCode::NetworkError => "Network request failed",
            ErrorCode::RemoteError => "Remote service returned an error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ErrorCode::Unknown),
            7 => Ok(ErrorCode::RequiredField),
            9 => Ok(ErrorCode::NotConfirmed),
            1001 => Ok(ErrorCode::NotIdentified),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::UnknownUser),
            2001 => Ok(ErrorCode::ManagementRequired),
            2003 => Ok(ErrorCode::AdminRequired),
            4001 => Ok(ErrorCode::DeviceNotFound),
            4002 => Ok(ErrorCode::DuplicateTagId),
            4003 => Ok(ErrorCode::DeviceNotAvailable),
            4004 => Ok(ErrorCode::DeviceNotAssigned),
            4005 => Ok(ErrorCode::DeviceNotDeletable),
            5001 => Ok(ErrorCode::UserNotFound),
            5002 => Ok(ErrorCode::DuplicateEmployeeId),
            9001 => Ok(ErrorCode::NetworkError),
            9002 => Ok(ErrorCode::RemoteError),
            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
