//! Unified error codes for the member registry
//!
//! This module defines all error codes used by the import pipeline, the
//! registry client and the frontend. Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Member errors
//! - 5xxx: Import / export errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Session has expired
    SessionExpired = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,

    // ==================== 4xxx: Member ====================
    /// Member not found
    MemberNotFound = 4001,
    /// Member shares an identity field with an existing member
    DuplicateMember = 4002,
    /// Full name shorter than the minimum length
    NameTooShort = 4003,
    /// National ID is not 14 digits
    NationalIdInvalid = 4004,
    /// Phone number is not 01 followed by 9 digits
    PhoneInvalid = 4005,
    /// Email address is malformed
    EmailInvalid = 4006,
    /// Age outside the accepted range
    AgeOutOfRange = 4007,

    // ==================== 5xxx: Import / Export ====================
    /// Unsupported file format
    UnsupportedFileFormat = 5001,
    /// File too large
    FileTooLarge = 5002,
    /// Empty file provided
    EmptyFile = 5003,
    /// Worksheet has no cells
    EmptySheet = 5004,
    /// Worksheet has no data rows
    NoDataRows = 5005,
    /// Spreadsheet could not be decoded
    SpreadsheetUnreadable = 5006,
    /// Export failed
    ExportFailed = 5007,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network error
    NetworkError = 9003,
    /// Timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check whether this is the success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Default English message for this code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::SessionExpired => "Session has expired",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",

            // Member
            ErrorCode::MemberNotFound => "Member not found",
            ErrorCode::DuplicateMember => "Member already exists",
            ErrorCode::NameTooShort => "Name is too short",
            ErrorCode::NationalIdInvalid => "National ID must be 14 digits",
            ErrorCode::PhoneInvalid => "Phone number must be 01 followed by 9 digits",
            ErrorCode::EmailInvalid => "Email address is invalid",
            ErrorCode::AgeOutOfRange => "Age must be between 18 and 80",

            // Import / Export
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::EmptySheet => "Worksheet is empty",
            ErrorCode::NoDataRows => "No data rows found",
            ErrorCode::SpreadsheetUnreadable => "Spreadsheet could not be read",
            ErrorCode::ExportFailed => "Export failed",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
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
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1005 => Ok(ErrorCode::SessionExpired),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),

            // Member
            4001 => Ok(ErrorCode::MemberNotFound),
            4002 => Ok(ErrorCode::DuplicateMember),
            4003 => Ok(ErrorCode::NameTooShort),
            4004 => Ok(ErrorCode::NationalIdInvalid),
            4005 => Ok(ErrorCode::PhoneInvalid),
            4006 => Ok(ErrorCode::EmailInvalid),
            4007 => Ok(ErrorCode::AgeOutOfRange),

            // Import / Export
            5001 => Ok(ErrorCode::UnsupportedFileFormat),
            5002 => Ok(ErrorCode::FileTooLarge),
            5003 => Ok(ErrorCode::EmptyFile),
            5004 => Ok(ErrorCode::EmptySheet),
            5005 => Ok(ErrorCode::NoDataRows),
            5006 => Ok(ErrorCode::SpreadsheetUnreadable),
            5007 => Ok(ErrorCode::ExportFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::RequiredField.code(), 7);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::DuplicateMember.code(), 4002);
        assert_eq!(ErrorCode::NoDataRows.code(), 5005);
        assert_eq!(ErrorCode::InternalError.code(), 9001);
    }

    #[test]
    fn test_try_from_round_trips_known_codes() {
        for code in [
            ErrorCode::ValidationFailed,
            ErrorCode::NationalIdInvalid,
            ErrorCode::PhoneInvalid,
            ErrorCode::EmptySheet,
            ErrorCode::ConfigError,
        ] {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_rejects_unknown() {
        assert_eq!(ErrorCode::try_from(4999), Err(InvalidErrorCode(4999)));
    }

    #[test]
    fn test_serde_as_number() {
        let json = serde_json::to_string(&ErrorCode::EmailInvalid).unwrap();
        assert_eq!(json, "4006");
        let code: ErrorCode = serde_json::from_str("5001").unwrap();
        assert_eq!(code, ErrorCode::UnsupportedFileFormat);
    }
}
