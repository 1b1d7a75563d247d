//! Unified error codes for the catalog workspace
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 6xxx: Product / variant errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so they can travel in API
/// responses unchanged.
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
    /// Required field missing
    RequiredField = 7,

    // ==================== 6xxx: Product ====================
    /// No attribute set has been chosen for the product
    AttributeSetNotSelected = 6001,
    /// Attribute is not part of the current attribute set
    AttributeNotFound = 6002,
    /// Value kind does not match the attribute type
    AttributeKindMismatch = 6003,
    /// Option value is not declared on the attribute
    OptionNotAllowed = 6004,
    /// Variant does not exist for the current selection
    VariantNotFound = 6005,
    /// Too many images for one variant
    ImageLimitExceeded = 6006,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Network / transport error
    NetworkError = 9002,
    /// Remote service rejected the request
    RemoteRejected = 9003,
    /// Image upload failed
    UploadFailed = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::RequiredField => "Required field is missing",

            // Product
            ErrorCode::AttributeSetNotSelected => "No attribute set selected",
            ErrorCode::AttributeNotFound => "Attribute not found in attribute set",
            ErrorCode::AttributeKindMismatch => "Value does not match attribute type",
            ErrorCode::OptionNotAllowed => "Option value is not allowed for attribute",
            ErrorCode::VariantNotFound => "Variant not found",
            ErrorCode::ImageLimitExceeded => "Too many images for variant",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::RemoteRejected => "Request rejected by server",
            ErrorCode::UploadFailed => "Image upload failed",
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
            7 => Ok(ErrorCode::RequiredField),

            // Product
            6001 => Ok(ErrorCode::AttributeSetNotSelected),
            6002 => Ok(ErrorCode::AttributeNotFound),
            6003 => Ok(ErrorCode::AttributeKindMismatch),
            6004 => Ok(ErrorCode::OptionNotAllowed),
            6005 => Ok(ErrorCode::VariantNotFound),
            6006 => Ok(ErrorCode::ImageLimitExceeded),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::NetworkError),
            9003 => Ok(ErrorCode::RemoteRejected),
            9004 => Ok(ErrorCode::UploadFailed),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
