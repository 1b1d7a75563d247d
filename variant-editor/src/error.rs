//! Editor error types

use shared::error::{AppError, ErrorCode};
use shared::models::AttributeKind;
use thiserror::Error;

use crate::combination::VariantKey;

/// Errors raised by editor actions
///
/// Every variant is terminal to the triggering action only; the editor state
/// is left as it was before the action.
#[derive(Debug, Error)]
pub enum EditorError {
    /// Required form field is empty
    #[error("{0} is required")]
    Required(&'static str),

    /// No attribute set chosen yet
    #[error("No attribute set selected")]
    NoAttributeSet,

    /// Attribute id not present in the chosen attribute set
    #[error("Attribute {0} is not part of the attribute set")]
    UnknownAttribute(String),

    /// Value kind does not fit the attribute type
    #[error("Attribute {label} expects a {expected} value")]
    KindMismatch {
        label: String,
        expected: AttributeKind,
    },

    /// Option value not declared on the attribute
    #[error("{value} is not an option of {label}")]
    OptionNotAllowed { label: String, value: String },

    /// No variant with this identity in the current matrix
    #[error("Variant {0} does not exist")]
    UnknownVariant(VariantKey),

    /// Image cap would be exceeded
    #[error("At most {limit} images per variant (has {existing}, adding {incoming})")]
    TooManyImages {
        limit: usize,
        existing: usize,
        incoming: usize,
    },

    /// Collaborator call failed
    #[error(transparent)]
    Transport(#[from] AppError),
}

impl EditorError {
    /// Validation failures are reported without touching any collaborator
    pub fn is_validation(&self) -> bool {
        !matches!(self, EditorError::Transport(_))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            EditorError::Required(_) => ErrorCode::RequiredField,
            EditorError::NoAttributeSet => ErrorCode::AttributeSetNotSelected,
            EditorError::UnknownAttribute(_) => ErrorCode::AttributeNotFound,
            EditorError::KindMismatch { .. } => ErrorCode::AttributeKindMismatch,
            EditorError::OptionNotAllowed { .. } => ErrorCode::OptionNotAllowed,
            EditorError::UnknownVariant(_) => ErrorCode::VariantNotFound,
            EditorError::TooManyImages { .. } => ErrorCode::ImageLimitExceeded,
            EditorError::Transport(err) => err.code,
        }
    }
}

impl From<EditorError> for AppError {
    fn from(err: EditorError) -> Self {
        let code = err.code();
        match err {
            EditorError::Transport(inner) => inner,
            EditorError::Required(field) => {
                AppError::with_message(code, format!("{field} is required")).with_detail("field", field)
            }
            EditorError::TooManyImages {
                limit,
                existing,
                incoming,
            } => AppError::with_message(
                code,
                format!("At most {limit} images per variant"),
            )
            .with_detail("limit", limit)
            .with_detail("existing", existing)
            .with_detail("incoming", incoming),
            EditorError::UnknownVariant(key) => {
                AppError::with_message(code, format!("Variant {key} does not exist"))
                    .with_detail("variant", key.fingerprint())
            }
            other => AppError::with_message(code, other.to_string()),
        }
    }
}

/// Result type for editor actions
pub type EditorResult<T> = Result<T, EditorError>;
