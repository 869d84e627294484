//! Verification outcomes and the error taxonomy at the device boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Expected device-interaction failure with a user-facing message id.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{default_message}")]
pub struct LocalizableError {
    /// Message identifier understood by the localization layer.
    pub id: String,
    /// Text shown when no translation exists for `id`.
    pub default_message: String,
}

impl LocalizableError {
    pub fn new(id: impl Into<String>, default_message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            default_message: default_message.into(),
        }
    }
}

/// Failure reported by the external device-verification operation.
#[derive(Debug, Error)]
pub enum DeviceVerifyError {
    /// User rejected on device, wrong device, unsupported firmware, ...
    #[error(transparent)]
    Localizable(#[from] LocalizableError),

    /// Anything the integration layer could not classify.
    #[error(transparent)]
    Opaque(#[from] anyhow::Error),
}

/// Dialog templates the presenter knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorTemplate {
    /// Generic dialog whose body is a localized domain message.
    GeneralLocalizableError,
    /// "Could not talk to the hardware wallet" with the raw failure text.
    HwConnectionError,
    /// Internal inconsistency; the wallet state needs investigation.
    InternalError,
}

/// Body passed to an error template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorMessage {
    /// To be resolved by the localization layer.
    Localizable(LocalizableError),
    /// Shown verbatim.
    Raw(String),
}

/// How a verification attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The device displayed the address and the user approved it.
    Verified,
    /// Classified device failure.
    DomainFailure(LocalizableError),
    /// Unclassified device or transport failure, with its raw text.
    OpaqueFailure(String),
    /// The address has no addressing info in the wallet index.
    InvariantViolation { address: String },
    /// The dialog closed before the device was contacted.
    Abandoned,
}

impl VerificationOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationOutcome::Verified)
    }

    /// Template and body the failure is surfaced with, if any.
    pub fn error_dialog(&self) -> Option<(ErrorTemplate, ErrorMessage)> {
        match self {
            VerificationOutcome::Verified | VerificationOutcome::Abandoned => None,
            VerificationOutcome::DomainFailure(err) => Some((
                ErrorTemplate::GeneralLocalizableError,
                ErrorMessage::Localizable(err.clone()),
            )),
            VerificationOutcome::OpaqueFailure(message) => Some((
                ErrorTemplate::HwConnectionError,
                ErrorMessage::Raw(message.clone()),
            )),
            VerificationOutcome::InvariantViolation { address } => Some((
                ErrorTemplate::InternalError,
                ErrorMessage::Raw(format!("no addressing data for {address}")),
            )),
        }
    }
}

impl From<DeviceVerifyError> for VerificationOutcome {
    fn from(err: DeviceVerifyError) -> Self {
        match err {
            DeviceVerifyError::Localizable(err) => VerificationOutcome::DomainFailure(err),
            DeviceVerifyError::Opaque(err) => VerificationOutcome::OpaqueFailure(err.to_string()),
        }
    }
}
