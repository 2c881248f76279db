//! Location failure classification.
//!
//! Turns a raw acquisition failure (platform code, message, and the optional
//! permission-state probe) into one user-facing [`FailureCategory`] with a
//! fixed guidance message. Classification is pure and total.

use serde::{Deserialize, Serialize};

/// Raw failure code reported by the geolocation capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCode {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    /// The runtime has no location capability at all.
    Unsupported,
    /// Any code the platform defines beyond the standard three.
    Other(u16),
}

impl FailureCode {
    /// Maps the platform's numeric codes (`1` denied, `2` unavailable,
    /// `3` timeout).
    #[must_use]
    pub fn from_raw(code: u16) -> Self {
        match code {
            1 => Self::PermissionDenied,
            2 => Self::PositionUnavailable,
            3 => Self::Timeout,
            other => Self::Other(other),
        }
    }
}

/// Answer of the optional permission-state query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    Granted,
    Denied,
    Prompt,
}

/// A failed acquisition as handed to [`classify`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeoFailure {
    pub code: FailureCode,
    pub message: String,
    /// `None` when the permission-state query is unsupported.
    pub permission: Option<PermissionState>,
}

impl GeoFailure {
    #[must_use]
    pub fn new(code: FailureCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            permission: None,
        }
    }

    #[must_use]
    pub fn with_permission(mut self, permission: Option<PermissionState>) -> Self {
        self.permission = permission;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCategory {
    Unsupported,
    PermissionHardBlocked,
    PermissionPromptPending,
    PermissionUnknown,
    PositionUnavailable,
    Timeout,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: FailureCategory,
    pub message: String,
}

const HARD_BLOCKED_MSG: &str = "Location access is blocked for this site. Reset the location \
permission in your browser's site settings, then try again.";
const PROMPT_PENDING_MSG: &str =
    "Location permission is required. Accept the permission prompt when it appears.";
const PERMISSION_UNKNOWN_MSG: &str =
    "Location permission was denied. Allow location access for this site and try again.";
const UNAVAILABLE_MSG: &str =
    "Your position could not be determined. Check that location services (GPS) are on.";
const TIMEOUT_MSG: &str =
    "Getting your location took too long. Move somewhere with better signal and try again.";
const UNSUPPORTED_MSG: &str = "This device does not support location services.";

/// Classifies an acquisition failure.
///
/// Permission denials are refined by the permission probe: `denied` means a
/// persisted block, `prompt` means the user can still accept, anything else
/// (including an unsupported probe) gets generic guidance.
#[must_use]
pub fn classify(failure: &GeoFailure) -> Classification {
    let (category, message) = match failure.code {
        FailureCode::PermissionDenied => match failure.permission {
            Some(PermissionState::Denied) => {
                (FailureCategory::PermissionHardBlocked, HARD_BLOCKED_MSG)
            }
            Some(PermissionState::Prompt) => {
                (FailureCategory::PermissionPromptPending, PROMPT_PENDING_MSG)
            }
            Some(PermissionState::Granted) | None => {
                (FailureCategory::PermissionUnknown, PERMISSION_UNKNOWN_MSG)
            }
        },
        FailureCode::PositionUnavailable => {
            (FailureCategory::PositionUnavailable, UNAVAILABLE_MSG)
        }
        FailureCode::Timeout => (FailureCategory::Timeout, TIMEOUT_MSG),
        FailureCode::Unsupported => (FailureCategory::Unsupported, UNSUPPORTED_MSG),
        FailureCode::Other(_) => {
            return Classification {
                category: FailureCategory::Unknown,
                message: format!("Unexpected location error: {}", failure.message),
            };
        }
    };
    Classification {
        category,
        message: message.to_owned(),
    }
}
