// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the camera widget
//!
//! Camera failures never abort the widget: access errors leave the preview
//! unbound, and constraint failures are reported as a [`ConstraintStatus`]
//! rather than an error. Storage errors are propagated to the caller.

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for camera operations
pub type CameraResult<T> = Result<T, CameraError>;

/// Result type alias for persistence operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Main error type
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Camera-related errors
    Camera(CameraError),
    /// Persistence/filesystem errors
    Storage(StorageError),
}

/// A stream property that can be adjusted on the active video track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Constraint {
    Zoom,
    Torch,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::Zoom => write!(f, "zoom"),
            Constraint::Torch => write!(f, "torch"),
        }
    }
}

/// Camera-specific errors
#[derive(Debug, Clone, PartialEq)]
pub enum CameraError {
    /// The user or the platform refused camera access
    AccessDenied(String),
    /// No camera matches the requested constraints
    NoDevice,
    /// The device does not expose this constraint
    ConstraintUnsupported(Constraint),
    /// The device rejected a constraint it advertises
    ConstraintFailed {
        constraint: Constraint,
        reason: String,
    },
    /// A capture was requested while no stream is bound
    NoActiveStream,
    /// The rendered frame could not be encoded
    EncodingFailed(String),
    /// Other backend failure
    Backend(String),
}

impl CameraError {
    /// Whether this error means the camera could not be opened at all
    pub fn is_access_error(&self) -> bool {
        matches!(self, CameraError::AccessDenied(_) | CameraError::NoDevice)
    }
}

/// Persistence errors
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// Underlying read/write failure
    Io(String),
    /// The stored value could not be (de)serialized
    Serialization(String),
    /// The store refused the write because it is full
    QuotaExceeded,
    /// An encoded photo payload is not a valid data URI
    InvalidPayload(String),
    /// The stored gallery already uses the largest possible id
    IdsExhausted,
}

/// Outcome of a best-effort constraint application
///
/// Zoom and torch changes never fail the caller; this reports what
/// actually happened so the controller and tests can observe it.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintStatus {
    /// The constraint was applied with this value (after clamping)
    Applied(f64),
    /// The device does not report this capability
    Unsupported,
    /// No stream is bound
    NoActiveStream,
    /// The device reported the capability but rejected the change
    Failed(String),
}

impl ConstraintStatus {
    pub fn is_applied(&self) -> bool {
        matches!(self, ConstraintStatus::Applied(_))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Camera(e) => write!(f, "Camera error: {}", e),
            AppError::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::AccessDenied(msg) => write!(f, "Camera access denied: {}", msg),
            CameraError::NoDevice => write!(f, "No camera devices found"),
            CameraError::ConstraintUnsupported(c) => write!(f, "Constraint not supported: {}", c),
            CameraError::ConstraintFailed { constraint, reason } => {
                write!(f, "Failed to apply {}: {}", constraint, reason)
            }
            CameraError::NoActiveStream => write!(f, "No active camera stream"),
            CameraError::EncodingFailed(msg) => write!(f, "Encoding failed: {}", msg),
            CameraError::Backend(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(msg) => write!(f, "I/O error: {}", msg),
            StorageError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            StorageError::QuotaExceeded => write!(f, "Storage quota exceeded"),
            StorageError::InvalidPayload(msg) => write!(f, "Invalid payload: {}", msg),
            StorageError::IdsExhausted => write!(f, "No photo ids left"),
        }
    }
}

impl std::error::Error for AppError {}
impl std::error::Error for CameraError {}
impl std::error::Error for StorageError {}

impl From<CameraError> for AppError {
    fn from(err: CameraError) -> Self {
        AppError::Camera(err)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err)
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.into())
    }
}
