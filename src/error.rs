//! Error types for Surveyor operations.
//!
//! This module defines [`SurveyorError`], the primary error type used
//! throughout the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `SurveyorError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `SurveyorError::Other`) for unexpected errors
//! - Per-check failures are never errors: runners convert them into FAIL
//!   results with evidence. The only error a check run may abort on is
//!   [`SurveyorError::SpecNotFound`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Surveyor operations.
#[derive(Debug, Error)]
pub enum SurveyorError {
    /// The project has no specification document. Running checks against an
    /// uninitialized project is a usage error, not a data error.
    #[error("No specification found at {path}")]
    SpecNotFound { path: PathBuf },

    /// Failed to read the specification document.
    #[error("Failed to read specification at {path}: {message}")]
    SpecReadError { path: PathBuf, message: String },

    /// Invalid check definition structure or values.
    #[error("Invalid check definition: {message}")]
    DefinitionError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for Surveyor operations.
pub type Result<T> = std::result::Result<T, SurveyorError>;
