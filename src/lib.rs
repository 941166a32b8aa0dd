//! Surveyor - spec-driven project checks.
//!
//! Surveyor lets a project carry a small, versioned specification
//! (`.surveyor/spec.md`) together with declarative static assertions
//! (`.surveyor/checks/*.json`) that are evaluated against the project tree
//! and reported as a uniform PASS/FAIL list.
//!
//! # Modules
//!
//! - [`checks`] - Check definitions, runners, timeout guard, and the engine
//! - [`cli`] - Command-line interface and argument parsing
//! - [`error`] - Error types and result aliases
//! - [`spec`] - Specification document loading
//! - [`ui`] - Terminal output and status icons
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use surveyor::checks::{run_checks, EngineOptions, TracingSink};
//!
//! let results = run_checks(
//!     Path::new("."),
//!     &EngineOptions::default(),
//!     &TracingSink,
//! ).unwrap();
//! for result in &results {
//!     println!("{} {}", result.status, result.id);
//! }
//! ```

pub mod checks;
pub mod cli;
pub mod error;
pub mod spec;
pub mod ui;

pub use error::{Result, SurveyorError};
