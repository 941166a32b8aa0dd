//! The plugin check engine.
//!
//! Declaratively-configured static assertions ("checks") are loaded from the
//! project's check directory, evaluated against the project tree under a
//! per-check deadline, and reported as a uniform PASS/FAIL list.
//!
//! # Architecture
//!
//! - [`definition`] - The tagged-union check schema
//! - [`loader`] - Best-effort definition discovery with an injectable
//!   diagnostic sink
//! - [`runners`] - One pure evaluation function per check kind
//! - [`jsonpath`] - Minimal JSONPath evaluation for `JsonPathAssertion`
//! - [`timeout`] - Deadline guard with cooperative cancellation
//! - [`engine`] - Sequential orchestration and per-check failure isolation
//! - [`report`] - Result types and the reportable projection

pub mod definition;
pub mod engine;
pub mod jsonpath;
pub mod loader;
pub mod report;
pub mod runners;
pub mod timeout;

pub use definition::{CheckDefinition, CheckKind, CombineMode};
pub use engine::{run_checks, run_definitions, EngineOptions};
pub use loader::{load_definitions, CollectingSink, DiagnosticSink, TracingSink};
pub use report::{to_reportable, CheckResult, CheckStatus, Reportable};
pub use timeout::{run_with_deadline, CancelToken, DeadlineError, DEFAULT_CHECK_TIMEOUT};
