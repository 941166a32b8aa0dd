//! Per-check deadline enforcement.
//!
//! [`run_with_deadline`] executes one check on a worker thread and races its
//! result channel against a timer. When the deadline fires the guard trips a
//! [`CancelToken`], and runners poll that token at every I/O boundary so an
//! expired check stops doing work instead of grinding on in the background.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use thiserror::Error;

/// Default per-check deadline: 30 seconds.
pub const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_secs(30);

/// Cooperative cancellation flag shared between the guard and a runner.
///
/// Runners call [`CancelToken::is_cancelled`] before each file read and per
/// directory-walk entry, and bail out with a cancelled verdict when set.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Why a guarded operation produced no result.
#[derive(Debug, Error)]
pub enum DeadlineError {
    /// The deadline elapsed before the operation finished.
    #[error("Check '{label}' timed out after {timeout_ms}ms")]
    Timeout { label: String, timeout_ms: u128 },

    /// The operation's thread panicked.
    #[error("Check '{label}' aborted unexpectedly")]
    Panicked { label: String },
}

/// Run `op` under a deadline, handing it a cancellation token.
///
/// The operation runs on its own thread. If the deadline elapses first, the
/// token is tripped and a [`DeadlineError::Timeout`] carrying `label` is
/// returned; the worker thread is left to observe the token and wind down on
/// its own. A panic inside `op` surfaces as [`DeadlineError::Panicked`]
/// rather than propagating.
pub fn run_with_deadline<T, F>(
    label: &str,
    timeout: Duration,
    op: F,
) -> Result<T, DeadlineError>
where
    T: Send + 'static,
    F: FnOnce(CancelToken) -> T + Send + 'static,
{
    let token = CancelToken::new();
    let worker_token = token.clone();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        // A send failure means the guard already gave up waiting.
        let _ = tx.send(op(worker_token));
    });

    match rx.recv_timeout(timeout) {
        Ok(value) => Ok(value),
        Err(RecvTimeoutError::Timeout) => {
            token.cancel();
            Err(DeadlineError::Timeout {
                label: label.to_string(),
                timeout_ms: timeout.as_millis(),
            })
        }
        Err(RecvTimeoutError::Disconnected) => Err(DeadlineError::Panicked {
            label: label.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fast_operation_returns_value() {
        let result = run_with_deadline("fast", Duration::from_secs(5), |_| 42);
        assert_eq!(result.unwrap(), 42);
    }

    #[test]
    fn slow_operation_times_out_with_label() {
        let result = run_with_deadline("slow-check", Duration::from_millis(25), |_| {
            thread::sleep(Duration::from_millis(500));
            42
        });
        let err = result.unwrap_err();
        assert!(matches!(err, DeadlineError::Timeout { .. }));
        assert!(err.to_string().contains("slow-check"));
        assert!(err.to_string().contains("timed out"));
    }

    #[test]
    fn timeout_trips_the_cancel_token() {
        let (probe_tx, probe_rx) = mpsc::channel();
        let result = run_with_deadline("stall", Duration::from_millis(25), move |token| {
            // Hold the token past the deadline, then report its state.
            thread::sleep(Duration::from_millis(200));
            let _ = probe_tx.send(token.is_cancelled());
        });
        assert!(result.is_err());
        let cancelled = probe_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("worker should still run to completion");
        assert!(cancelled);
    }

    #[test]
    fn panicking_operation_is_contained() {
        let result: Result<(), _> =
            run_with_deadline("boom", Duration::from_secs(5), |_| panic!("inner panic"));
        let err = result.unwrap_err();
        assert!(matches!(err, DeadlineError::Panicked { .. }));
        assert!(err.to_string().contains("boom"));
    }

    #[test]
    fn token_starts_clear() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        token.cancel();
        assert!(token.is_cancelled());
    }
}
