//! Enforces the per-query wall-clock deadline without blocking the caller and without a
//! process-global signal handler. A dedicated worker thread runs the
//! computation; the caller waits on a channel with a timeout and never waits past the deadline,
//! regardless of whether the worker notices its cancellation flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Runs `f` on a separate thread and waits at most `deadline` for it to finish. `f` receives a
/// shared cancellation flag it MAY poll cooperatively to stop early; it is never forcibly killed.
///
/// Returns `Some(result)` if the worker finished in time, `None` on timeout — in which case the
/// flag is set so an honest worker winds down, but the function returns immediately either way.
pub fn run_with_deadline<T, F>(deadline: Duration, f: F) -> Option<T>
where
    T: Send + 'static,
    F: FnOnce(&AtomicBool) -> T + Send + 'static,
{
    let cancelled = Arc::new(AtomicBool::new(false));
    let worker_flag = Arc::clone(&cancelled);
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let result = f(&worker_flag);
        // The receiver may already be gone (deadline fired); a dropped send is not an error.
        let _ = tx.send(result);
    });

    match rx.recv_timeout(deadline) {
        Ok(result) => Some(result),
        Err(_) => {
            cancelled.store(true, Ordering::Relaxed);
            None
        }
    }
}
