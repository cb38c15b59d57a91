//! Trailing-edge debouncer for raw input events.
//!
//! One persistent task per debouncer. Every pushed value restarts the quiet
//! window; when the window elapses without a new value, the last value is
//! committed. Cancelling drops whatever is pending.

use std::time::Duration;

use log::trace;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Coalesces bursts of values into a single trailing commit.
#[derive(Debug)]
pub struct Debouncer<T> {
    tx: mpsc::UnboundedSender<T>,
    cancel: CancellationToken,
    task: JoinHandle<()>,
    window: Duration,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the debounce task on `handle`.
    ///
    /// `commit` runs on the debounce task with the last value of each burst.
    pub fn spawn<F>(handle: &Handle, window: Duration, commit: F) -> Self
    where
        F: Fn(T) + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<T>();
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let task = handle.spawn(async move {
            let mut pending: Option<T> = None;
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        if pending.is_some() {
                            trace!("debounce cancelled with a pending commit");
                        }
                        break;
                    }
                    next = rx.recv() => match next {
                        Some(value) => pending = Some(value),
                        None => break,
                    },
                    _ = tokio::time::sleep(window), if pending.is_some() => {
                        if let Some(value) = pending.take() {
                            trace!("debounce window elapsed, committing");
                            commit(value);
                        }
                    }
                }
            }
        });

        Self {
            tx,
            cancel,
            task,
            window,
        }
    }
}

impl<T> Debouncer<T> {
    /// Feed a raw value. Restarts the quiet window.
    ///
    /// Values pushed after cancellation are dropped.
    pub fn push(&self, value: T) {
        if self.cancel.is_cancelled() {
            return;
        }
        let _ = self.tx.send(value);
    }

    /// Stop the task. A pending commit never fires.
    pub fn cancel(&self) {
        self.cancel.cancel();
        self.task.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        self.cancel();
    }
}
