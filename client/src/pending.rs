//! Single-resolution handle for an in-flight call.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::task::{AbortHandle, JoinError, JoinHandle};
use transport::{Result, RpcError};

type SuccessCallback<T> = Box<dyn FnOnce(&T) + Send + 'static>;
type FailureCallback = Box<dyn FnOnce(&RpcError) + Send + 'static>;

enum State<T> {
    Running(JoinHandle<Result<T>>),
    Ready(Result<T>),
    Settled,
}

/// The outcome of one remote call, settled exactly once.
///
/// A `PendingCall` is a [`Future`] resolving to `Result<T, RpcError>`.
/// Optional callbacks registered with [`on_success`](Self::on_success) and
/// [`on_failure`](Self::on_failure) run once, when the outcome is known:
/// by awaiting the handle, by [`detach`](Self::detach)ing it, or after the
/// handle is dropped with callbacks still pending. A dropped handle hands
/// the callbacks to a background task, which requires a tokio runtime;
/// without one they are discarded with a warning.
///
/// The request itself runs on its own tokio task and proceeds whether or
/// not the handle is polled. [`abort`](Self::abort) cancels it; the handle
/// then settles with [`RpcError::Aborted`].
#[must_use = "a dropped PendingCall still runs; await it to observe the outcome"]
pub struct PendingCall<T: Send + 'static> {
    state: State<T>,
    on_success: Option<SuccessCallback<T>>,
    on_failure: Option<FailureCallback>,
}

// `T` is never pinned in place; it is only moved out of a finished task.
impl<T: Send + 'static> Unpin for PendingCall<T> {}

impl<T: Send + 'static> PendingCall<T> {
    /// Wraps a spawned call task.
    pub(crate) fn spawned(handle: JoinHandle<Result<T>>) -> Self {
        Self { state: State::Running(handle), on_success: None, on_failure: None }
    }

    /// A call that failed before any request was issued.
    pub fn failed(error: RpcError) -> Self {
        Self { state: State::Ready(Err(error)), on_success: None, on_failure: None }
    }

    /// Registers the callback run with the decoded value on success.
    pub fn on_success<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&T) + Send + 'static,
    {
        self.on_success = Some(Box::new(callback));
        self
    }

    /// Registers the callback run with the error on failure.
    pub fn on_failure<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&RpcError) + Send + 'static,
    {
        self.on_failure = Some(Box::new(callback));
        self
    }

    /// Handle that cancels the underlying task, if one is still attached.
    pub fn abort_handle(&self) -> Option<AbortHandle> {
        match &self.state {
            State::Running(handle) => Some(handle.abort_handle()),
            State::Ready(_) | State::Settled => None,
        }
    }

    /// Cancels the underlying task. No-op once the call has settled.
    pub fn abort(&self) {
        if let State::Running(handle) = &self.state {
            handle.abort();
        }
    }

    /// Whether the outcome is available without waiting.
    pub fn is_finished(&self) -> bool {
        match &self.state {
            State::Running(handle) => handle.is_finished(),
            State::Ready(_) | State::Settled => true,
        }
    }

    fn settle(&mut self, outcome: &Result<T>) {
        run_callbacks(outcome, self.on_success.take(), self.on_failure.take());
    }

    fn has_callbacks(&self) -> bool { self.on_success.is_some() || self.on_failure.is_some() }

    /// Drives the call in the background so that the callbacks fire without
    /// the caller awaiting the handle.
    ///
    /// Must be called from within a tokio runtime.
    pub fn detach(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let _ = self.await;
        })
    }
}

fn run_callbacks<T>(
    outcome: &Result<T>,
    on_success: Option<SuccessCallback<T>>,
    on_failure: Option<FailureCallback>,
) {
    match outcome {
        Ok(value) => {
            if let Some(callback) = on_success {
                callback(value);
            }
        }
        Err(error) => {
            if let Some(callback) = on_failure {
                callback(error);
            }
        }
    }
}

fn join_error(err: JoinError) -> RpcError {
    if err.is_cancelled() {
        RpcError::Aborted("call was aborted".to_string())
    } else {
        RpcError::Aborted(format!("call task failed: {}", err))
    }
}

impl<T: Send + 'static> Future for PendingCall<T> {
    type Output = Result<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let outcome = match std::mem::replace(&mut this.state, State::Settled) {
            State::Running(mut handle) => match Pin::new(&mut handle).poll(cx) {
                Poll::Ready(joined) => joined.unwrap_or_else(|e| Err(join_error(e))),
                Poll::Pending => {
                    this.state = State::Running(handle);
                    return Poll::Pending;
                }
            },
            State::Ready(outcome) => outcome,
            State::Settled => {
                return Poll::Ready(Err(RpcError::Aborted("call already settled".to_string())))
            }
        };
        this.settle(&outcome);
        Poll::Ready(outcome)
    }
}

impl<T: Send + 'static> Drop for PendingCall<T> {
    fn drop(&mut self) {
        if !self.has_callbacks() || std::thread::panicking() {
            return;
        }
        match std::mem::replace(&mut self.state, State::Settled) {
            State::Running(handle) => {
                let Ok(runtime) = tokio::runtime::Handle::try_current() else {
                    tracing::warn!(
                        "PendingCall dropped outside a tokio runtime; callbacks discarded"
                    );
                    return;
                };
                let (on_success, on_failure) = (self.on_success.take(), self.on_failure.take());
                runtime.spawn(async move {
                    let outcome = handle.await.unwrap_or_else(|e| Err(join_error(e)));
                    run_callbacks(&outcome, on_success, on_failure);
                });
            }
            State::Ready(outcome) => self.settle(&outcome),
            State::Settled => {}
        }
    }
}

impl<T: Send + 'static> fmt::Debug for PendingCall<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            State::Running(_) => "running",
            State::Ready(_) => "ready",
            State::Settled => "settled",
        };
        f.debug_struct("PendingCall")
            .field("state", &state)
            .field("on_success", &self.on_success.is_some())
            .field("on_failure", &self.on_failure.is_some())
            .finish()
    }
}
