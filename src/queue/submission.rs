//! Submission handle
//!
//! The future returned for every submitted operation. It is backed by a
//! one-shot channel that the executor completes exactly once.

use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use tokio::sync::oneshot;

/// Terminal outcome delivered through the channel.
pub(crate) enum Settled<T, E> {
    /// The operation returned, successfully or not
    Finished(Result<T, E>),
    /// The operation panicked; the payload is re-raised in the waiter
    Panicked(Box<dyn Any + Send + 'static>),
}

/// Pending outcome of a submitted operation.
///
/// Resolves to exactly what the operation produced: its value (possibly
/// served from the result cache) or its own error, unwrapped.
///
/// Dropping a `Submission` does not cancel the operation; it still runs and
/// still occupies its concurrency slot until it finishes.
///
/// # Panics
///
/// Polling panics if the operation itself panicked (the original payload is
/// resumed), or if the runtime shut down before the operation could settle.
#[must_use = "a submission does nothing observable unless awaited"]
pub struct Submission<T, E> {
    rx: oneshot::Receiver<Settled<T, E>>,
}

impl<T, E> Submission<T, E> {
    pub(crate) fn channel() -> (oneshot::Sender<Settled<T, E>>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { rx })
    }

    /// A submission that is already settled, used for cache hits.
    pub(crate) fn ready(result: Result<T, E>) -> Self {
        let (tx, submission) = Self::channel();
        // The receiver is alive in `submission`, so this cannot fail.
        let _ = tx.send(Settled::Finished(result));
        submission
    }
}

impl<T, E> Future for Submission<T, E> {
    type Output = Result<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match ready!(Pin::new(&mut this.rx).poll(cx)) {
            Ok(Settled::Finished(result)) => Poll::Ready(result),
            Ok(Settled::Panicked(payload)) => std::panic::resume_unwind(payload),
            Err(_) => panic!("operation was dropped before it settled (runtime shut down?)"),
        }
    }
}

impl<T, E> std::fmt::Debug for Submission<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Submission").finish_non_exhaustive()
    }
}
