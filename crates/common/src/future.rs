//! Future-style facade over task completions.
//!
//! A [`TaskFuture`] is just the receiving end of a oneshot whose sender is
//!  wrapped into an ordinary completion callback, so tasks submitted this
//!  way travel the exact same path as callback submissions.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use futures::FutureExt;

use crate::error::{Error, Result};
use crate::task::Completion;

/// Resolves to a task's result once the worker has delivered it
#[derive(Debug)]
#[must_use = "a TaskFuture does nothing unless awaited"]
pub struct TaskFuture<T> {
    rx: oneshot::Receiver<Result<T>>,
}

impl<T: Send + 'static> TaskFuture<T> {
    /// Create a completion and the future it resolves.
    pub(crate) fn pair() -> (Completion<T>, Self) {
        let (tx, rx) = oneshot::channel();
        let completion: Completion<T> = Box::new(move |result| {
            // the caller may have dropped the future; that's fine
            let _ = tx.send(result);
        });
        (completion, Self { rx })
    }

    /// Block the current thread until the result arrives.
    pub fn wait(self) -> Result<T> {
        futures::executor::block_on(self)
    }
}

impl<T> Future for TaskFuture<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.rx.poll_unpin(cx).map(|received| match received {
            Ok(result) => result,
            Err(oneshot::Canceled) => Err(Error::WorkerUnavailable(
                "task dropped before completing".into(),
            )),
        })
    }
}
