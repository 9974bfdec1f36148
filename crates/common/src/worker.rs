//! The dedicated worker thread
//!
//! Runs a single loop: block on the queue, execute one task, deliver its
//!  result, repeat. Tasks never run concurrently with each other. Once the
//!  queue is closed and drained the loop ends and the thread exits.
//!
//! A panic while executing a task or its completion marks the worker as
//!  faulted. From then on every remaining and newly queued task is resolved
//!  with [`Error::WorkerUnavailable`] instead of being run. If the loop
//!  itself unwinds, the queue is closed and whatever is still in it is
//!  failed the same way before the thread dies.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use crate::config::WorkerConfig;
use crate::error::Error;
use crate::queue::TaskQueue;

/// State shared between the handle and its worker
#[derive(Debug, Default)]
pub(crate) struct WorkerState {
    /// Accepted tasks that have not been resolved yet
    outstanding: AtomicUsize,
    fault: Mutex<Option<Error>>,
}

impl WorkerState {
    pub(crate) fn begin(&self) {
        self.outstanding.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn finish(&self) {
        self.outstanding.fetch_sub(1, Ordering::SeqCst);
    }

    pub(crate) fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }

    pub(crate) fn fault(&self) -> Option<Error> {
        self.fault.lock().clone()
    }

    fn set_fault(&self, error: Error) {
        let mut fault = self.fault.lock();
        if fault.is_none() {
            *fault = Some(error);
        }
    }
}

pub(crate) fn spawn(
    config: &WorkerConfig,
    queue: Arc<TaskQueue>,
    state: Arc<WorkerState>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(config.thread_name.clone())
        .spawn(move || run(&queue, &state))
}

/// Fails everything left in the queue if the worker loop unwinds
struct DrainOnPanic<'a> {
    queue: &'a TaskQueue,
    state: &'a WorkerState,
}

impl Drop for DrainOnPanic<'_> {
    fn drop(&mut self) {
        if !thread::panicking() {
            return;
        }
        let error = Error::WorkerUnavailable("worker thread died".into());
        self.state.set_fault(error.clone());
        self.queue.close();
        while let Some(task) = self.queue.try_dequeue() {
            let _ = task.fail(error.clone());
            self.state.finish();
        }
    }
}

fn run(queue: &TaskQueue, state: &WorkerState) {
    let _drain = DrainOnPanic { queue, state };
    tracing::info!("worker thread started");

    while let Some(task) = queue.dequeue_blocking() {
        let kind = task.kind();
        let outcome = match state.fault() {
            Some(error) => task.fail(error),
            None => {
                tracing::debug!(task = %kind, pending = queue.len(), "executing task");
                task.execute()
            }
        };
        if let Err(error) = outcome {
            tracing::error!(task = %kind, "worker fault: {}", error);
            state.set_fault(error);
        }
        state.finish();
        tracing::trace!(task = %kind, "task resolved");
    }

    tracing::info!("task queue closed and drained, worker thread exiting");
}
