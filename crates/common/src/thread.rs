//! The caller-facing handle owning one worker thread.

use std::sync::Arc;
use std::thread::{self, JoinHandle, ThreadId};
use std::time::Duration;

use parking_lot::Mutex;

use crate::config::WorkerConfig;
use crate::crypto::{KeyMaterial, Signature};
use crate::error::{Error, Result};
use crate::future::TaskFuture;
use crate::queue::{Rejected, TaskQueue};
use crate::task::Task;
use crate::worker::{self, WorkerState};

/// A handle on a dedicated worker thread
///
/// Tasks submitted through one handle run one at a time, in submission
///  order, and their completions fire in that same order. Every submitted
///  task is resolved exactly once:
///
/// - a task accepted before [`close`](Self::close) runs to completion
///   (close drains the queue before the worker exits)
/// - a task submitted after close is resolved immediately, on the calling
///   thread, with [`Error::QueueClosed`] (or the worker's fault, once it
///   has faulted)
///
/// Completions run on the worker thread. Use the async variants
///  ([`sign`](Self::sign), [`digest`](Self::digest), ...) to get the result
///  back on the awaiting task instead.
///
/// Dropping the handle closes it and joins the worker.
///
/// # Examples
///
/// ```ignore
/// let thread = ThreadHandle::new()?;
/// let pair = common::crypto::derive_keypair(&seed)?;
///
/// let signature = thread.sign(b"hello".to_vec(), &pair).await?;
/// let valid = thread
///     .verify(b"hello".to_vec(), signature.to_bytes(), pair.public_key.to_bytes())
///     .await?;
/// assert!(valid);
///
/// thread.close();
/// ```
#[derive(Debug)]
pub struct ThreadHandle {
    queue: Arc<TaskQueue>,
    state: Arc<WorkerState>,
    worker: Mutex<Option<JoinHandle<()>>>,
    worker_id: ThreadId,
    /// Held by the closer that is joining, so concurrent closers wait too
    joining: Mutex<()>,
}

impl ThreadHandle {
    /// Start a worker with the default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(WorkerConfig::default())
    }

    pub fn with_config(config: WorkerConfig) -> Result<Self> {
        let queue = Arc::new(TaskQueue::new(config.max_queue_size));
        let state = Arc::new(WorkerState::default());
        let worker = worker::spawn(&config, queue.clone(), state.clone()).map_err(|e| {
            Error::WorkerUnavailable(format!("failed to spawn worker thread: {e}"))
        })?;
        tracing::debug!(thread = %config.thread_name, "spawned worker thread");

        Ok(Self {
            queue,
            state,
            worker_id: worker.thread().id(),
            worker: Mutex::new(Some(worker)),
            joining: Mutex::new(()),
        })
    }

    /// Submit a task. Never blocks.
    ///
    /// If the task cannot be accepted its completion is invoked right away,
    ///  on the calling thread, with the reason.
    pub fn submit(&self, task: Task) {
        if let Some(error) = self.unavailable() {
            self.reject(Rejected { task, error });
            return;
        }

        self.state.begin();
        if let Err(rejected) = self.queue.enqueue(task) {
            self.state.finish();
            self.reject(rejected);
        }
    }

    pub fn submit_delay(
        &self,
        duration: Duration,
        completion: impl FnOnce(Result<()>) + Send + 'static,
    ) {
        self.submit(Task::Delay {
            duration,
            completion: Box::new(completion),
        });
    }

    pub fn delay_by_millis(&self, millis: u64, completion: impl FnOnce(Result<()>) + Send + 'static) {
        self.submit_delay(Duration::from_millis(millis), completion);
    }

    pub fn delay_by_secs(&self, secs: u64, completion: impl FnOnce(Result<()>) + Send + 'static) {
        self.submit_delay(Duration::from_secs(secs), completion);
    }

    pub fn delay_by_mins(&self, mins: u64, completion: impl FnOnce(Result<()>) + Send + 'static) {
        self.submit_delay(Duration::from_secs(mins.saturating_mul(60)), completion);
    }

    pub fn delay_by_hours(&self, hours: u64, completion: impl FnOnce(Result<()>) + Send + 'static) {
        self.submit_delay(Duration::from_secs(hours.saturating_mul(3600)), completion);
    }

    pub fn submit_sign(
        &self,
        message: impl Into<Vec<u8>>,
        key: impl Into<KeyMaterial>,
        completion: impl FnOnce(Result<Signature>) + Send + 'static,
    ) {
        self.submit(Task::Sign {
            message: message.into(),
            key: key.into(),
            completion: Box::new(completion),
        });
    }

    pub fn submit_verify(
        &self,
        message: impl Into<Vec<u8>>,
        signature: impl Into<Vec<u8>>,
        public_key: impl Into<Vec<u8>>,
        completion: impl FnOnce(Result<bool>) + Send + 'static,
    ) {
        self.submit(Task::Verify {
            message: message.into(),
            signature: signature.into(),
            public_key: public_key.into(),
            completion: Box::new(completion),
        });
    }

    /// Submit a SHA-2 digest. `bits` must be 224, 384 or 512; anything else
    ///  resolves with [`Error::InvalidVariant`].
    pub fn submit_digest(
        &self,
        bits: u16,
        data: impl Into<Vec<u8>>,
        completion: impl FnOnce(Result<Vec<u8>>) + Send + 'static,
    ) {
        self.submit(Task::Digest {
            bits,
            data: data.into(),
            completion: Box::new(completion),
        });
    }

    pub fn delay(&self, duration: Duration) -> TaskFuture<()> {
        let (completion, future) = TaskFuture::pair();
        self.submit_delay(duration, completion);
        future
    }

    pub fn sign(
        &self,
        message: impl Into<Vec<u8>>,
        key: impl Into<KeyMaterial>,
    ) -> TaskFuture<Signature> {
        let (completion, future) = TaskFuture::pair();
        self.submit_sign(message, key, completion);
        future
    }

    pub fn verify(
        &self,
        message: impl Into<Vec<u8>>,
        signature: impl Into<Vec<u8>>,
        public_key: impl Into<Vec<u8>>,
    ) -> TaskFuture<bool> {
        let (completion, future) = TaskFuture::pair();
        self.submit_verify(message, signature, public_key, completion);
        future
    }

    pub fn digest(&self, bits: u16, data: impl Into<Vec<u8>>) -> TaskFuture<Vec<u8>> {
        let (completion, future) = TaskFuture::pair();
        self.submit_digest(bits, data, completion);
        future
    }

    /// Tasks queued but not yet picked up by the worker. A snapshot.
    pub fn num_of_tasks(&self) -> usize {
        self.queue.len()
    }

    /// True while the worker thread is alive and has accepted work that
    ///  is not resolved yet (queued or executing).
    pub fn is_running(&self) -> bool {
        let alive = self
            .worker
            .lock()
            .as_ref()
            .is_some_and(|worker| !worker.is_finished());
        alive && self.state.outstanding() > 0
    }

    /// True until [`close`](Self::close) is called.
    pub fn is_open(&self) -> bool {
        !self.queue.is_closed()
    }

    /// Stop accepting tasks, let the worker drain the queue, and join it.
    ///
    /// Idempotent. When called from inside a completion (on the worker
    ///  itself) it only stops intake; the worker keeps draining and the
    ///  next close from any other thread, or the drop of the handle, joins it.
    pub fn close(&self) {
        if self.queue.close() {
            tracing::info!(pending = self.queue.len(), "closing worker thread");
        }

        if thread::current().id() == self.worker_id {
            tracing::debug!("close called from the worker thread, not joining");
            return;
        }

        let _joining = self.joining.lock();
        let Some(worker) = self.worker.lock().take() else {
            return;
        };
        if worker.join().is_err() {
            tracing::error!("worker thread panicked");
        }
    }

    fn unavailable(&self) -> Option<Error> {
        if let Some(fault) = self.state.fault() {
            return Some(fault);
        }
        if self.queue.is_closed() {
            return Some(Error::QueueClosed);
        }
        let exited = self
            .worker
            .lock()
            .as_ref()
            .map_or(true, |worker| worker.is_finished());
        exited.then(|| Error::WorkerUnavailable("worker thread has exited".into()))
    }

    fn reject(&self, Rejected { task, error }: Rejected) {
        tracing::warn!(task = %task.kind(), "rejecting task: {}", error);
        if let Err(e) = task.fail(error) {
            tracing::error!("completion failed while rejecting task: {}", e);
        }
    }
}

impl Drop for ThreadHandle {
    fn drop(&mut self) {
        self.close();
    }
}
