//! FIFO task queue shared between submitters and the worker
//!
//! A thin layer over a flume channel. Any number of threads can enqueue;
//!  only the worker dequeues. Closing drops the sender, after which the
//!  worker still receives everything already queued and then sees the
//!  channel disconnect.

use parking_lot::RwLock;

use crate::error::Error;
use crate::task::Task;

/// A task the queue refused, handed back so its completion can be resolved
#[derive(Debug)]
pub struct Rejected {
    pub task: Task,
    pub error: Error,
}

#[derive(Debug)]
pub struct TaskQueue {
    tx: RwLock<Option<flume::Sender<Task>>>,
    rx: flume::Receiver<Task>,
    capacity: Option<usize>,
}

impl TaskQueue {
    /// Create a queue. `capacity` of None means unbounded.
    pub fn new(capacity: Option<usize>) -> Self {
        let (tx, rx) = match capacity {
            Some(size) => {
                tracing::debug!("creating bounded task queue with size {}", size);
                flume::bounded(size)
            }
            None => flume::unbounded(),
        };
        Self {
            tx: RwLock::new(Some(tx)),
            rx,
            capacity,
        }
    }

    /// Append a task. Never blocks.
    pub fn enqueue(&self, task: Task) -> Result<(), Rejected> {
        let guard = self.tx.read();
        let Some(tx) = guard.as_ref() else {
            return Err(Rejected {
                task,
                error: Error::QueueClosed,
            });
        };
        tx.try_send(task).map_err(|e| match e {
            flume::TrySendError::Full(task) => Rejected {
                task,
                error: Error::QueueFull(self.capacity.unwrap_or_default()),
            },
            // we hold a receiver, so this only happens if the worker side is gone
            flume::TrySendError::Disconnected(task) => Rejected {
                task,
                error: Error::WorkerUnavailable("task queue disconnected".into()),
            },
        })
    }

    /// Block until a task is available, returning tasks in FIFO order.
    ///
    /// Returns None once the queue is closed and fully drained.
    pub fn dequeue_blocking(&self) -> Option<Task> {
        self.rx.recv().ok()
    }

    /// Take the next task without blocking, if there is one.
    pub fn try_dequeue(&self) -> Option<Task> {
        self.rx.try_recv().ok()
    }

    /// Number of tasks waiting to be dequeued. A snapshot; may be stale
    ///  by the time the caller looks at it.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Stop accepting tasks. Returns true if this call did the closing.
    pub fn close(&self) -> bool {
        self.tx.write().take().is_some()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.read().is_none()
    }
}
