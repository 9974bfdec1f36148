//! Units of work executed by the worker thread.
//!
//! Each task owns its payload and a completion. The completion is a
//!  `FnOnce`, so it is consumed on delivery and can only ever fire once.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::time::Duration;

use crate::crypto::{self, KeyMaterial, Signature};
use crate::error::{Error, Result};

/// Callback receiving a task's result
pub type Completion<T> = Box<dyn FnOnce(Result<T>) + Send + 'static>;

/// Discriminant of a [`Task`], used for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Delay,
    Sign,
    Verify,
    Digest,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskKind::Delay => "delay",
            TaskKind::Sign => "sign",
            TaskKind::Verify => "verify",
            TaskKind::Digest => "digest",
        };
        f.write_str(name)
    }
}

/// A unit of work plus the completion its result is delivered to
pub enum Task {
    /// Sleep on the worker for `duration`
    Delay {
        duration: Duration,
        completion: Completion<()>,
    },
    /// Detached Ed25519 signature over `message`
    Sign {
        message: Vec<u8>,
        key: KeyMaterial,
        completion: Completion<Signature>,
    },
    /// Check a detached signature
    Verify {
        message: Vec<u8>,
        signature: Vec<u8>,
        public_key: Vec<u8>,
        completion: Completion<bool>,
    },
    /// SHA-2 digest; `bits` is validated when the task runs
    Digest {
        bits: u16,
        data: Vec<u8>,
        completion: Completion<Vec<u8>>,
    },
}

impl Task {
    pub fn kind(&self) -> TaskKind {
        match self {
            Task::Delay { .. } => TaskKind::Delay,
            Task::Sign { .. } => TaskKind::Sign,
            Task::Verify { .. } => TaskKind::Verify,
            Task::Digest { .. } => TaskKind::Digest,
        }
    }

    /// Run the task and deliver its result.
    ///
    /// Returns `Err(WorkerUnavailable)` if the work or the completion
    ///  panicked; the completion has still been invoked exactly once unless
    ///  it was the completion itself that panicked.
    pub(crate) fn execute(self) -> Result<()> {
        let kind = self.kind();
        match self {
            Task::Delay {
                duration,
                completion,
            } => run(kind, completion, || {
                std::thread::sleep(duration);
                Ok(())
            }),
            Task::Sign {
                message,
                key,
                completion,
            } => run(kind, completion, || crypto::sign(&message, &key)),
            Task::Verify {
                message,
                signature,
                public_key,
                completion,
            } => run(kind, completion, || {
                crypto::verify(&message, &signature, &public_key)
            }),
            Task::Digest {
                bits,
                data,
                completion,
            } => run(kind, completion, || crypto::digest(bits, &data)),
        }
    }

    /// Resolve the task with `error` without running it.
    pub(crate) fn fail(self, error: Error) -> Result<()> {
        let kind = self.kind();
        match self {
            Task::Delay { completion, .. } => deliver(kind, completion, Err(error)),
            Task::Sign { completion, .. } => deliver(kind, completion, Err(error)),
            Task::Verify { completion, .. } => deliver(kind, completion, Err(error)),
            Task::Digest { completion, .. } => deliver(kind, completion, Err(error)),
        }
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::Delay { duration, .. } => f
                .debug_struct("Delay")
                .field("duration", duration)
                .finish_non_exhaustive(),
            Task::Sign { message, key, .. } => f
                .debug_struct("Sign")
                .field("message_len", &message.len())
                .field("key", key)
                .finish_non_exhaustive(),
            Task::Verify { message, .. } => f
                .debug_struct("Verify")
                .field("message_len", &message.len())
                .finish_non_exhaustive(),
            Task::Digest { bits, data, .. } => f
                .debug_struct("Digest")
                .field("bits", bits)
                .field("data_len", &data.len())
                .finish_non_exhaustive(),
        }
    }
}

fn run<T>(kind: TaskKind, completion: Completion<T>, work: impl FnOnce() -> Result<T>) -> Result<()> {
    let (result, fault) = match panic::catch_unwind(AssertUnwindSafe(work)) {
        Ok(result) => (result, None),
        Err(payload) => {
            let error = Error::WorkerUnavailable(format!(
                "{kind} task panicked: {}",
                panic_message(payload.as_ref())
            ));
            (Err(error.clone()), Some(error))
        }
    };
    deliver(kind, completion, result)?;
    match fault {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

fn deliver<T>(kind: TaskKind, completion: Completion<T>, result: Result<T>) -> Result<()> {
    panic::catch_unwind(AssertUnwindSafe(move || completion(result))).map_err(|payload| {
        Error::WorkerUnavailable(format!(
            "{kind} completion panicked: {}",
            panic_message(payload.as_ref())
        ))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
