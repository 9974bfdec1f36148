//! Error types for the worker thread and the crypto engines.

/// Errors that can be delivered to a task's completion or returned by the
///  synchronous crypto entry points.
///
/// A `false` verification result is never an error; only structurally
///  malformed input is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A byte argument has the wrong length
    #[error("invalid {what} length, expected {expected}, got {got}")]
    InvalidArgumentLength {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// Unsupported SHA-2 digest size
    #[error("unsupported digest size {0}, expected one of 224/384/512")]
    InvalidVariant(u16),

    /// Signing key bytes are malformed or inconsistent
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    /// Task submitted after the handle was closed
    #[error("task queue is closed")]
    QueueClosed,

    /// Bounded queue is at capacity
    #[error("task queue is full ({0} pending)")]
    QueueFull(usize),

    /// The worker thread faulted or could not be started
    #[error("worker unavailable: {0}")]
    WorkerUnavailable(String),
}

impl Error {
    pub(crate) fn length(what: &'static str, expected: usize, got: usize) -> Self {
        Error::InvalidArgumentLength {
            what,
            expected,
            got,
        }
    }
}

/// Result type alias for worker and crypto operations.
pub type Result<T> = std::result::Result<T, Error>;
