/**
 * Worker configuration, deserialisable from
 *  whatever config file the embedding app uses.
 */
pub mod config;
/**
 * Cryptographic engines run by the worker.
 *  - SHA-2 224/384/512 digests
 *  - Ed25519 keypair derivation, signing, verification
 */
pub mod crypto;
pub mod error;
/**
 * Future-style results for submitted tasks,
 *  layered over the completion callbacks.
 */
pub mod future;
/**
 * FIFO queue carrying tasks from submitters
 *  to the worker thread.
 */
pub mod queue;
pub mod task;
/**
 * The handle that owns a worker thread and
 *  accepts task submissions.
 */
pub mod thread;
mod worker;

pub use error::{Error, Result};

/// Synchronous crypto entry points; these bypass the worker entirely.
pub use crypto::{derive_keypair as derive_keypair_sync, sign as sign_sync, verify as verify_sync};

pub mod prelude {
    pub use crate::config::WorkerConfig;
    pub use crate::crypto::{KeyMaterial, KeyPair, PublicKey, Seed, ShaVariant, Signature};
    pub use crate::error::{Error, Result};
    pub use crate::future::TaskFuture;
    pub use crate::thread::ThreadHandle;
}
