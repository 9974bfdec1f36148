//! Shared fixtures for worker thread integration tests
#![allow(dead_code)]

use std::sync::Once;

use ::common::prelude::*;

/// Fixed Ed25519 vector: seed, derived public key, and the signature of
///  the ASCII message "test".
pub const SEED: &str = "af9881fe34edfd3463cf3e14e22ad95a0608967e084d3ca1fc57be023040de59";
pub const PRIVATE_KEY: &str = "af9881fe34edfd3463cf3e14e22ad95a0608967e084d3ca1fc57be023040de590c32c468980d40237f4e44a66dec3beb564b3e1394a4c6df1da2065e3afc1d81";
pub const PUBLIC_KEY: &str = "0c32c468980d40237f4e44a66dec3beb564b3e1394a4c6df1da2065e3afc1d81";
pub const MESSAGE: &[u8] = b"test";
pub const SIGNATURE: &str = "98c8351675ade54b3aedc14f0b9c40b47569d9da191db066312ed6423d20dff8a52988f869fc3fbf4402971034b387ac7fbcfa704eb4c1e86e48e15de5e3d206";

pub const ABC_SHA384: &str = "cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed8086072ba1e7cc2358baeca134c825a7";

static TRACING: Once = Once::new();

/// Install a test subscriber once per test binary (honours RUST_LOG)
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

pub fn bytes(hex: &str) -> Vec<u8> {
    hex::decode(hex).unwrap()
}

/// Start a fresh worker with tracing set up
pub fn setup_thread() -> ThreadHandle {
    init_tracing();
    ThreadHandle::new().unwrap()
}
