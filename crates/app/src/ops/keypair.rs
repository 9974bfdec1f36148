use clap::Args;

use common::crypto::{KeyPair, Seed};

use crate::input::{hex_arg, InputError};

#[derive(Args, Debug, Clone)]
pub struct Keypair {
    /// 32 byte seed as hex. A random seed is used when omitted
    pub seed: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum KeypairError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("keypair derivation failed: {0}")]
    Derive(#[from] common::Error),
    #[error("failed to encode keypair: {0}")]
    Encode(#[from] serde_json::Error),
}

#[async_trait::async_trait]
impl crate::op::Op for Keypair {
    type Error = KeypairError;
    type Output = String;

    // derivation is cheap and synchronous, no need for the worker
    async fn execute(&self, _ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let pair = match &self.seed {
            Some(seed) => common::derive_keypair_sync(&hex_arg(seed, "seed")?)?,
            None => KeyPair::derive(&Seed::generate()),
        };
        Ok(serde_json::to_string_pretty(&pair)?)
    }
}
