use clap::Args;

use common::crypto::KeyMaterial;

use crate::input::{data_arg, hex_arg, InputError};

#[derive(Args, Debug, Clone)]
pub struct Sign {
    /// Signing key as hex: a 32 byte seed or a 64 byte private key
    #[arg(long)]
    pub key: String,

    /// Treat MESSAGE as hex instead of UTF-8 text
    #[arg(long)]
    pub hex: bool,

    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SignError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("signing failed: {0}")]
    Worker(#[from] common::Error),
}

#[async_trait::async_trait]
impl crate::op::Op for Sign {
    type Error = SignError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let key = KeyMaterial::from_bytes(hex_arg(&self.key, "key")?)?;
        let message = data_arg(&self.message, self.hex, "message")?;
        let signature = ctx.thread.sign(message, key).await?;
        Ok(hex::encode(signature.to_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use common::config::WorkerConfig;

    use super::*;
    use crate::op::{Op, OpContext};

    const SEED: &str = "af9881fe34edfd3463cf3e14e22ad95a0608967e084d3ca1fc57be023040de59";

    #[tokio::test]
    async fn test_sign_with_seed() {
        let ctx = OpContext::new(WorkerConfig::default()).unwrap();
        let op = Sign {
            key: SEED.to_string(),
            hex: false,
            message: "test".to_string(),
        };
        assert_eq!(
            op.execute(&ctx).await.unwrap(),
            "98c8351675ade54b3aedc14f0b9c40b47569d9da191db066312ed6423d20dff8\
             a52988f869fc3fbf4402971034b387ac7fbcfa704eb4c1e86e48e15de5e3d206"
        );
    }

    #[tokio::test]
    async fn test_sign_rejects_short_key() {
        let ctx = OpContext::new(WorkerConfig::default()).unwrap();
        let op = Sign {
            key: "abcd".to_string(),
            hex: false,
            message: "test".to_string(),
        };
        assert!(matches!(op.execute(&ctx).await, Err(SignError::Worker(_))));
    }
}
