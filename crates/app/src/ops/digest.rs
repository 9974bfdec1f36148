use clap::Args;

use crate::input::{data_arg, InputError};

#[derive(Args, Debug, Clone)]
pub struct Digest {
    /// SHA-2 output size: 224, 384 or 512
    #[arg(long, default_value_t = 512)]
    pub bits: u16,

    /// Treat DATA as hex instead of UTF-8 text
    #[arg(long)]
    pub hex: bool,

    pub data: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("digest failed: {0}")]
    Worker(#[from] common::Error),
}

#[async_trait::async_trait]
impl crate::op::Op for Digest {
    type Error = DigestError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let data = data_arg(&self.data, self.hex, "data")?;
        let digest = ctx.thread.digest(self.bits, data).await?;
        Ok(hex::encode(digest))
    }
}

#[cfg(test)]
mod tests {
    use common::config::WorkerConfig;

    use super::*;
    use crate::op::{Op, OpContext};

    #[tokio::test]
    async fn test_digest_abc_224() {
        let ctx = OpContext::new(WorkerConfig::default()).unwrap();
        let op = Digest {
            bits: 224,
            hex: false,
            data: "abc".to_string(),
        };
        assert_eq!(
            op.execute(&ctx).await.unwrap(),
            "23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7"
        );
    }

    #[tokio::test]
    async fn test_digest_unsupported_bits() {
        let ctx = OpContext::new(WorkerConfig::default()).unwrap();
        let op = Digest {
            bits: 256,
            hex: false,
            data: "abc".to_string(),
        };
        assert!(matches!(
            op.execute(&ctx).await,
            Err(DigestError::Worker(common::Error::InvalidVariant(256)))
        ));
    }
}
