use clap::Args;

use crate::input::{data_arg, hex_arg, InputError};

#[derive(Args, Debug, Clone)]
pub struct Verify {
    /// 64 byte signature as hex
    #[arg(long)]
    pub signature: String,

    /// 32 byte public key as hex
    #[arg(long)]
    pub public_key: String,

    /// Treat MESSAGE as hex instead of UTF-8 text
    #[arg(long)]
    pub hex: bool,

    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("verification failed: {0}")]
    Worker(#[from] common::Error),
}

#[async_trait::async_trait]
impl crate::op::Op for Verify {
    type Error = VerifyError;
    type Output = bool;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let signature = hex_arg(&self.signature, "signature")?;
        let public_key = hex_arg(&self.public_key, "public key")?;
        let message = data_arg(&self.message, self.hex, "message")?;
        Ok(ctx.thread.verify(message, signature, public_key).await?)
    }
}
