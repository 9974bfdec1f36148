use std::time::{Duration, Instant};

use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct Delay {
    /// How long the worker should sleep, in milliseconds
    pub millis: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum DelayError {
    #[error("delay failed: {0}")]
    Worker(#[from] common::Error),
}

#[async_trait::async_trait]
impl crate::op::Op for Delay {
    type Error = DelayError;
    type Output = String;

    async fn execute(&self, ctx: &crate::op::OpContext) -> Result<Self::Output, Self::Error> {
        let start = Instant::now();
        ctx.thread.delay(Duration::from_millis(self.millis)).await?;
        Ok(format!("waited {}ms", start.elapsed().as_millis()))
    }
}
