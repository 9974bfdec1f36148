pub use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "threadobject")]
#[command(about = "Run Ed25519 and SHA-2 work on a dedicated worker thread")]
pub struct Args {
    /// Path to a TOML config file (log level and [worker] settings)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level, overrides the config file (RUST_LOG still wins)
    #[arg(long, global = true)]
    pub log_level: Option<tracing::Level>,

    #[command(subcommand)]
    pub command: crate::Command,
}
