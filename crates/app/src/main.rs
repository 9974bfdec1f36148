mod args;
mod config;
mod input;
mod logging;
mod op;
mod ops;

use args::Args;
use clap::{Parser, Subcommand};
use op::Op;
use ops::{Delay, Digest, Keypair, Sign, Verify, Version};

command_enum! {
    (Delay, Delay),
    (Digest, Digest),
    (Keypair, Keypair),
    (Sign, Sign),
    (Verify, Verify),
    (Version, Version),
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match config::AppConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let log_level = match args.log_level.map_or_else(|| config.level(), Ok) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let guard = logging::init_logging(log_level);

    let ctx = match op::OpContext::new(config.worker) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: Failed to start worker thread: {}", e);
            std::process::exit(1);
        }
    };

    let code = match args.command.execute(&ctx).await {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    // join the worker and flush logs before exiting
    ctx.thread.close();
    drop(guard);
    std::process::exit(code);
}
