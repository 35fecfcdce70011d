//! # Retail Terminal Entry Point
//!
//! ```bash
//! retail shop 5432 alice
//! RETAIL_DB_PASSWORD=secret retail shop 5432 alice --host db.internal
//! retail --database-url "sqlite://retail_dev.db?mode=rwc"
//! ```
//!
//! The actual startup is in `lib.rs` for better testability.

use std::process::ExitCode;

use clap::Parser;
use retail_cli::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // .env is optional
    let _ = dotenvy::dotenv();

    let args = Args::parse();
    retail_cli::init_tracing();

    retail_cli::run(args).await
}
