//! # retail-cli: Terminal for the Retail Store
//!
//! Library half of the `retail` binary. `main.rs` only parses arguments
//! and calls [`run`]; everything else lives here so the menus can be
//! tested against a scripted [`Console`](console::Console).
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Load settings ──── defaults, retail.toml, RETAIL_* env              │
//! │  2. Greeting                                                            │
//! │  3. Connect ────────── "Connecting to database..." / "Done"             │
//! │     • one pooled connection, migrations unless --no-migrate             │
//! │     • failure: error on stderr, exit code 1                             │
//! │  4. Menus ──────────── menu::run until exit or end of input             │
//! │  5. Disconnect ─────── "Disconnecting from database..." / "Bye !"       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod args;
pub mod config;
pub mod console;
pub mod error;
pub mod handlers;
pub mod menu;

use std::io::{self, Write};
use std::process::ExitCode;

use retail_db::Database;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub use args::Args;
pub use config::Settings;
pub use console::{Console, Terminal};
pub use error::{CliError, CliResult};
pub use handlers::Context;

const GREETING: &str = "\n\n*******************************************************\n              User Interface      \t               \n*******************************************************\n";

/// Runs the terminal with parsed arguments.
///
/// ## Returns
/// Failure only when settings can't be loaded or the first connection
/// fails. Leaving through the menu, or closing stdin, is a success.
pub async fn run(args: Args) -> ExitCode {
    let settings = match Settings::load(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error - {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{GREETING}");

    let db = match connect(&args, &settings).await {
        Ok(db) => db,
        Err(e) => {
            eprintln!("Error - Unable to Connect to Database: {e}");
            println!("Make sure you started postgres on this machine");
            return ExitCode::FAILURE;
        }
    };

    let mut ctx = Context::new(db, Console::stdio(), settings);
    if let Err(e) = menu::run(&mut ctx).await {
        error!(error = %e, "Terminal closed unexpectedly");
    }

    println!("Disconnecting from database...");
    ctx.db.close().await;
    println!("Done\n\nBye !");

    ExitCode::SUCCESS
}

async fn connect(args: &Args, settings: &Settings) -> CliResult<Database> {
    let config = args.db_config(settings)?;

    print!("Connecting to database...");
    let _ = io::stdout().flush();
    let db = Database::new(config).await?;
    println!("Done");

    info!(backend = %db.backend(), "Connected");
    Ok(db)
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so they never mix with the menus.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every query
/// - `RUST_LOG=retail_db=trace` - Trace the database layer only
/// - Default: WARN
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
