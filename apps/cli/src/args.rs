//! Command line arguments.
//!
//! ```text
//! retail <dbname> <port> <user> [--host H] [--password P]
//! retail --database-url sqlite://shop.db?mode=rwc
//! ```

use std::path::PathBuf;

use clap::Parser;
use retail_db::{DbConfig, DbError};

use crate::config::Settings;
use crate::error::CliResult;

/// Retail store ordering terminal.
#[derive(Debug, Parser)]
#[command(name = "retail", author, version, about, long_about = None)]
pub struct Args {
    /// Database name
    #[arg(required_unless_present = "database_url")]
    pub dbname: Option<String>,

    /// Database port
    #[arg(required_unless_present = "database_url")]
    pub port: Option<u16>,

    /// Database user
    #[arg(required_unless_present = "database_url")]
    pub user: Option<String>,

    /// Database host
    #[arg(long, env = "RETAIL_DB_HOST", default_value = "localhost")]
    pub host: String,

    /// Database password
    #[arg(long, env = "RETAIL_DB_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Full connection URL; replaces dbname, port and user
    #[arg(long, env = "RETAIL_DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Don't apply the embedded schema migrations
    #[arg(long)]
    pub no_migrate: bool,

    /// Settings file (default: retail.toml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Connection settings for these arguments.
    pub fn db_config(&self, settings: &Settings) -> CliResult<DbConfig> {
        let config = match (&self.database_url, &self.dbname, self.port, &self.user) {
            (Some(url), _, _, _) => DbConfig::new(url.as_str()),
            (None, Some(dbname), Some(port), Some(user)) => {
                DbConfig::postgres(&self.host, port, dbname, user, &self.password)?
            }
            _ => {
                return Err(DbError::ConnectionFailed(
                    "dbname, port and user are required without --database-url".to_string(),
                )
                .into())
            }
        };

        Ok(config.run_migrations(settings.run_migrations && !self.no_migrate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positionals_build_postgres_url() {
        let args = Args::try_parse_from(["retail", "shop", "5432", "alice"]).unwrap();
        let config = args.db_config(&Settings::default()).unwrap();

        assert_eq!(config.database_url, "postgres://alice@localhost:5432/shop");
        assert!(config.run_migrations);
    }

    #[test]
    fn test_database_url_replaces_positionals() {
        let args =
            Args::try_parse_from(["retail", "--database-url", "sqlite::memory:", "--no-migrate"])
                .unwrap();
        let config = args.db_config(&Settings::default()).unwrap();

        assert_eq!(config.database_url, "sqlite::memory:");
        assert!(!config.run_migrations);
    }

    #[test]
    fn test_positionals_required() {
        assert!(Args::try_parse_from(["retail", "shop"]).is_err());
        assert!(Args::try_parse_from(["retail", "shop", "not-a-port", "alice"]).is_err());
    }
}
