//! Command-line interface for spaceport.
//!
//! This module provides the argument structure for the `spaceport` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::logging::Verbosity;

/// spaceport - Track spaceflight companies, rockets and launches
///
/// Serves a JSON API under /api and HTML listing pages backed by a single
/// `SQLite` file, which is created if it doesn't exist.
#[derive(Debug, Parser)]
#[command(name = "spaceport")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the `SQLite` database file
    #[arg(value_name = "DATABASE")]
    pub database: PathBuf,

    /// Path to custom configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Address to listen on (overrides `server.bind`)
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Don't insert reference rows into empty tables
    #[arg(long)]
    pub no_seed: bool,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }

    /// Apply command-line overrides on top of loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(bind) = &self.bind {
            config.server.bind.clone_from(bind);
        }
        if self.no_seed {
            config.storage.seed = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
        assert_eq!(Cli::command().get_name(), "spaceport");
    }

    #[test]
    fn test_parse_database() {
        let cli = parse(&["spaceport", "launches.db"]);
        assert_eq!(cli.database, PathBuf::from("launches.db"));
        assert!(cli.config.is_none());
        assert!(cli.bind.is_none());
        assert!(!cli.no_seed);
    }

    #[test]
    fn test_database_is_required() {
        assert!(Cli::try_parse_from(["spaceport"]).is_err());
    }

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(parse(&["spaceport", "db"]).verbosity(), Verbosity::Normal);
        assert_eq!(parse(&["spaceport", "-v", "db"]).verbosity(), Verbosity::Verbose);
        assert_eq!(parse(&["spaceport", "-vv", "db"]).verbosity(), Verbosity::Trace);
        assert_eq!(parse(&["spaceport", "-q", "db"]).verbosity(), Verbosity::Quiet);
    }

    #[test]
    fn test_parse_with_config() {
        let cli = parse(&["spaceport", "-c", "/custom/config.toml", "db"]);
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_overrides() {
        let cli = parse(&["spaceport", "--bind", "127.0.0.1:3000", "--no-seed", "db"]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert!(!config.storage.seed);
    }

    #[test]
    fn test_bind_override_repairs_file_value() {
        let cli = parse(&["spaceport", "-b", "127.0.0.1:3000", "db"]);
        let mut config = Config::default();
        config.server.bind = "localhost".to_string();
        assert!(config.validate().is_err());

        cli.apply_overrides(&mut config);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let cli = parse(&["spaceport", "db"]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config, Config::default());
    }
}
