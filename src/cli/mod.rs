//! CLI module - command-line interface definitions and handlers.
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod commands;

/// Typeahead - fuzzy substring ranking for interactive autocomplete
#[derive(Parser, Debug)]
#[command(name = "typeahead")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Machine-readable JSON output
    #[arg(long, short = 'm', global = true)]
    pub machine: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file path (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank candidates from one or more lists against a query
    Query(commands::QueryArgs),
    /// Show the lists available in a lists file
    Lists(commands::ListsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn query_args_parse() {
        let cli = Cli::try_parse_from([
            "typeahead", "query", "app", "--file", "lists.json", "--list", "fruit", "--limit", "5",
        ])
        .unwrap();
        let Commands::Query(args) = cli.command else {
            panic!("expected query subcommand");
        };
        assert_eq!(args.query, "app");
        assert_eq!(args.lists, vec!["fruit"]);
        assert_eq!(args.limit, Some(5));
    }

    #[test]
    fn machine_flag_is_global() {
        let cli =
            Cli::try_parse_from(["typeahead", "query", "app", "--file", "x.json", "-m"]).unwrap();
        assert!(cli.machine);
    }
}
