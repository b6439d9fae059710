//! Subcommand implementations.
//!
//! Each subcommand has an Args struct for its command-line arguments and a
//! run function. Lists files are JSON objects mapping list names to arrays
//! of candidate records (`{"fruit": [{"name": "Apple", ...}, ...]}`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use crate::cli::{Cli, Commands};
use crate::config::{Config, MatchConfig};
use crate::engine::Candidate;
use crate::error::{Error, Result};
use crate::registry::{ListRegistry, ListSelector};

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// What the user has typed so far
    pub query: String,

    /// JSON file mapping list names to candidate arrays
    #[arg(long, short = 'f')]
    pub file: PathBuf,

    /// List to search (repeatable); defaults to every list in the file
    #[arg(long = "list", short = 'l')]
    pub lists: Vec<String>,

    /// Keep only the top N results
    #[arg(long)]
    pub limit: Option<usize>,

    /// Override the match threshold (0.0 = exact only, 1.0 = very loose)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Override the match distance factor (0 = exact location only)
    #[arg(long)]
    pub distance: Option<u32>,
}

#[derive(Args, Debug)]
pub struct ListsArgs {
    /// JSON file mapping list names to candidate arrays
    #[arg(long, short = 'f')]
    pub file: PathBuf,
}

/// Dispatch the parsed command.
pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Query(args) => run_query(cli, args),
        Commands::Lists(args) => run_lists(cli, args),
    }
}

fn run_query(cli: &Cli, args: &QueryArgs) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(threshold) = args.threshold {
        config.matching.threshold = threshold;
    }
    if let Some(distance) = args.distance {
        config.matching.distance = distance;
    }
    if args.limit.is_some() {
        config.query.limit = args.limit;
    }
    config.validate()?;

    let registry = load_registry(&args.file, config.matching)?;
    let name_refs: Vec<&str> = args.lists.iter().map(String::as_str).collect();
    let selector = if name_refs.is_empty() {
        ListSelector::All
    } else {
        // The registry signals unknown lists with a sentinel; at the CLI
        // boundary a named-but-missing list deserves a real error message.
        for name in &name_refs {
            if registry.candidates(name).is_none() {
                return Err(Error::Config(format!(
                    "list '{name}' is not present in {}",
                    args.file.display()
                )));
            }
        }
        ListSelector::Many(&name_refs)
    };

    let Some(mut matches) = registry.query(selector, &args.query)? else {
        // Empty query: expected state, nothing to rank.
        if cli.machine {
            println!("[]");
        } else if !cli.quiet {
            eprintln!("nothing to match: empty query");
        }
        return Ok(());
    };

    if let Some(limit) = config.query.limit {
        matches.truncate(limit);
    }
    info!(matched = matches.len(), "query complete");

    if cli.machine {
        println!("{}", serde_json::to_string(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        println!("no matches");
        return Ok(());
    }
    for (rank, m) in matches.iter().enumerate() {
        let shown = if config.query.highlight {
            &m.highlighted
        } else {
            &m.name
        };
        println!("{:>3}. {:>4}  {shown}", rank + 1, m.match_score);
    }
    Ok(())
}

fn run_lists(cli: &Cli, args: &ListsArgs) -> Result<()> {
    let lists = read_lists_file(&args.file)?;

    if cli.machine {
        let counts: BTreeMap<&str, usize> = lists
            .iter()
            .map(|(name, data)| (name.as_str(), data.len()))
            .collect();
        println!("{}", serde_json::to_string(&counts)?);
        return Ok(());
    }

    for (name, data) in &lists {
        println!("{name}: {} candidates", data.len());
    }
    Ok(())
}

fn read_lists_file(path: &Path) -> Result<BTreeMap<String, Vec<Candidate>>> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| Error::Config(format!("read lists file {}: {err}", path.display())))?;
    let lists = serde_json::from_str(&raw)
        .map_err(|err| Error::Config(format!("parse lists file {}: {err}", path.display())))?;
    Ok(lists)
}

fn load_registry(path: &Path, config: MatchConfig) -> Result<ListRegistry> {
    let lists = read_lists_file(path)?;
    let mut registry = ListRegistry::new(config);
    for (name, data) in lists {
        if !registry.add_list(&name, data) {
            return Err(Error::Config(format!(
                "list name '{name}' is reserved for the all-lists selector"
            )));
        }
    }
    Ok(registry)
}
