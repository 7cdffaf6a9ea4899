//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Scan sources and regenerate the translation catalogs
//! - `init`: Write a default `.lingorc.json`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(args)) => args.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ExtractArgs {
    /// Files or directories to scan (overrides `includes` from the config file)
    pub paths: Vec<PathBuf>,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Skip paths matching this glob or path prefix (repeatable)
    #[arg(short, long = "exclude", value_name = "GLOB")]
    pub excludes: Vec<String>,

    /// Comma separated target locales, or `all`
    #[arg(short, long, value_name = "LIST", env = "LINGO_LOCALES")]
    pub locales: Option<String>,

    /// Discard existing translations instead of merging them
    #[arg(long)]
    pub overwrite: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan source files and write a catalog per locale next to them
    Extract(ExtractArgs),
    /// Initialize a new .lingorc.json configuration file
    Init,
}
