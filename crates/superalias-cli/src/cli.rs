use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "superalias",
    about = "SuperAlias — keep note aliases in sync with frontmatter fields",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Settings file (defaults to the vault's plugin data file)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fold configured fields into every note's aliases
    Sync(SyncArgs),
    /// Show which notes a link name resolves to
    Lookup(LookupArgs),
    /// Show or set the keys to be aliased
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct SyncArgs {
    pub vault: PathBuf,
    /// Write updated frontmatter back to the notes
    #[arg(long)]
    pub write: bool,
    /// Comma-separated keys for this run only
    #[arg(long)]
    pub keys: Option<String>,
}

#[derive(Args)]
pub struct LookupArgs {
    pub vault: PathBuf,
    pub name: String,
}

#[derive(Args)]
pub struct ConfigArgs {
    pub vault: PathBuf,
    pub value: Option<String>,
}
