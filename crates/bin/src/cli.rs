//! CLI argument definitions for the formstate binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Inspect form models against declarative rule sets
#[derive(Parser, Debug)]
#[command(name = "formstate")]
#[command(about = "formstate: path-addressed form state and validation")]
#[command(version)]
pub struct Cli {
    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true, env = "FORMSTATE_JSON")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a model against a rule set; exits non-zero when invalid
    Check(CheckArgs),
    /// List the paths a rule set validates in a model
    Paths(CheckArgs),
    /// Write or delete a value at a path and print the new model
    Set(SetArgs),
}

/// Model and rule set inputs shared by `check` and `paths`
#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// JSON file holding the model
    #[arg(short, long, env = "FORMSTATE_MODEL")]
    pub model: PathBuf,

    /// JSON file holding the declarative rule set
    #[arg(short, long, env = "FORMSTATE_RULES")]
    pub rules: PathBuf,
}

/// Arguments for the set command
#[derive(clap::Args, Debug)]
pub struct SetArgs {
    /// JSON file holding the model
    #[arg(short, long, env = "FORMSTATE_MODEL")]
    pub model: PathBuf,

    /// Target path, e.g. `address.street` or `items[0]`
    #[arg(short, long)]
    pub path: String,

    /// JSON value to write
    #[arg(short, long, required_unless_present = "delete", conflicts_with = "delete")]
    pub value: Option<String>,

    /// Remove the entry instead of writing
    #[arg(long)]
    pub delete: bool,

    /// Fail when the path does not already exist
    #[arg(long)]
    pub strict: bool,
}
