//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use actiongen::ops::ResolveOptions;

/// actiongen - Generate GitHub Actions workflows for Swift packages
#[derive(Parser)]
#[command(name = "actiongen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Global config file (defaults to the user config directory)
    #[arg(long, global = true, env = "ACTIONGEN_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the workflow file and README badges
    Generate(GenerateArgs),

    /// Write the resolved settings to .actiongen.json
    InitConfig(InitConfigArgs),

    /// Show the resolved settings and the jobs they produce
    Show(ShowArgs),

    /// Validate .actiongen.json
    CheckConfig(CheckConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Where the package is and how to read its manifest.
#[derive(Args, Debug)]
pub struct PackageArgs {
    /// Package directory
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Read a `swift package dump-package` JSON file instead of running swift
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Give swift a temporary scratch directory
    #[arg(long)]
    pub isolated: bool,
}

impl PackageArgs {
    pub fn resolve_options(&self, config: Option<PathBuf>) -> ResolveOptions {
        ResolveOptions {
            manifest: self.manifest.clone(),
            isolated: self.isolated,
            config,
        }
    }
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub package: PackageArgs,

    /// Print the workflow instead of writing it
    #[arg(long)]
    pub stdout: bool,

    /// Don't touch README.md
    #[arg(long)]
    pub no_header: bool,
}

#[derive(Args, Debug)]
pub struct InitConfigArgs {
    #[command(flatten)]
    pub package: PackageArgs,

    /// Overwrite an existing .actiongen.json
    #[arg(long, short)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub package: PackageArgs,
}

#[derive(Args, Debug)]
pub struct CheckConfigArgs {
    /// Package directory
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
