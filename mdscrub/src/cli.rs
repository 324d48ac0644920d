// mdscrub/src/cli.rs
//! This file defines the command-line interface (CLI) for the mdscrub
//! application.

use clap::Parser;
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "mdscrub",
    version = env!("CARGO_PKG_VERSION"),
    about = "Prepare markdown files for external publication by removing PII",
    long_about = "mdscrub strips personal data from markdown documentation before it is published. \
It removes denylisted keys from YAML frontmatter, deletes internal-only comments, substitutes \
email addresses with a generic contact and redacts phone numbers, SSNs, card numbers, IP \
addresses and personal IDs according to a YAML rule set.",
    after_help = "Examples:\n  mdscrub docs/ cleaned_docs/                  Process docs/ and save to cleaned_docs/\n  mdscrub docs/ -i                             Process docs/ in place (creates .bak backups)\n  mdscrub docs/ output/ --pattern '*.mdx'      Process .mdx files\n  mdscrub docs/ output/ --dry-run --diff       Show what would change\n  mdscrub docs/ output/ --contact help@company.com"
)]
pub struct Cli {
    /// Input directory containing markdown files.
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Output directory (required unless using --in-place).
    #[arg(
        value_name = "OUTPUT_DIR",
        required_unless_present = "in_place",
        conflicts_with = "in_place"
    )]
    pub output_dir: Option<PathBuf>,

    /// Modify files in place, keeping a `.bak` copy of each original.
    #[arg(long, short = 'i')]
    pub in_place: bool,

    /// Glob matched against file names.
    #[arg(long, value_name = "GLOB", default_value = "*.md")]
    pub pattern: String,

    /// Only process files directly inside INPUT_DIR.
    #[arg(long = "no-recursive")]
    pub no_recursive: bool,

    /// Generic contact that replaces email addresses.
    #[arg(long, value_name = "EMAIL", env = "MDSCRUB_CONTACT")]
    pub contact: Option<String>,

    /// Path to a rules YAML file (built-in defaults are used otherwise).
    #[arg(long, value_name = "FILE", env = "MDSCRUB_RULES")]
    pub rules: Option<PathBuf>,

    /// Show what would change without writing anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// With --dry-run, print a unified diff for every changed file.
    #[arg(long, requires = "dry_run")]
    pub diff: bool,

    /// Print the batch report as JSON on stdout instead of the console summary.
    #[arg(long)]
    pub json: bool,

    /// Verbose output (debug logging, per-pattern counts).
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Only print errors.
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    pub quiet: bool,
}
