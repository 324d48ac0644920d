// mdscrub/src/commands/prep.rs
//! The `mdscrub` command: discover files, sanitize them, report.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use mdscrub_core::{EngineOptions, MarkdownEngine, RuleSet};

use crate::batch::{run_batch, BatchOptions, BatchReport, FileStatus, OutputMode};
use crate::cli::Cli;
use crate::ui::{diff_viewer, output_format, summary};
use crate::utils::discovery::{discover_files, DiscoveryOptions};

/// Resolved options for one run.
#[derive(Debug, Clone)]
pub struct PrepOptions {
    pub input_dir: PathBuf,
    pub output: OutputMode,
    pub pattern: String,
    pub recursive: bool,
    pub contact: Option<String>,
    pub rules: Option<PathBuf>,
    pub dry_run: bool,
    pub diff: bool,
    pub json: bool,
    pub verbose: bool,
    pub quiet: bool,
}

impl From<Cli> for PrepOptions {
    fn from(cli: Cli) -> Self {
        let output = match cli.output_dir {
            Some(dir) if !cli.in_place => OutputMode::Directory(dir),
            _ => OutputMode::InPlace,
        };
        Self {
            input_dir: cli.input_dir,
            output,
            pattern: cli.pattern,
            recursive: !cli.no_recursive,
            contact: cli.contact,
            rules: cli.rules,
            dry_run: cli.dry_run,
            diff: cli.diff,
            json: cli.json,
            verbose: cli.verbose,
            quiet: cli.quiet,
        }
    }
}

/// Helper for printing info messages to stderr.
pub fn info_msg(msg: impl AsRef<str>) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), supports_color);
}

/// Helper for printing warning messages to stderr.
pub fn warn_msg(msg: impl AsRef<str>) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), supports_color);
}

/// Helper for printing error messages to stderr.
pub fn error_msg(msg: impl AsRef<str>) {
    let supports_color = io::stderr().is_terminal();
    let _ = output_format::print_error_message(&mut io::stderr(), msg.as_ref(), supports_color);
}

/// Runs the whole pipeline and returns the batch report.
///
/// Errors are reserved for problems that stop the run before any file is
/// touched: unusable rules, a missing input directory, an invalid glob.
/// Per-file failures are reported in the returned `BatchReport`.
pub fn run_prep(opts: &PrepOptions) -> Result<BatchReport> {
    info!("Starting mdscrub run on {}", opts.input_dir.display());

    let rules = RuleSet::load(opts.rules.as_deref()).context("Failed to load rules")?;
    debug!("Loaded {} body pattern(s).", rules.pattern_count());
    if let Some(contact) = opts.contact.as_deref().filter(|c| !c.contains('@')) {
        if !opts.quiet {
            warn_msg(format!("Contact '{}' does not look like an email address", contact));
        }
    }
    let engine = MarkdownEngine::with_options(
        Arc::new(rules),
        EngineOptions { contact_override: opts.contact.clone() },
    );

    let exclude = match &opts.output {
        OutputMode::Directory(dir) => Some(dir.clone()),
        OutputMode::InPlace => None,
    };
    let discovery = DiscoveryOptions { pattern: opts.pattern.clone(), recursive: opts.recursive, exclude };
    let files = discover_files(&opts.input_dir, &discovery)?;

    if files.is_empty() && !opts.quiet && !opts.json {
        info_msg(format!(
            "No files matching '{}' found in {}",
            opts.pattern,
            opts.input_dir.display()
        ));
    }

    let batch_options = BatchOptions {
        input_root: opts.input_dir.clone(),
        output: opts.output.clone(),
        dry_run: opts.dry_run,
    };

    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    let mut writer = stdout.lock();
    let print_lines = !opts.quiet && !opts.json;

    let report = run_batch(&engine, &files, &batch_options, |file, preview| {
        if file.status == FileStatus::Failed {
            error_msg(format!(
                "Failed to process {}: {}",
                file.source.display(),
                file.error.as_deref().unwrap_or("unknown error")
            ));
            return;
        }
        if !print_lines {
            return;
        }
        let _ = summary::print_file_line(&mut writer, file, opts.dry_run, supports_color);
        if opts.verbose || opts.dry_run {
            let _ = summary::print_rule_counts(&mut writer, file, supports_color);
        }
        if let (true, Some(preview)) = (opts.diff, preview) {
            let label = file.source.display().to_string();
            let _ = diff_viewer::print_diff(preview.original, preview.sanitized, &label, &mut writer, supports_color);
        }
    });

    if opts.json {
        serde_json::to_writer_pretty(&mut writer, &report).context("Failed to write JSON report")?;
        writeln!(writer)?;
    } else if !opts.quiet && !files.is_empty() {
        summary::print_batch_totals(&mut writer, &report, supports_color)?;
    }
    writer.flush()?;

    info!("mdscrub run completed.");
    Ok(report)
}
