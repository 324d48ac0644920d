// mdscrub/src/lib.rs
//! # mdscrub CLI
//!
//! File-level plumbing around `mdscrub-core`: command-line parsing, file
//! discovery, the batch runner with its dry-run, output-directory and in-place
//! modes, and console reporting.

pub mod batch;
pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;

pub use batch::{BatchOptions, BatchReport, FileReport, FileStatus, OutputMode};
