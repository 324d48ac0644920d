// mdscrub/src/batch.rs
//! Applies a `SanitizationEngine` to a list of files.
//!
//! Every file is handled independently: a file that cannot be read, parsed
//! or written is recorded as failed and the batch moves on. In dry-run mode
//! nothing is created, written or renamed. In-place mode writes a `.bak`
//! copy of the original bytes and confirms it before touching the original.

use log::{debug, error, info, warn};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use mdscrub_core::redaction_match::total_occurrences;
use mdscrub_core::{MdscrubError, RedactionSummaryItem, SanitizationEngine, SanitizedDocument};

use crate::utils::fs_write::{write_atomic, write_backup};

/// Where sanitized files go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Mirror the input tree under this directory.
    Directory(PathBuf),
    /// Overwrite each source, keeping a `.bak` copy.
    InPlace,
}

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub input_root: PathBuf,
    pub output: OutputMode,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Changed,
    Unchanged,
    Failed,
}

/// Outcome for one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub source: PathBuf,
    pub destination: Option<PathBuf>,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub summary: Vec<RedactionSummaryItem>,
    /// The sanitized text. Only kept for real runs.
    #[serde(skip)]
    pub output_text: Option<String>,
}

/// Original and sanitized text of a file, handed to the batch observer.
#[derive(Debug, Clone, Copy)]
pub struct Preview<'a> {
    pub original: &'a str,
    pub sanitized: &'a str,
}

/// Aggregate of a batch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    dry_run: bool,
    succeeded: usize,
    failed: usize,
    changed: usize,
    files: Vec<FileReport>,
}

impl BatchReport {
    fn new(dry_run: bool) -> Self {
        Self { dry_run, ..Default::default() }
    }

    fn push(&mut self, report: FileReport) {
        match report.status {
            FileStatus::Failed => self.failed += 1,
            FileStatus::Changed => {
                self.succeeded += 1;
                self.changed += 1;
            }
            FileStatus::Unchanged => self.succeeded += 1,
        }
        self.files.push(report);
    }

    pub fn files(&self) -> &[FileReport] {
        &self.files
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn changed(&self) -> usize {
        self.changed
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// True when no file failed.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

struct Processed {
    destination: PathBuf,
    original: String,
    document: SanitizedDocument,
}

/// Sanitizes `files` in order and returns the aggregate report.
///
/// `observer` is called once per file, right after it was handled, with its
/// report and, when sanitization succeeded, the before/after texts.
pub fn run_batch<F>(
    engine: &dyn SanitizationEngine,
    files: &[PathBuf],
    options: &BatchOptions,
    mut observer: F,
) -> BatchReport
where
    F: FnMut(&FileReport, Option<Preview<'_>>),
{
    let mut batch = BatchReport::new(options.dry_run);
    info!("Processing {} file(s) from {}", files.len(), options.input_root.display());

    for path in files {
        match process_file(engine, path, options) {
            Ok(processed) => {
                let status = if processed.document.changed { FileStatus::Changed } else { FileStatus::Unchanged };
                let report = FileReport {
                    source: path.clone(),
                    destination: Some(processed.destination),
                    status,
                    error: None,
                    summary: processed.document.summary,
                    output_text: None,
                };
                observer(
                    &report,
                    Some(Preview { original: &processed.original, sanitized: &processed.document.output_text }),
                );
                let report = FileReport {
                    output_text: (!options.dry_run).then_some(processed.document.output_text),
                    ..report
                };
                batch.push(report);
            }
            Err(e) => {
                if e.is_file_local() {
                    warn!("Failed to process {}: {}", path.display(), e);
                } else {
                    error!("Failed to process {}: {}", path.display(), e);
                }
                let report = FileReport {
                    source: path.clone(),
                    destination: None,
                    status: FileStatus::Failed,
                    error: Some(e.to_string()),
                    summary: Vec::new(),
                    output_text: None,
                };
                observer(&report, None);
                batch.push(report);
            }
        }
    }

    info!(
        "Batch finished: {} succeeded ({} changed), {} failed.",
        batch.succeeded, batch.changed, batch.failed
    );
    batch
}

/// Where the sanitized version of `path` is written.
pub fn destination_for(path: &Path, options: &BatchOptions) -> PathBuf {
    match &options.output {
        OutputMode::InPlace => path.to_path_buf(),
        OutputMode::Directory(out_root) => match path.strip_prefix(&options.input_root) {
            Ok(relative) => out_root.join(relative),
            Err(_) => out_root.join(path.file_name().unwrap_or(path.as_os_str())),
        },
    }
}

fn source_id(path: &Path, input_root: &Path) -> String {
    path.strip_prefix(input_root).unwrap_or(path).display().to_string()
}

fn process_file(
    engine: &dyn SanitizationEngine,
    path: &Path,
    options: &BatchOptions,
) -> Result<Processed, MdscrubError> {
    let source_id = source_id(path, &options.input_root);
    let bytes = fs::read(path).map_err(|e| MdscrubError::io(path, e))?;
    let original = String::from_utf8(bytes)
        .map_err(|e| MdscrubError::io(path, io::Error::new(io::ErrorKind::InvalidData, e)))?;

    let document = engine.sanitize(&original, &source_id)?;
    debug!("[{}] {} redaction(s).", source_id, total_occurrences(&document.summary));
    let destination = destination_for(path, options);

    if options.dry_run {
        debug!("[{}] Dry run, changed={}", source_id, document.changed);
        return Ok(Processed { destination, original, document });
    }

    match &options.output {
        OutputMode::Directory(_) => {
            if let Some(parent) = destination.parent() {
                fs::create_dir_all(parent).map_err(|e| MdscrubError::io(parent, e))?;
            }
            write_atomic(&destination, document.output_text.as_bytes(), Some(path))
                .map_err(|e| MdscrubError::io(&destination, e))?;
        }
        OutputMode::InPlace => {
            let backup = write_backup(path, original.as_bytes()).map_err(|e| MdscrubError::io(path, e))?;
            debug!("[{}] Backup written to {}", source_id, backup.display());
            if document.changed {
                write_atomic(path, document.output_text.as_bytes(), None).map_err(|e| MdscrubError::io(path, e))?;
            }
        }
    }
    info!("[{}] Written to {}", source_id, destination.display());

    Ok(Processed { destination, original, document })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdscrub_core::{MarkdownEngine, RuleSet};
    use std::sync::Arc;
    use tempfile::tempdir;

    fn engine() -> MarkdownEngine {
        MarkdownEngine::new(Arc::new(RuleSet::defaults().unwrap()))
    }

    fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_destination_mirrors_relative_path() {
        let options = BatchOptions {
            input_root: PathBuf::from("docs"),
            output: OutputMode::Directory(PathBuf::from("out")),
            dry_run: false,
        };
        assert_eq!(destination_for(Path::new("docs/guide/a.md"), &options), PathBuf::from("out/guide/a.md"));

        let in_place = BatchOptions { output: OutputMode::InPlace, ..options };
        assert_eq!(destination_for(Path::new("docs/a.md"), &in_place), PathBuf::from("docs/a.md"));
    }

    #[test_log::test]
    fn test_output_directory_mode_writes_every_file() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let dirty = write(input.path(), "guide/a.md", "Mail a@b.com\n");
        let clean = write(input.path(), "b.md", "Nothing here\n");

        let options = BatchOptions {
            input_root: input.path().to_path_buf(),
            output: OutputMode::Directory(output.path().to_path_buf()),
            dry_run: false,
        };
        let report = run_batch(&engine(), &[clean, dirty.clone()], &options, |_, _| {});

        assert!(report.is_success());
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.changed(), 1);
        assert_eq!(fs::read_to_string(output.path().join("guide/a.md")).unwrap(), "Mail contact@example.com\n");
        assert_eq!(fs::read_to_string(output.path().join("b.md")).unwrap(), "Nothing here\n");
        assert_eq!(fs::read_to_string(&dirty).unwrap(), "Mail a@b.com\n");
    }

    #[test_log::test]
    fn test_in_place_mode_backs_up_original() {
        let input = tempdir().unwrap();
        let original = "---\nauthor: Jane\ntitle: T\n---\nSSN 123-45-6789\n";
        let path = write(input.path(), "a.md", original);

        let options = BatchOptions {
            input_root: input.path().to_path_buf(),
            output: OutputMode::InPlace,
            dry_run: false,
        };
        let report = run_batch(&engine(), &[path.clone()], &options, |_, _| {});

        assert_eq!(report.changed(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "---\ntitle: T\n---\nSSN [REDACTED]\n");
        assert_eq!(fs::read_to_string(input.path().join("a.md.bak")).unwrap(), original);
        assert_eq!(report.files()[0].output_text.as_deref(), Some("---\ntitle: T\n---\nSSN [REDACTED]\n"));
    }

    #[cfg(unix)]
    #[test_log::test]
    fn test_in_place_mode_keeps_restricted_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let input = tempdir().unwrap();
        let path = write(input.path(), "private.md", "---\nauthor: Jane\ntitle: T\n---\nBody\n");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();

        let options = BatchOptions {
            input_root: input.path().to_path_buf(),
            output: OutputMode::InPlace,
            dry_run: false,
        };
        let report = run_batch(&engine(), &[path.clone()], &options, |_, _| {});

        assert_eq!(report.changed(), 1);
        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), 0o600);
        assert_eq!(mode(&input.path().join("private.md.bak")), 0o600);
    }

    #[test_log::test]
    fn test_dry_run_touches_nothing() {
        let input = tempdir().unwrap();
        let path = write(input.path(), "a.md", "Call 555-123-4567\n");
        let out_root = input.path().join("out");

        for output in [OutputMode::InPlace, OutputMode::Directory(out_root.clone())] {
            let options = BatchOptions { input_root: input.path().to_path_buf(), output, dry_run: true };
            let mut previews = Vec::new();
            let report = run_batch(&engine(), &[path.clone()], &options, |_, preview| {
                previews.push(preview.map(|p| p.sanitized.to_string()));
            });
            assert_eq!(report.changed(), 1);
            assert!(report.files()[0].output_text.is_none());
            assert_eq!(previews, vec![Some("Call [REDACTED]\n".to_string())]);
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "Call 555-123-4567\n");
        assert!(!out_root.exists());
        assert_eq!(fs::read_dir(input.path()).unwrap().count(), 1);
    }

    #[test_log::test]
    fn test_failed_file_does_not_stop_the_batch() {
        let input = tempdir().unwrap();
        let output = tempdir().unwrap();
        let broken = write(input.path(), "a.md", "---\nkey: [unclosed\n---\nbody\n");
        let good = write(input.path(), "b.md", "fine\n");
        let missing = input.path().join("gone.md");

        let options = BatchOptions {
            input_root: input.path().to_path_buf(),
            output: OutputMode::Directory(output.path().to_path_buf()),
            dry_run: false,
        };
        let report = run_batch(&engine(), &[broken, good, missing], &options, |_, _| {});

        assert_eq!(report.failed(), 2);
        assert_eq!(report.succeeded(), 1);
        assert!(!report.is_success());
        assert_eq!(report.files()[0].status, FileStatus::Failed);
        assert!(report.files()[0].error.as_deref().unwrap().contains("a.md"));
        assert!(output.path().join("b.md").exists());
        assert!(!output.path().join("a.md").exists());
    }

    #[test]
    fn test_non_utf8_file_fails() {
        let input = tempdir().unwrap();
        let path = input.path().join("bin.md");
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        let options = BatchOptions {
            input_root: input.path().to_path_buf(),
            output: OutputMode::InPlace,
            dry_run: true,
        };
        let report = run_batch(&engine(), &[path], &options, |_, _| {});
        assert_eq!(report.failed(), 1);
    }
}
