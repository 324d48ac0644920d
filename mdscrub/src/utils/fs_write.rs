// mdscrub/src/utils/fs_write.rs
//! Crash-safe file replacement.
//!
//! Content is written to a hidden temporary sibling, synced, and renamed over
//! the destination, so a reader sees either the old or the new file and never
//! a partial one. The replacement carries the permissions of a template file
//! (or of the file it replaces), so a restricted source never yields a
//! world-readable copy.

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const TMP_SUFFIX: &str = ".mdscrub.tmp";
pub const BACKUP_SUFFIX: &str = ".bak";

/// Replaces `path` with `contents` atomically.
///
/// Permissions are taken from `permissions_from` when given, otherwise from
/// the existing `path`. A new file with no template keeps the default mode.
pub fn write_atomic(path: &Path, contents: &[u8], permissions_from: Option<&Path>) -> io::Result<()> {
    let permissions = match permissions_from {
        Some(template) => Some(fs::metadata(template)?.permissions()),
        None => fs::metadata(path).ok().map(|m| m.permissions()),
    };
    let tmp_path = tmp_sibling(path)?;
    let result = (|| -> io::Result<()> {
        let mut tmp = OpenOptions::new().create(true).write(true).truncate(true).open(&tmp_path)?;
        tmp.write_all(contents)?;
        tmp.flush()?;
        if let Some(permissions) = permissions {
            tmp.set_permissions(permissions)?;
        }
        tmp.sync_all()?;
        drop(tmp);
        fs::rename(&tmp_path, path)
    })();
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

/// `notes.md` -> `notes.md.bak`
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Writes `original` to the backup path of `path` with the permissions of
/// `path`, and confirms it landed before returning. An existing backup is
/// replaced.
pub fn write_backup(path: &Path, original: &[u8]) -> io::Result<PathBuf> {
    let backup = backup_path(path);
    write_atomic(&backup, original, Some(path))?;
    let written = fs::metadata(&backup)?.len();
    if written != original.len() as u64 {
        return Err(io::Error::other(format!(
            "backup {} has {} bytes, expected {}",
            backup.display(),
            written,
            original.len()
        )));
    }
    Ok(backup)
}

fn tmp_sibling(path: &Path) -> io::Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, format!("{} has no file name", path.display()))
    })?;
    let mut tmp_name = OsString::from(".");
    tmp_name.push(file_name);
    tmp_name.push(TMP_SUFFIX);
    Ok(path.with_file_name(tmp_name))
}
