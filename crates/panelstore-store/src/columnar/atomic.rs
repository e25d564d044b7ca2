//! Atomic replace primitive
//!
//! Writes go to a sibling `<name>.tmp` file which is synced and then renamed
//! over the target, so readers see either the old file or the new one.

use crate::errors::{io_error, Result};
use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Sibling temp path used while replacing `target`
pub(crate) fn temp_path(target: &Path) -> PathBuf {
    let mut name = target
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("snapshot"));
    name.push(".tmp");
    target.with_file_name(name)
}

/// Atomically replace `target` with whatever `write` produces
///
/// The temp file is removed if `write` fails. A crash before the rename
/// leaves a stray `.tmp` file next to the untouched target.
pub(crate) fn atomic_replace<F>(target: &Path, write: F) -> Result<()>
where
    F: FnOnce(File) -> Result<File>,
{
    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| io_error("create_snapshot_dir", parent, e))?;
        }
    }

    let temp = temp_path(target);
    let file = File::create(&temp).map_err(|e| io_error("create_snapshot_temp", &temp, e))?;

    let written = write(file).and_then(|file| {
        file.sync_all()
            .map_err(|e| io_error("sync_snapshot_temp", &temp, e))
    });
    if let Err(err) = written {
        let _ = fs::remove_file(&temp);
        return Err(err);
    }

    fs::rename(&temp, target).map_err(|e| io_error("rename_snapshot_temp", target, e))
}
