use crate::report::RunReport;
use crate::types::{NormalizeError, RunConfig};
use chrono::{DateTime, Local};
use filetime::FileTime;
use log::{debug, warn};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// Lists every file and directory beneath the given roots, one root at a
/// time. The roots themselves are not yielded. Traversal order within a
/// root is whatever the underlying directory iteration produces; nothing
/// downstream depends on it.
///
/// Walk failures (unreadable root, entry gone mid-walk) come back as error
/// items in the sequence so the caller can record them without stopping.
pub fn enumerate(
    roots: &[PathBuf],
) -> impl Iterator<Item = walkdir::Result<walkdir::DirEntry>> + '_ {
    roots.iter().flat_map(|root| WalkDir::new(root).min_depth(1))
}

/// Rewrites one entry's timestamps to the oldest of its modified, accessed
/// and created stamps.
///
/// Copy and migration tools only ever push timestamps forward, so the
/// smallest of the three is the best surviving record of the entry's real
/// age. Birth time feeds into the minimum where the filesystem records one,
/// but only the modified and accessed stamps can be written back through
/// portable APIs.
pub fn normalize_entry(path: &Path, config: &RunConfig) -> Result<(), NormalizeError> {
    let meta = fs::symlink_metadata(path).map_err(NormalizeError::from_io)?;

    let target = oldest_timestamp(&meta).map_err(NormalizeError::from_io)?;
    debug!(
        "{}: oldest stamp {}",
        path.display(),
        DateTime::<Local>::from(target).format("%Y-%m-%d %H:%M:%S")
    );

    if config.clear_readonly && !meta.file_type().is_symlink() && meta.permissions().readonly() {
        warn!("{}: clearing write protection", path.display());
        make_writable(path, meta.permissions()).map_err(NormalizeError::from_io)?;
    }

    let stamp = FileTime::from_system_time(target);
    let result = if meta.file_type().is_symlink() {
        // Keep the link target untouched; only the link's own stamps move.
        filetime::set_symlink_file_times(path, stamp, stamp)
    } else {
        filetime::set_file_times(path, stamp, stamp)
    };
    result.map_err(NormalizeError::from_io)
}

fn oldest_timestamp(meta: &fs::Metadata) -> io::Result<SystemTime> {
    let mut oldest = meta.modified()?;
    let accessed = meta.accessed()?;
    if accessed < oldest {
        oldest = accessed;
    }
    // Not every filesystem records a birth time; skip it when absent.
    if let Ok(created) = meta.created()
        && created < oldest
    {
        oldest = created;
    }
    Ok(oldest)
}

#[cfg(unix)]
fn make_writable(path: &Path, perms: fs::Permissions) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(perms.mode() | 0o200))
}

#[cfg(not(unix))]
fn make_writable(path: &Path, mut perms: fs::Permissions) -> io::Result<()> {
    perms.set_readonly(false);
    fs::set_permissions(path, perms)
}

fn classify_walk_error(err: walkdir::Error) -> NormalizeError {
    let depth = err.depth();
    let io_err = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other("filesystem loop detected"));

    if depth == 0 {
        NormalizeError::RootInvalid(io_err)
    } else {
        NormalizeError::from_io(io_err)
    }
}

/// Drives the whole run: enumerate every entry under the configured roots
/// and normalize each one, strictly in sequence. A failed entry is recorded
/// and the loop moves on; nothing short-circuits the walk.
#[must_use]
pub fn run(config: &RunConfig) -> RunReport {
    let mut report = RunReport::default();

    for (index, item) in enumerate(&config.roots).enumerate() {
        if index % 50 == 0 {
            print!("\r  Normalizing entries: {}...", index + 1);
            io::stdout().flush().ok();
        }

        match item {
            Ok(entry) => {
                let path = entry.into_path();
                match normalize_entry(&path, config) {
                    Ok(()) => report.processed += 1,
                    Err(err) => report.record(path, err),
                }
            }
            Err(err) => {
                let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                report.record(path, classify_walk_error(err));
            }
        }
    }
    println!();

    report
}
