use std::path::{Path, PathBuf};

use crate::paths::{AppDataPaths, FILE_PREFIX, TEMP_FILE_EXT};
use crate::Result;

/// Outcome of an instance-file cleanup pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Instance files removed because their session stamp was foreign.
    pub removed: Vec<PathBuf>,
    /// Instance files kept because they belong to the current session.
    pub kept: usize,
}

/// Every managed (`gantry_`-prefixed) file under `root`, sorted by name.
///
/// Takes a bare directory so callers that only want to look do not need a
/// host version.
pub fn list_managed_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.starts_with(&format!("{FILE_PREFIX}_")) {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

impl AppDataPaths {
    /// Every managed file currently under this root, sorted by name.
    pub fn list_data_files(&self) -> Result<Vec<PathBuf>> {
        list_managed_files(&self.root)
    }

    /// Remove instance files stamped by sessions other than the current one.
    ///
    /// Instance files encode the stamping session in their name
    /// (`gantry_<ver>_<session>_<id>.tmp`); a stamp that is not ours means the
    /// session that wrote the file is gone and the file is stale. The host
    /// runs this once at session start. Universal and data files are never
    /// touched.
    pub fn cleanup_instance_files(&self) -> Result<CleanupReport> {
        let mut report = CleanupReport::default();
        for path in self.list_data_files()? {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(stamp) = instance_session_stamp(name, &self.host_version) else {
                continue;
            };
            if stamp == self.session_id {
                report.kept += 1;
                continue;
            }
            match std::fs::remove_file(&path) {
                Ok(()) => {
                    log::debug!("removed stale instance file {}", path.display());
                    report.removed.push(path);
                }
                Err(err) => {
                    // Another session may be cleaning concurrently; a vanished
                    // file is not a failure.
                    if err.kind() != std::io::ErrorKind::NotFound {
                        return Err(err.into());
                    }
                }
            }
        }
        Ok(report)
    }
}

/// Parse the session stamp out of an instance file name, or `None` when the
/// name does not follow the instance scheme for this host version.
fn instance_session_stamp(file_name: &str, host_version: &str) -> Option<u32> {
    let rest = file_name.strip_prefix(&format!("{FILE_PREFIX}_{host_version}_"))?;
    let (stamp, rest) = rest.split_once('_')?;
    if rest.is_empty() || !rest.ends_with(&format!(".{TEMP_FILE_EXT}")) {
        return None;
    }
    stamp.parse().ok()
}
