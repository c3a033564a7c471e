use std::path::{Path, PathBuf};

use crate::{AppDataError, Result};

/// Directory under the platform data dir that holds all managed files.
pub const DATA_DIR_NAME: &str = "gantry";

/// Prefix shared by every managed file name.
pub const FILE_PREFIX: &str = "gantry";

/// Extension used by instance-lifetime files. Reserved: universal and data
/// files refuse it, even as the final segment of a compound extension, so a
/// data file can never masquerade as an instance file during cleanup.
pub const TEMP_FILE_EXT: &str = "tmp";

/// Builder for managed data-file paths.
///
/// Three naming schemes with different cleanup lifetimes:
///
/// | kind | name | lifetime |
/// |---|---|---|
/// | universal | `gantry_<id>.<ext>` | never cleaned, shared across host versions |
/// | data | `gantry_<ver>_<id>.<ext>` | survives host restarts, cleaned by scripts |
/// | instance | `gantry_<ver>_<session>_<id>.tmp` | purged when a new session runs cleanup |
///
/// The schemes differ in prefix, so identical `(id, ext)` inputs never alias
/// the same path across kinds. Builders only construct paths; no file is
/// created.
#[derive(Debug, Clone)]
pub struct AppDataPaths {
    pub(crate) root: PathBuf,
    pub(crate) host_version: String,
    pub(crate) session_id: u32,
}

impl AppDataPaths {
    /// Bind to `root`, creating the directory when absent. `host_version` is
    /// the CAD host's version string (e.g. `"2026"`); the session id defaults
    /// to the current process id.
    pub fn new(root: impl Into<PathBuf>, host_version: impl Into<String>) -> Result<Self> {
        let root = root.into();
        let host_version = host_version.into();
        validate_host_version(&host_version)?;
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            host_version,
            session_id: std::process::id(),
        })
    }

    /// Bind to the per-user data directory (`<platform data dir>/gantry`).
    pub fn discover(host_version: impl Into<String>) -> Result<Self> {
        let base = dirs::data_dir().ok_or(AppDataError::NoDataDir)?;
        Self::new(base.join(DATA_DIR_NAME), host_version)
    }

    /// Override the session stamp, for hosts that track sessions by something
    /// other than the process id (and for tests fabricating foreign sessions).
    #[must_use]
    pub fn with_session_id(mut self, session_id: u32) -> Self {
        self.session_id = session_id;
        self
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn host_version(&self) -> &str {
        &self.host_version
    }

    #[must_use]
    pub fn session_id(&self) -> u32 {
        self.session_id
    }

    /// Path for a file shared across all host versions and sessions. Never
    /// cleaned by the framework.
    pub fn universal_data_file(&self, file_id: &str, file_ext: &str) -> Result<PathBuf> {
        let ext = validate_ext(file_ext)?;
        let id = validate_file_id(file_id)?;
        Ok(self.root.join(format!("{FILE_PREFIX}_{id}.{ext}")))
    }

    /// Path for a host-version-stamped file. Survives host restarts; cleanup
    /// is the owning script's business.
    pub fn data_file(&self, file_id: &str, file_ext: &str) -> Result<PathBuf> {
        let ext = validate_ext(file_ext)?;
        let id = validate_file_id(file_id)?;
        Ok(self
            .root
            .join(format!("{FILE_PREFIX}_{}_{id}.{ext}", self.host_version)))
    }

    /// Path for a session-stamped file. Purged by `cleanup_instance_files`
    /// once the stamping session is gone.
    pub fn instance_data_file(&self, file_id: &str) -> Result<PathBuf> {
        let id = validate_file_id(file_id)?;
        Ok(self.root.join(format!(
            "{FILE_PREFIX}_{}_{}_{id}.{TEMP_FILE_EXT}",
            self.host_version, self.session_id
        )))
    }
}

fn validate_file_id(file_id: &str) -> Result<&str> {
    if file_id.is_empty()
        || file_id == ".."
        || file_id.contains(['/', '\\'])
        || file_id.contains(std::path::MAIN_SEPARATOR)
    {
        return Err(AppDataError::InvalidFileId(file_id.to_string()));
    }
    Ok(file_id)
}

fn validate_ext(file_ext: &str) -> Result<&str> {
    let ext = file_ext.strip_prefix('.').unwrap_or(file_ext);
    if ext.is_empty() || ext.contains(['/', '\\']) || ext.contains(std::path::MAIN_SEPARATOR) {
        return Err(AppDataError::InvalidExtension(file_ext.to_string()));
    }
    // tmp is the instance-file marker; cleanup treats any name ending in it
    // as session-stamped, so it may not appear as the final segment of a
    // compound extension either.
    if ext.rsplit('.').next() == Some(TEMP_FILE_EXT) {
        return Err(AppDataError::InvalidExtension(file_ext.to_string()));
    }
    Ok(ext)
}

fn validate_host_version(host_version: &str) -> Result<()> {
    if host_version.is_empty()
        || host_version.contains(['_', '/', '\\'])
        || host_version.contains(std::path::MAIN_SEPARATOR)
    {
        return Err(AppDataError::InvalidHostVersion(host_version.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn paths(root: &Path) -> AppDataPaths {
        AppDataPaths::new(root, "2026")
            .expect("appdata")
            .with_session_id(4242)
    }

    #[test]
    fn naming_schemes_follow_the_documented_prefixes() {
        let dir = tempdir().unwrap();
        let paths = paths(dir.path());

        assert_eq!(
            paths.universal_data_file("cache", "json").unwrap(),
            dir.path().join("gantry_cache.json")
        );
        assert_eq!(
            paths.data_file("cache", "json").unwrap(),
            dir.path().join("gantry_2026_cache.json")
        );
        assert_eq!(
            paths.instance_data_file("cache").unwrap(),
            dir.path().join("gantry_2026_4242_cache.tmp")
        );
    }

    #[test]
    fn kinds_never_alias_for_identical_inputs() {
        let dir = tempdir().unwrap();
        let paths = paths(dir.path());

        let universal = paths.universal_data_file("cache", "json").unwrap();
        let data = paths.data_file("cache", "json").unwrap();
        let instance = paths.instance_data_file("cache").unwrap();

        assert_ne!(universal, data);
        assert_ne!(universal, instance);
        assert_ne!(data, instance);
    }

    #[test]
    fn leading_dot_in_extension_is_stripped() {
        let dir = tempdir().unwrap();
        let paths = paths(dir.path());
        assert_eq!(
            paths.universal_data_file("cache", ".json").unwrap(),
            dir.path().join("gantry_cache.json")
        );
    }

    #[test]
    fn path_escaping_ids_are_rejected() {
        let dir = tempdir().unwrap();
        let paths = paths(dir.path());

        for bad in ["", "..", "a/b", "a\\b"] {
            let err = paths.data_file(bad, "json").unwrap_err();
            assert!(matches!(err, AppDataError::InvalidFileId(_)), "id {bad:?}");
        }
    }

    #[test]
    fn tmp_extension_is_reserved_for_instance_files() {
        let dir = tempdir().unwrap();
        let paths = paths(dir.path());

        let err = paths.data_file("cache", "tmp").unwrap_err();
        assert!(matches!(err, AppDataError::InvalidExtension(_)));
        let err = paths.universal_data_file("cache", ".tmp").unwrap_err();
        assert!(matches!(err, AppDataError::InvalidExtension(_)));

        // A compound extension must not end in the marker either; a name
        // such as gantry_2026_123_backup.json.tmp would read as session
        // 123's instance file and get swept by another session's cleanup.
        let err = paths.data_file("123_backup", "json.tmp").unwrap_err();
        assert!(matches!(err, AppDataError::InvalidExtension(_)));
        let err = paths.universal_data_file("123_backup", "json.tmp").unwrap_err();
        assert!(matches!(err, AppDataError::InvalidExtension(_)));

        // Only the final segment is reserved.
        assert!(paths.data_file("cache", "tmp.json").is_ok());
    }

    #[test]
    fn underscored_host_version_is_rejected() {
        let dir = tempdir().unwrap();
        let err = AppDataPaths::new(dir.path(), "20_26").unwrap_err();
        assert!(matches!(err, AppDataError::InvalidHostVersion(_)));
    }

    #[test]
    fn new_creates_the_root_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("nested").join("gantry");
        let _ = AppDataPaths::new(&root, "2026").unwrap();
        assert!(root.is_dir());
    }
}
