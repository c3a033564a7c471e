use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use toml::value::Value;
use toml::Table;

use crate::{ConfigError, Result, Section};

pub const CONFIG_DIR_NAME: &str = "gantry";
pub const CONFIG_FILE_NAME: &str = "gantry_config.toml";

/// Default location of the user configuration file:
/// `<platform config dir>/gantry/gantry_config.toml`.
pub fn default_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// In-memory image of one TOML configuration document.
///
/// Top-level tables are sections; anything else at the top level is ignored
/// on load with a warning (tolerant read, strict write). Changes are kept in
/// memory until `save_changes` flushes the whole document.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    sections: BTreeMap<String, Section>,
    dirty: bool,
}

impl ConfigStore {
    /// Load the document at `path`. A missing file yields an empty store
    /// bound to that path; an unparseable file is an error, never silently
    /// replaced.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            log::debug!("config file {} not found, starting empty", path.display());
            return Ok(Self {
                path,
                sections: BTreeMap::new(),
                dirty: false,
            });
        }

        let raw = std::fs::read_to_string(&path)?;
        let doc: Table = raw.parse().map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

        let mut sections = BTreeMap::new();
        for (name, value) in doc {
            match value {
                Value::Table(table) => {
                    sections.insert(name.clone(), Section::from_table(name, table));
                }
                other => {
                    log::warn!(
                        "ignoring top-level non-section key {name:?} ({}) in {}",
                        other.type_str(),
                        path.display()
                    );
                }
            }
        }

        Ok(Self {
            path,
            sections,
            dirty: false,
        })
    }

    /// Load from the default per-user location.
    pub fn load_default() -> Result<Self> {
        Self::load(default_config_path()?)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True when there are unsaved changes.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn has_section(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn get_section(&self, name: &str) -> Result<&Section> {
        self.sections
            .get(name)
            .ok_or_else(|| ConfigError::SectionMissing(name.to_string()))
    }

    /// Mutable section access. Marks the store dirty: the borrow is handed
    /// out precisely so the caller can change options.
    pub fn get_section_mut(&mut self, name: &str) -> Result<&mut Section> {
        let section = self
            .sections
            .get_mut(name)
            .ok_or_else(|| ConfigError::SectionMissing(name.to_string()))?;
        self.dirty = true;
        Ok(section)
    }

    pub fn add_section(&mut self, name: &str) -> Result<&mut Section> {
        if self.sections.contains_key(name) {
            return Err(ConfigError::SectionExists(name.to_string()));
        }
        self.dirty = true;
        Ok(self
            .sections
            .entry(name.to_string())
            .or_insert_with(|| Section::new(name)))
    }

    pub fn remove_section(&mut self, name: &str) -> Result<()> {
        self.sections
            .remove(name)
            .ok_or_else(|| ConfigError::SectionMissing(name.to_string()))?;
        self.dirty = true;
        Ok(())
    }

    /// Flush the whole document to disk.
    ///
    /// The write is process-wide: every section is persisted, not just the
    /// ones the caller touched. An exclusive advisory lock on `<file>.lock`
    /// guards against a sibling host session saving at the same moment, and
    /// the document lands via write-tmp-then-rename so readers never observe
    /// a half-written file.
    pub fn save_changes(&mut self) -> Result<()> {
        let mut doc = Table::new();
        for (name, section) in &self.sections {
            doc.insert(name.clone(), Value::Table(section.as_table().clone()));
        }
        let rendered = toml::to_string_pretty(&doc)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let _lock = SaveLock::acquire(&self.path)?;
        let tmp = self.path.with_extension("toml.tmp");
        std::fs::write(&tmp, rendered)?;
        std::fs::rename(&tmp, &self.path)?;

        self.dirty = false;
        log::debug!("saved config to {}", self.path.display());
        Ok(())
    }
}

struct SaveLock {
    file: std::fs::File,
}

impl SaveLock {
    fn acquire(target: &Path) -> Result<Self> {
        let path = target.with_extension("toml.lock");
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)?;
        file.lock_exclusive()
            .map_err(|err| ConfigError::Lock(format!("acquire {}: {err}", path.display())))?;
        Ok(Self { file })
    }
}

impl Drop for SaveLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn store_at(dir: &Path) -> ConfigStore {
        ConfigStore::load(dir.join("gantry_config.toml")).expect("load")
    }

    #[test]
    fn missing_file_loads_as_empty_store() {
        let dir = tempdir().unwrap();
        let store = store_at(dir.path());
        assert_eq!(store.section_names().count(), 0);
        assert!(!store.is_dirty());
    }

    #[test]
    fn unparseable_file_is_an_error_not_a_reset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gantry_config.toml");
        std::fs::write(&path, "not [valid toml").unwrap();

        let err = ConfigStore::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "got {err}");
    }

    #[test]
    fn add_get_remove_section_round_trip() {
        let dir = tempdir().unwrap();
        let mut store = store_at(dir.path());

        store.add_section("wallcheckconfig").unwrap();
        assert!(store.has_section("wallcheckconfig"));
        assert!(store.is_dirty());

        let err = store.add_section("wallcheckconfig").unwrap_err();
        assert!(matches!(err, ConfigError::SectionExists(_)));

        store.remove_section("wallcheckconfig").unwrap();
        let err = store.get_section("wallcheckconfig").unwrap_err();
        assert!(matches!(err, ConfigError::SectionMissing(_)));
    }

    #[test]
    fn save_then_reload_preserves_sections_and_options() {
        let dir = tempdir().unwrap();
        let mut store = store_at(dir.path());

        let section = store.add_section("exporterconfig").unwrap();
        section.set_option("format", "dwg");
        section.set_option("passes", 2i64);
        store.save_changes().unwrap();
        assert!(!store.is_dirty());

        let reloaded = store_at(dir.path());
        let section = reloaded.get_section("exporterconfig").unwrap();
        assert_eq!(section.get_str("format").unwrap(), "dwg");
        assert_eq!(section.get_int("passes").unwrap(), 2);
    }

    #[test]
    fn save_leaves_no_tmp_file_behind() {
        let dir = tempdir().unwrap();
        let mut store = store_at(dir.path());
        store.add_section("a").unwrap();
        store.save_changes().unwrap();

        assert!(dir.path().join("gantry_config.toml").exists());
        assert!(!dir.path().join("gantry_config.toml.tmp").exists());
    }

    #[test]
    fn top_level_scalars_are_ignored_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gantry_config.toml");
        std::fs::write(&path, "stray = 1\n\n[kept]\nvalue = \"x\"\n").unwrap();

        let store = ConfigStore::load(&path).unwrap();
        assert_eq!(store.section_names().collect::<Vec<_>>(), vec!["kept"]);
    }

    #[test]
    fn get_section_mut_marks_dirty() {
        let dir = tempdir().unwrap();
        let mut store = store_at(dir.path());
        store.add_section("s").unwrap();
        store.save_changes().unwrap();
        assert!(!store.is_dirty());

        store.get_section_mut("s").unwrap().set_option("k", "v");
        assert!(store.is_dirty());
    }

    #[test]
    fn concurrent_saves_leave_a_parseable_document() {
        let dir = tempdir().unwrap();
        let path = dir.path().to_path_buf();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let path = path.clone();
                std::thread::spawn(move || {
                    let mut store = store_at(&path);
                    store.add_section(&format!("writer{i}")).unwrap();
                    for _ in 0..10 {
                        store.save_changes().unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Whoever saved last wins the content; the document itself must
        // always be readable.
        let store = store_at(&path);
        assert!(store.section_names().count() >= 1);
    }
}
