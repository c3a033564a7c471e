use toml::value::Value;
use toml::Table;

use crate::{ConfigError, Result};

/// One named section of the user configuration.
///
/// Sections map to top-level tables in the persisted TOML document. Options
/// are stored as raw TOML values; the typed readers fail with `WrongType`
/// instead of coercing.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    name: String,
    options: Table,
}

impl Section {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Table::new(),
        }
    }

    pub(crate) fn from_table(name: impl Into<String>, options: Table) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }

    pub(crate) fn as_table(&self) -> &Table {
        &self.options
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.contains_key(option)
    }

    pub fn option_names(&self) -> impl Iterator<Item = &str> {
        self.options.keys().map(String::as_str)
    }

    /// Raw value lookup; `OptionMissing` when absent.
    pub fn get_option(&self, option: &str) -> Result<&Value> {
        self.options
            .get(option)
            .ok_or_else(|| ConfigError::OptionMissing {
                section: self.name.clone(),
                option: option.to_string(),
            })
    }

    pub fn set_option(&mut self, option: impl Into<String>, value: impl Into<Value>) {
        self.options.insert(option.into(), value.into());
    }

    pub fn remove_option(&mut self, option: &str) -> Option<Value> {
        self.options.remove(option)
    }

    pub fn get_str(&self, option: &str) -> Result<&str> {
        self.get_option(option)?
            .as_str()
            .ok_or_else(|| self.wrong_type(option, "string"))
    }

    pub fn get_bool(&self, option: &str) -> Result<bool> {
        self.get_option(option)?
            .as_bool()
            .ok_or_else(|| self.wrong_type(option, "boolean"))
    }

    pub fn get_int(&self, option: &str) -> Result<i64> {
        self.get_option(option)?
            .as_integer()
            .ok_or_else(|| self.wrong_type(option, "integer"))
    }

    pub fn get_str_list(&self, option: &str) -> Result<Vec<String>> {
        let items = self
            .get_option(option)?
            .as_array()
            .ok_or_else(|| self.wrong_type(option, "array"))?;
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.wrong_type(option, "array of strings"))
            })
            .collect()
    }

    fn wrong_type(&self, option: &str, expected: &'static str) -> ConfigError {
        ConfigError::WrongType {
            section: self.name.clone(),
            option: option.to_string(),
            expected,
        }
    }
}
