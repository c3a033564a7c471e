use std::fmt;

use serde::{Deserialize, Serialize};

/// Metadata handle for the engine executing the current script.
///
/// The host attaches one when it runs a script in-engine. Externally spawned
/// scripts carry no handle, and the facade turns that absence into an error
/// the script author can act on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScriptEngine {
    pub name: String,
    pub version: String,
}

impl ScriptEngine {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ScriptEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}
