use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Version of the Gantry framework itself, fixed at build time.
pub static GANTRY_VERSION: Lazy<FrameworkVersion> = Lazy::new(|| {
    FrameworkVersion::parse(env!("CARGO_PKG_VERSION"))
        .expect("CARGO_PKG_VERSION is a valid version triple")
});

/// A `major.minor.patch` triple. Pre-release and build suffixes on the patch
/// component are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrameworkVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl FrameworkVersion {
    #[must_use]
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch }
    }

    #[must_use]
    pub fn parse(version: &str) -> Option<Self> {
        let mut parts = version.splitn(3, '.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        // The third chunk keeps any pre-release or build suffix, dots and
        // all; a fourth dotted component fails the numeric parse instead.
        let patch = parts.next()?.split(['-', '+']).next()?.parse().ok()?;
        Some(Self { major, minor, patch })
    }
}

impl fmt::Display for FrameworkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
