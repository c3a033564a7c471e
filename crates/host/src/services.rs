use std::sync::{Arc, Mutex};

use gantry_appdata::AppDataPaths;
use gantry_config::ConfigStore;

use crate::output::OutputWindow;
use crate::registry::{CommandRegistry, SharedRegistry};
use crate::ribbon::{Ribbon, SharedRibbon};

/// Identity of the CAD application hosting this session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostInfo {
    pub product: String,
    pub version: String,
}

impl HostInfo {
    pub fn new(product: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            product: product.into(),
            version: version.into(),
        }
    }
}

/// Session-long aggregate of the services scripts consume.
///
/// Built once when the host boots its scripting layer, then shared with
/// every script facade constructed during the session. Accessors hand out
/// clones of the shared handles, never the services themselves.
pub struct HostServices {
    host: HostInfo,
    output: Arc<OutputWindow>,
    config: Arc<Mutex<ConfigStore>>,
    appdata: Arc<AppDataPaths>,
    ribbon: SharedRibbon,
    registry: SharedRegistry,
}

impl HostServices {
    pub fn new(
        host: HostInfo,
        config: ConfigStore,
        appdata: AppDataPaths,
        registry: CommandRegistry,
    ) -> Self {
        Self {
            host,
            output: Arc::new(OutputWindow::console()),
            config: Arc::new(Mutex::new(config)),
            appdata: Arc::new(appdata),
            ribbon: Ribbon::default().into_shared(),
            registry: registry.into_shared(),
        }
    }

    #[must_use]
    pub fn with_output(mut self, output: OutputWindow) -> Self {
        self.output = Arc::new(output);
        self
    }

    #[must_use]
    pub fn with_ribbon(mut self, ribbon: Ribbon) -> Self {
        self.ribbon = ribbon.into_shared();
        self
    }

    #[must_use]
    pub fn host(&self) -> &HostInfo {
        &self.host
    }

    #[must_use]
    pub fn output(&self) -> Arc<OutputWindow> {
        Arc::clone(&self.output)
    }

    #[must_use]
    pub fn config(&self) -> Arc<Mutex<ConfigStore>> {
        Arc::clone(&self.config)
    }

    #[must_use]
    pub fn appdata(&self) -> Arc<AppDataPaths> {
        Arc::clone(&self.appdata)
    }

    #[must_use]
    pub fn ribbon(&self) -> SharedRibbon {
        Arc::clone(&self.ribbon)
    }

    #[must_use]
    pub fn registry(&self) -> SharedRegistry {
        Arc::clone(&self.registry)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::ribbon::{RibbonButton, RibbonTab};

    fn sample_services(dir: &TempDir) -> HostServices {
        let config = ConfigStore::load(dir.path().join("gantry_config.toml")).unwrap();
        let appdata = AppDataPaths::new(dir.path().join("appdata"), "2026").unwrap();
        HostServices::new(
            HostInfo::new("HostCAD", "2026"),
            config,
            appdata,
            CommandRegistry::new(),
        )
    }

    #[test]
    fn accessors_share_one_underlying_service() {
        let dir = TempDir::new().unwrap();
        let services = sample_services(&dir);

        services.output().set_title("from first handle");
        assert_eq!(services.output().title(), "from first handle");
    }

    #[test]
    fn with_ribbon_installs_the_session_ribbon() {
        let dir = TempDir::new().unwrap();
        let ribbon = Ribbon::default()
            .with_tab(RibbonTab::new("Tools").with_button(RibbonButton::new("WallCheck", "Wall Check")));
        let services = sample_services(&dir).with_ribbon(ribbon);

        let shared = services.ribbon();
        let guard = shared.lock().expect("ribbon mutex poisoned");
        assert!(guard.find_button("WallCheck").is_some());
    }

    #[test]
    fn host_identity_is_exposed() {
        let dir = TempDir::new().unwrap();
        let services = sample_services(&dir);
        assert_eq!(services.host().product, "HostCAD");
    }
}
