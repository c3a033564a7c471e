use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// Ribbon handle shared between the host UI layer and script facades.
pub type SharedRibbon = Arc<Mutex<Ribbon>>;

/// One button on a ribbon tab.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RibbonButton {
    pub name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    pub enabled: bool,
    pub visible: bool,
}

impl RibbonButton {
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            tooltip: None,
            enabled: true,
            visible: true,
        }
    }

    #[must_use]
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }
}

/// One tab of the host ribbon, holding its buttons in display order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RibbonTab {
    name: String,
    buttons: Vec<RibbonButton>,
}

impl RibbonTab {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buttons: Vec::new(),
        }
    }

    pub fn add_button(&mut self, button: RibbonButton) {
        self.buttons.push(button);
    }

    #[must_use]
    pub fn with_button(mut self, button: RibbonButton) -> Self {
        self.buttons.push(button);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn buttons(&self) -> &[RibbonButton] {
        &self.buttons
    }

    /// First direct child with exactly this name. Not recursive, not fuzzy.
    #[must_use]
    pub fn find_child(&self, name: &str) -> Option<&RibbonButton> {
        self.buttons.iter().find(|button| button.name == name)
    }
}

/// The host ribbon as scripts see it: tabs in display order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ribbon {
    tabs: Vec<RibbonTab>,
}

impl Ribbon {
    pub fn add_tab(&mut self, tab: RibbonTab) {
        self.tabs.push(tab);
    }

    #[must_use]
    pub fn with_tab(mut self, tab: RibbonTab) -> Self {
        self.tabs.push(tab);
        self
    }

    #[must_use]
    pub fn tabs(&self) -> &[RibbonTab] {
        &self.tabs
    }

    /// First button named `name`, scanning tabs in display order. Buttons on
    /// later tabs are shadowed by an earlier match.
    #[must_use]
    pub fn find_button(&self, name: &str) -> Option<&RibbonButton> {
        self.tabs.iter().find_map(|tab| tab.find_child(name))
    }

    /// Apply `f` to the first button named `name`. Returns false when no
    /// button matches.
    pub fn update_button(&mut self, name: &str, f: impl FnOnce(&mut RibbonButton)) -> bool {
        for tab in &mut self.tabs {
            if let Some(button) = tab.buttons.iter_mut().find(|button| button.name == name) {
                f(button);
                return true;
            }
        }
        false
    }

    /// Wrap in a shared handle for the session.
    #[must_use]
    pub fn into_shared(self) -> SharedRibbon {
        Arc::new(Mutex::new(self))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sample_ribbon() -> Ribbon {
        Ribbon::default()
            .with_tab(
                RibbonTab::new("Tools")
                    .with_button(RibbonButton::new("WallCheck", "Wall Check"))
                    .with_button(RibbonButton::new("DoorTag", "Door Tag")),
            )
            .with_tab(
                RibbonTab::new("Audit")
                    .with_button(RibbonButton::new("WallCheck", "Wall Check (audit)")),
            )
    }

    #[test]
    fn find_button_scans_tabs_in_order() {
        let ribbon = sample_ribbon();
        let button = ribbon.find_button("WallCheck").unwrap();
        assert_eq!(button.title, "Wall Check");
    }

    #[test]
    fn find_button_requires_an_exact_name() {
        let ribbon = sample_ribbon();
        assert!(ribbon.find_button("Wall").is_none());
        assert!(ribbon.find_button("wallcheck").is_none());
    }

    #[test]
    fn missing_button_is_none_not_an_error() {
        let ribbon = sample_ribbon();
        assert!(ribbon.find_button("RoofCheck").is_none());
    }

    #[test]
    fn update_button_mutates_the_first_match() {
        let mut ribbon = sample_ribbon();
        assert!(ribbon.update_button("WallCheck", |button| button.enabled = false));

        assert!(!ribbon.tabs()[0].buttons()[0].enabled);
        assert!(ribbon.tabs()[1].buttons()[0].enabled);
    }

    #[test]
    fn update_button_reports_missing_names() {
        let mut ribbon = sample_ribbon();
        assert!(!ribbon.update_button("RoofCheck", |button| button.enabled = false));
    }
}
