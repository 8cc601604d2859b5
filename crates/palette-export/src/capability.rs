//! Companion capability checks.
//!
//! The export feature is an add-on: without the companion Design Palette
//! Pro component there is nothing to export, so the plugin-listing screen
//! deactivates it on sight.

use palette_common::AdminNotice;

/// Screen identifier of the plugin-listing admin screen.
pub const PLUGIN_SCREEN: &str = "plugins";

/// Warning shown when the companion component is missing.
pub const COMPANION_REQUIRED: &str =
    "This plugin requires Design Palette Pro to function and cannot be activated.";

/// Reports whether the companion component is installed and active.
pub trait CompanionProbe {
    fn companion_active(&self) -> bool;
}

/// What the plugin-listing screen should do with this feature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateAction {
    KeepActive,
    /// Deactivate the feature and show the warning.
    Deactivate(AdminNotice),
}

/// Evaluate the capability gate for an admin screen load. Only the
/// plugin-listing screen is gated; everywhere else the feature stays put.
pub fn plugin_screen_gate(screen: &str, probe: &impl CompanionProbe) -> GateAction {
    if screen != PLUGIN_SCREEN {
        return GateAction::KeepActive;
    }
    if probe.companion_active() {
        return GateAction::KeepActive;
    }
    tracing::warn!("Companion component inactive, deactivating export feature");
    GateAction::Deactivate(AdminNotice::error(COMPANION_REQUIRED))
}
