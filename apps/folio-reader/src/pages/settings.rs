//! Appearance settings.

use anyhow::anyhow;

use folio_core::context::{ColorMode, ThemeName};
use folio_core::domain::Toast;

use crate::state::AppState;

pub fn render(state: &AppState) -> String {
    let theme = &state.theme;
    let [theme_class, mode_class] = theme.root_classes();

    let mut out = String::from("Settings\n\n");
    out.push_str(&format!("Theme:       {}\n", theme.theme_name().as_str()));
    out.push_str(&format!(
        "Color mode:  {} (showing {})\n",
        theme.color_mode().as_str(),
        theme.resolved_color_mode().as_str()
    ));
    out.push_str(&format!("Root classes: {theme_class} {mode_class}\n\n"));

    let names: Vec<&str> = ThemeName::ALL.iter().map(|t| t.as_str()).collect();
    out.push_str(&format!("Available themes: {}\n", names.join(", ")));
    out.push_str("Color modes: light, dark, system\n");
    out
}

/// Requested settings changes; `None` leaves a setting alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsChange<'a> {
    pub theme: Option<&'a str>,
    pub mode: Option<&'a str>,
    /// OS-level dark preference, as reported by the terminal session.
    pub system_dark: Option<bool>,
}

impl SettingsChange<'_> {
    fn is_empty(&self) -> bool {
        self.theme.is_none() && self.mode.is_none() && self.system_dark.is_none()
    }
}

/// Apply the given settings, then show the page.
pub fn update(state: &AppState, change: SettingsChange<'_>) -> anyhow::Result<String> {
    let SettingsChange {
        theme,
        mode,
        system_dark,
    } = change;

    if let Some(theme) = theme {
        let name = ThemeName::parse(theme).ok_or_else(|| anyhow!("Unknown theme: {theme}"))?;
        state.theme.set_theme_name(name);
        tracing::info!(theme = name.as_str(), "Theme changed");
    }
    if let Some(mode) = mode {
        let mode = ColorMode::parse(mode).ok_or_else(|| anyhow!("Unknown color mode: {mode}"))?;
        state.theme.set_color_mode(mode);
        tracing::info!(mode = mode.as_str(), "Color mode changed");
    }
    if let Some(dark) = system_dark {
        let resolved = state.theme.system_preference_changed(dark);
        tracing::info!(dark, resolved = resolved.as_str(), "System color preference changed");
    }
    if !change.is_empty() {
        state.toasts.show(Toast::new("Settings saved"));
    }

    Ok(render(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_state;

    #[test]
    fn test_defaults() {
        let (_, state) = test_state::seeded();
        let page = render(&state);
        assert!(page.contains("Theme:       default"));
        assert!(page.contains("Color mode:  system (showing light)"));
    }

    #[test]
    fn test_update_persists() {
        let (_, state) = test_state::seeded();
        let change = SettingsChange {
            theme: Some("neo-brutalism"),
            mode: Some("dark"),
            ..SettingsChange::default()
        };
        let page = update(&state, change).unwrap();

        assert!(page.contains("Root classes: neo-brutalism dark"));
        assert_eq!(state.store.get("themeName").unwrap().as_deref(), Some("neo-brutalism"));
        assert_eq!(state.store.get("colorMode").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_unknown_theme() {
        let (_, state) = test_state::seeded();
        let change = SettingsChange {
            theme: Some("solarized"),
            ..SettingsChange::default()
        };
        assert!(update(&state, change).is_err());
        assert_eq!(state.theme.theme_name(), ThemeName::Default);
    }

    #[test]
    fn test_system_preference_follows_os_in_system_mode() {
        let (_, state) = test_state::seeded();
        let dark = SettingsChange {
            system_dark: Some(true),
            ..SettingsChange::default()
        };
        assert!(update(&state, dark).unwrap().contains("Color mode:  system (showing dark)"));

        let light_mode = SettingsChange {
            mode: Some("light"),
            ..SettingsChange::default()
        };
        let page = update(&state, light_mode).unwrap();
        assert!(page.contains("Color mode:  light (showing light)"));
    }
}
