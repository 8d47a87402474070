use std::sync::{Arc, RwLock};

use crate::ports::KeyValueStore;

pub const THEME_NAME_KEY: &str = "themeName";
pub const COLOR_MODE_KEY: &str = "colorMode";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeName {
    #[default]
    Default,
    Twitter,
    Vercel,
    Clude,
    AmberMinimal,
    NeoBrutalism,
    Mono,
}

impl ThemeName {
    pub const ALL: [ThemeName; 7] = [
        Self::Default,
        Self::Twitter,
        Self::Vercel,
        Self::Clude,
        Self::AmberMinimal,
        Self::NeoBrutalism,
        Self::Mono,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Twitter => "twitter",
            Self::Vercel => "vercel",
            Self::Clude => "clude",
            Self::AmberMinimal => "amber-minimal",
            Self::NeoBrutalism => "neo-brutalism",
            Self::Mono => "mono",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ColorMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "system" => Some(Self::System),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

/// Color mode after `system` has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedColorMode {
    Light,
    Dark,
}

impl ResolvedColorMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct ThemeState {
    name: ThemeName,
    mode: ColorMode,
    system_dark: bool,
}

/// Theme name and color mode, persisted as plain strings.
pub struct ThemeContext {
    store: Arc<dyn KeyValueStore>,
    state: RwLock<ThemeState>,
}

impl ThemeContext {
    pub fn load(store: Arc<dyn KeyValueStore>, system_dark: bool) -> Self {
        let name = read_setting(store.as_ref(), THEME_NAME_KEY, ThemeName::parse);
        let mode = read_setting(store.as_ref(), COLOR_MODE_KEY, ColorMode::parse);

        Self {
            store,
            state: RwLock::new(ThemeState {
                name,
                mode,
                system_dark,
            }),
        }
    }

    pub fn theme_name(&self) -> ThemeName {
        self.state().name
    }

    pub fn color_mode(&self) -> ColorMode {
        self.state().mode
    }

    pub fn resolved_color_mode(&self) -> ResolvedColorMode {
        let state = self.state();
        match state.mode {
            ColorMode::Light => ResolvedColorMode::Light,
            ColorMode::Dark => ResolvedColorMode::Dark,
            ColorMode::System if state.system_dark => ResolvedColorMode::Dark,
            ColorMode::System => ResolvedColorMode::Light,
        }
    }

    pub fn set_theme_name(&self, name: ThemeName) {
        self.state.write().unwrap_or_else(|e| e.into_inner()).name = name;
        self.persist(THEME_NAME_KEY, name.as_str());
    }

    pub fn set_color_mode(&self, mode: ColorMode) {
        self.state.write().unwrap_or_else(|e| e.into_inner()).mode = mode;
        self.persist(COLOR_MODE_KEY, mode.as_str());
    }

    /// OS preference changed. Only observable while the mode is `system`.
    pub fn system_preference_changed(&self, dark: bool) -> ResolvedColorMode {
        self.state.write().unwrap_or_else(|e| e.into_inner()).system_dark = dark;
        self.resolved_color_mode()
    }

    /// Root classes for the page: theme name then resolved mode.
    pub fn root_classes(&self) -> [&'static str; 2] {
        [self.theme_name().as_str(), self.resolved_color_mode().as_str()]
    }

    fn state(&self) -> ThemeState {
        *self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn persist(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            tracing::warn!(key = %key, error = %e, "Failed to persist theme setting");
        }
    }
}

fn read_setting<T: Default>(
    store: &dyn KeyValueStore,
    key: &str,
    parse: fn(&str) -> Option<T>,
) -> T {
    match store.get(key) {
        Ok(Some(raw)) => parse(&raw).unwrap_or_else(|| {
            tracing::warn!(key = %key, value = %raw, "Unknown theme setting, using default");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Failed to read theme setting");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::test_store::MapStore;

    #[test]
    fn test_defaults() {
        let theme = ThemeContext::load(Arc::new(MapStore::default()), false);
        assert_eq!(theme.theme_name(), ThemeName::Default);
        assert_eq!(theme.color_mode(), ColorMode::System);
        assert_eq!(theme.resolved_color_mode(), ResolvedColorMode::Light);
    }

    #[test]
    fn test_system_mode_follows_os_changes() {
        let theme = ThemeContext::load(Arc::new(MapStore::default()), false);
        assert_eq!(theme.system_preference_changed(true), ResolvedColorMode::Dark);

        theme.set_color_mode(ColorMode::Light);
        assert_eq!(theme.system_preference_changed(true), ResolvedColorMode::Light);
    }

    #[test]
    fn test_settings_persist_as_plain_strings() {
        let store = Arc::new(MapStore::default());
        let theme = ThemeContext::load(store.clone(), false);
        theme.set_theme_name(ThemeName::NeoBrutalism);
        theme.set_color_mode(ColorMode::Dark);

        assert_eq!(store.raw(THEME_NAME_KEY).as_deref(), Some("neo-brutalism"));
        assert_eq!(store.raw(COLOR_MODE_KEY).as_deref(), Some("dark"));

        let reloaded = ThemeContext::load(store, false);
        assert_eq!(reloaded.root_classes(), ["neo-brutalism", "dark"]);
    }

    #[test]
    fn test_unknown_stored_theme_falls_back() {
        let store = Arc::new(MapStore::default());
        store.put(THEME_NAME_KEY, "solarized");
        let theme = ThemeContext::load(store, true);
        assert_eq!(theme.root_classes(), ["default", "dark"]);
    }
}
