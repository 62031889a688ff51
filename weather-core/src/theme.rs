use anyhow::Result;
use tracing::debug;

use crate::settings::SettingsStore;

pub const THEME_KEY: &str = "weatherAppTheme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Icon and tooltip for the toggle control; both advertise the *other* mode.
    pub fn style(&self) -> ThemeStyle {
        match self {
            Theme::Dark => ThemeStyle {
                dark: true,
                icon: "sun",
                tooltip: "Switch to light mode",
            },
            Theme::Light => ThemeStyle {
                dark: false,
                icon: "moon",
                tooltip: "Switch to dark mode",
            },
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Theme {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(anyhow::anyhow!("Unknown theme '{value}'. Supported themes: light, dark.")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeStyle {
    pub dark: bool,
    pub icon: &'static str,
    pub tooltip: &'static str,
}

/// Light/dark preference, read once from the store and written back on every toggle.
#[derive(Debug)]
pub struct ThemeController<S: SettingsStore> {
    store: S,
    theme: Theme,
}

impl<S: SettingsStore> ThemeController<S> {
    pub fn load(store: S) -> Self {
        let theme = store
            .get(THEME_KEY)
            .and_then(|v| Theme::try_from(v.as_str()).ok())
            .unwrap_or_default();
        debug!(%theme, "theme loaded");
        Self { store, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn style(&self) -> ThemeStyle {
        self.theme.style()
    }

    pub fn toggle(&mut self) -> Result<Theme> {
        self.set(self.theme.toggled())
    }

    pub fn set(&mut self, theme: Theme) -> Result<Theme> {
        self.theme = theme;
        self.store.set(THEME_KEY, theme.as_str())?;
        Ok(theme)
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
