use serde::{Deserialize, Serialize};

/// The OS accent palette. Hosts that cannot read a palette send a single
/// colour instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccentColor {
    Single(String),
    Palette(AccentPalette),
}

/// CSS colour strings for each shade the host could read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccentPalette {
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub foreground: Option<String>,
    #[serde(default)]
    pub accent_dark1: Option<String>,
    #[serde(default)]
    pub accent_dark2: Option<String>,
    #[serde(default)]
    pub accent_dark3: Option<String>,
    #[serde(default)]
    pub accent: Option<String>,
    #[serde(default)]
    pub accent_light1: Option<String>,
    #[serde(default)]
    pub accent_light2: Option<String>,
    #[serde(default)]
    pub accent_light3: Option<String>,
    #[serde(default)]
    pub complement: Option<String>,
}

impl AccentPalette {
    /// Every shade that is set, paired with its CSS custom property name.
    pub fn variables(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("--system-background", &self.background),
            ("--system-foreground", &self.foreground),
            ("--accent-dark1", &self.accent_dark1),
            ("--accent-dark2", &self.accent_dark2),
            ("--accent-dark3", &self.accent_dark3),
            ("--accent", &self.accent),
            ("--accent-light1", &self.accent_light1),
            ("--accent-light2", &self.accent_light2),
            ("--accent-light3", &self.accent_light3),
            ("--complement", &self.complement),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_deref().map(|value| (name, value)))
    }
}

impl AccentColor {
    /// CSS custom properties to set for this colour.
    #[must_use]
    pub fn variables(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::Single(color) => vec![("--accent", color.as_str())],
            Self::Palette(palette) => palette.variables().collect(),
        }
    }
}
