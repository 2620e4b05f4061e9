//! Host-driven styling: the OS accent colour and the user's stylesheet.

use kal_ipc::{AccentColor, HostEvent};

/// Styling state pushed by the host for one window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Theme {
    accent: Option<AccentColor>,
    custom_css: Option<String>,
}

impl Theme {
    #[must_use]
    pub fn new(accent: Option<AccentColor>, custom_css: Option<String>) -> Self {
        Self {
            accent,
            custom_css: custom_css.filter(|css| !css.trim().is_empty()),
        }
    }

    pub fn accent(&self) -> Option<&AccentColor> {
        self.accent.as_ref()
    }

    pub fn custom_css(&self) -> Option<&str> {
        self.custom_css.as_deref()
    }

    /// Apply a theme event. Returns whether the event was one of ours.
    pub fn apply(&mut self, event: &HostEvent) -> bool {
        match event {
            HostEvent::UpdateSystemAccentColor(color) => {
                self.accent = Some(color.clone());
                true
            }
            HostEvent::UpdateCustomCss(css) => {
                self.custom_css = Some(css.clone()).filter(|css| !css.trim().is_empty());
                true
            }
            _ => false,
        }
    }

    /// `:root` custom properties for the accent colour, empty when the host
    /// never sent one.
    #[must_use]
    pub fn accent_rules(&self) -> String {
        let Some(accent) = &self.accent else {
            return String::new();
        };
        let variables = accent.variables();
        if variables.is_empty() {
            return String::new();
        }

        let mut css = String::from(":root {\n");
        for (name, value) in variables {
            css.push_str(&format!("  {name}: {};\n", sanitize_css_value(value)));
        }
        css.push('}');
        css
    }
}

/// Colour values end up inside a `<style>` element; strip anything that
/// could close the declaration or the element.
fn sanitize_css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>'))
        .collect()
}

#[cfg(test)]
mod tests {
    use kal_ipc::AccentPalette;

    use super::*;

    #[test]
    fn single_accent_becomes_root_variable() {
        let mut theme = Theme::default();
        assert!(theme.accent_rules().is_empty());

        assert!(theme.apply(&HostEvent::UpdateSystemAccentColor(AccentColor::Single(
            "#0078d4".into()
        ))));
        assert_eq!(theme.accent_rules(), ":root {\n  --accent: #0078d4;\n}");
    }

    #[test]
    fn palette_values_are_sanitized() {
        let theme = Theme::new(
            Some(AccentColor::Palette(AccentPalette {
                accent: Some("red;}</style><script>".into()),
                ..AccentPalette::default()
            })),
            None,
        );
        let rules = theme.accent_rules();
        assert!(rules.contains("--accent: red/stylescript;"));
        assert!(!rules.contains("</style>"));
    }

    #[test]
    fn blank_custom_css_is_dropped() {
        let mut theme = Theme::new(None, Some("  ".into()));
        assert_eq!(theme.custom_css(), None);

        theme.apply(&HostEvent::UpdateCustomCss("body { margin: 0 }".into()));
        assert_eq!(theme.custom_css(), Some("body { margin: 0 }"));

        theme.apply(&HostEvent::UpdateCustomCss(String::new()));
        assert_eq!(theme.custom_css(), None);
    }

    #[test]
    fn ignores_unrelated_events() {
        let mut theme = Theme::default();
        assert!(!theme.apply(&HostEvent::FocusInput));
        assert_eq!(theme, Theme::default());
    }
}
