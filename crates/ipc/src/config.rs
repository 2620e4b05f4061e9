//! Appearance and behaviour settings the host pushes to the front-end.
//!
//! The front-end only reads these. Every field has a default so partial
//! payloads from older hosts still decode.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Window backdrop effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vibrancy {
    #[default]
    Mica,
    Tabbed,
    Acrylic,
}

/// Behaviour flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralConfig {
    /// Global hotkey that toggles the window, e.g. `Alt+Space`.
    #[serde(default = "default_hotkey")]
    pub hotkey: String,
    /// Whether `Tab` cycles through the selected item's action buttons
    /// instead of moving to the next result.
    #[serde(
        default = "default_true",
        alias = "tab_through_action_buttons",
        alias = "tab-through-action-buttons"
    )]
    pub tab_through_action_buttons: bool,
    /// Maximum number of results the host returns per query.
    #[serde(
        default = "default_max_results",
        alias = "max_results",
        alias = "max-results"
    )]
    pub max_results: usize,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            hotkey: default_hotkey(),
            tab_through_action_buttons: true,
            max_results: default_max_results(),
        }
    }
}

/// Sizes and window effects, in logical pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppearanceConfig {
    #[serde(
        default = "default_window_width",
        alias = "window_width",
        alias = "window-width"
    )]
    pub window_width: u32,
    #[serde(
        default = "default_input_height",
        alias = "input_height",
        alias = "input-height"
    )]
    pub input_height: u32,
    /// Gap between the input and the first result row.
    #[serde(
        default = "default_input_items_gap",
        alias = "input_items_gap",
        alias = "input-items-gap"
    )]
    pub input_items_gap: u32,
    /// Rows visible before the list scrolls.
    #[serde(default = "default_max_items", alias = "max_items", alias = "max-items")]
    pub max_items: u32,
    #[serde(
        default = "default_item_height",
        alias = "item_height",
        alias = "item-height"
    )]
    pub item_height: u32,
    #[serde(default = "default_item_gap", alias = "item_gap", alias = "item-gap")]
    pub item_gap: u32,
    #[serde(default = "default_true")]
    pub transparent: bool,
    #[serde(default = "default_true")]
    pub shadows: bool,
    #[serde(default = "default_vibrancy")]
    pub vibrancy: Option<Vibrancy>,
    #[serde(default, alias = "custom_css_file", alias = "custom-css-file")]
    pub custom_css_file: Option<PathBuf>,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            input_height: default_input_height(),
            input_items_gap: default_input_items_gap(),
            max_items: default_max_items(),
            item_height: default_item_height(),
            item_gap: default_item_gap(),
            transparent: true,
            shadows: true,
            vibrancy: default_vibrancy(),
            custom_css_file: None,
        }
    }
}

impl AppearanceConfig {
    /// Height of the results area when `count` rows are shown, capped at
    /// [`Self::max_items`] rows.
    #[must_use]
    pub fn results_height(&self, count: usize) -> u32 {
        if count == 0 {
            return 0;
        }
        let rows = count.min(self.max_items as usize) as u32;
        self.input_items_gap + rows * (self.item_height + self.item_gap)
    }
}

/// Full launcher configuration as the host sends it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub appearance: AppearanceConfig,
}

fn default_hotkey() -> String {
    String::from("Alt+Space")
}

fn default_true() -> bool {
    true
}

fn default_max_results() -> usize {
    24
}

fn default_window_width() -> u32 {
    650
}

fn default_input_height() -> u32 {
    65
}

fn default_input_items_gap() -> u32 {
    16
}

fn default_max_items() -> u32 {
    8
}

fn default_item_height() -> u32 {
    55
}

fn default_item_gap() -> u32 {
    4
}

fn default_vibrancy() -> Option<Vibrancy> {
    Some(Vibrancy::Mica)
}
