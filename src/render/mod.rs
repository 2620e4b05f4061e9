//! HTML for the launcher webview.
//!
//! Rendering is a pure function of controller state: the same
//! [`ResultsView`] always produces the same markup.


use kal_ipc::{Config, OsFamily, SearchResultItem};

use crate::bridge::HostBridge;
use crate::controller::Controller;
use crate::theme::Theme;

pub mod html;
mod icon;

pub use icon::{FALLBACK_ICON_SVG, render_icon};

/// Prefix of each row's element id; the row index follows it.
pub const ROW_ID_PREFIX: &str = "search-results_item_#";

/// Everything the renderer reads from the controller.
#[derive(Debug, Clone, Copy)]
pub struct ResultsView<'a> {
    pub query: &'a str,
    pub results: &'a [SearchResultItem],
    pub selection: Option<usize>,
    pub action_cursor: usize,
    pub refreshing: bool,
}

impl<B: HostBridge> Controller<B> {
    /// Borrow the state the renderer needs.
    pub fn view(&self) -> ResultsView<'_> {
        ResultsView {
            query: self.query(),
            results: self.results(),
            selection: self.selection(),
            action_cursor: self.action_cursor(),
            refreshing: self.is_refreshing(),
        }
    }
}

/// Element id of the row at `index`.
#[must_use]
pub fn row_id(index: usize) -> String {
    format!("{ROW_ID_PREFIX}{index}")
}

/// The result list as a `<ul>`.
#[must_use]
pub fn render_results(view: &ResultsView<'_>, os: OsFamily) -> String {
    let mut out = String::from(r#"<ul id="search-results" role="listbox">"#);
    for (index, item) in view.results.iter().enumerate() {
        render_row(&mut out, view, index, item, os);
    }
    out.push_str("</ul>");
    out
}

fn render_row(
    out: &mut String,
    view: &ResultsView<'_>,
    index: usize,
    item: &SearchResultItem,
    os: OsFamily,
) {
    let selected = view.selection == Some(index);
    let mut classes = String::from("search-results_item");
    if selected {
        classes.push_str(" selected");
    }

    out.push_str(&format!(
        r#"<li id="{id}" class="{classes}" role="option" aria-selected="{selected}" data-item-id="{item_id}""#,
        id = html::escape(&row_id(index)),
        item_id = html::escape(&item.id),
    ));
    if let Some(tooltip) = &item.tooltip {
        out.push_str(&format!(r#" title="{}""#, html::escape(tooltip)));
    }
    out.push('>');

    out.push_str(&format!(
        r#"<div class="search-results_item_left">{icon}</div><div class="search-results_item_right"><span class="text-primary">{primary}</span><span class="text-secondary">{secondary}</span></div>"#,
        icon = render_icon(&item.icon, os),
        primary = html::escape(&item.primary_text),
        secondary = html::escape(&item.secondary_text),
    ));

    if !item.actions.is_empty() {
        out.push_str(r#"<div class="search-results_item_actions">"#);
        for (action_index, action) in item.actions.iter().enumerate() {
            let active = selected && action_index == view.action_cursor;
            out.push_str(&format!(
                r#"<button class="action{active}" data-action-id="{id}""#,
                active = if active { " active" } else { "" },
                id = html::escape(&action.id),
            ));
            if let Some(description) = &action.description {
                out.push_str(&format!(r#" title="{}""#, html::escape(description)));
            }
            out.push('>');
            if let Some(icon) = &action.icon {
                out.push_str(&render_icon(icon, os));
            }
            if let Some(accelerator) = &action.accelerator {
                out.push_str(&format!("<kbd>{}</kbd>", html::escape(accelerator)));
            }
            out.push_str("</button>");
        }
        out.push_str("</div>");
    }

    out.push_str("</li>");
}

/// CSS custom properties derived from the appearance config.
#[must_use]
pub fn appearance_rules(config: &Config) -> String {
    let appearance = &config.appearance;
    format!(
        ":root {{\n  --window-width: {}px;\n  --input-height: {}px;\n  --input-items-gap: {}px;\n  --item-height: {}px;\n  --item-gap: {}px;\n  --results-max-height: {}px;\n}}",
        appearance.window_width,
        appearance.input_height,
        appearance.input_items_gap,
        appearance.item_height,
        appearance.item_gap,
        appearance.results_height(appearance.max_items as usize),
    )
}

const BASE_CSS: &str = r#"* { box-sizing: border-box; margin: 0; padding: 0; }
main { width: var(--window-width); overflow: hidden; }
#search-input_container { display: flex; height: var(--input-height); }
#search-input { flex-grow: 1; background: transparent; border: none; outline: none; font-size: larger; padding: 1rem; }
#search-results_container { overflow-x: hidden; overflow-y: auto; max-height: var(--results-max-height); margin-top: var(--input-items-gap); }
.search-results_item { list-style: none; display: flex; height: var(--item-height); margin-bottom: var(--item-gap); }
.search-results_item.selected { background-color: var(--accent, #0078d4); }
.search-results_item_left { flex-shrink: 0; width: 60px; display: grid; place-items: center; }
.search-results_item_left > * { width: 50%; height: 50%; }
.search-results_item_right { overflow: hidden; display: flex; flex-direction: column; justify-content: center; }
.search-results_item_right span { overflow: hidden; white-space: nowrap; text-overflow: ellipsis; }
.action.active { outline: 1px solid currentColor; }
.refreshing-indicator { align-self: center; padding: 0 1rem; }"#;

/// A complete document for the launcher window.
#[must_use]
pub fn render_page(view: &ResultsView<'_>, config: &Config, theme: &Theme, os: OsFamily) -> String {
    let mut main_classes = Vec::new();
    if config.appearance.transparent {
        main_classes.push("transparent");
    }
    if config.appearance.shadows {
        main_classes.push("shadows");
    }

    let mut out = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n");
    out.push_str(&format!(
        "<style id=\"base\">\n{}\n{BASE_CSS}\n</style>\n",
        appearance_rules(config)
    ));
    let accent = theme.accent_rules();
    if !accent.is_empty() {
        out.push_str(&format!("<style id=\"accent\">\n{accent}\n</style>\n"));
    }
    if let Some(css) = theme.custom_css() {
        out.push_str(&format!(
            "<style id=\"custom-css\">\n{}\n</style>\n",
            html::style_text(css)
        ));
    }
    out.push_str("</head>\n<body>\n");

    out.push_str(&format!("<main class=\"{}\">\n", main_classes.join(" ")));
    out.push_str(&format!(
        r#"<div id="search-input_container"><input id="search-input" placeholder="Search..." autocomplete="off" value="{}" />"#,
        html::escape(view.query)
    ));
    if view.refreshing {
        out.push_str(r#"<span class="refreshing-indicator" aria-live="polite">Refreshing index…</span>"#);
    }
    out.push_str("</div>\n");
    out.push_str(&format!(
        "<div id=\"search-results_container\">{}</div>\n",
        render_results(view, os)
    ));
    out.push_str("</main>\n</body>\n</html>\n");
    out
}
