use kal_ipc::{ASSET_PROTOCOL, ICON_PROTOCOL, Icon, IconKind, OsFamily};

use super::html;

/// Generic file glyph drawn when an icon cannot be resolved.
pub const FALLBACK_ICON_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="32" height="32" viewBox="0 0 16 16" aria-hidden="true"><path fill="currentColor" d="M14 4.5V14a2 2 0 0 1-2 2H4a2 2 0 0 1-2-2V2a2 2 0 0 1 2-2h5.5L14 4.5ZM9.5 3A1.5 1.5 0 0 0 11 4.5h2L9.5 1v2Z"/></svg>"#;

/// Markup for `icon`. Never empty: anything that cannot be resolved,
/// including kinds this build does not know, renders the fallback glyph.
#[must_use]
pub fn render_icon(icon: &Icon, os: OsFamily) -> String {
    if icon.is_blank() {
        return FALLBACK_ICON_SVG.to_string();
    }

    match icon.kind {
        IconKind::Svg => icon.data.clone(),
        IconKind::Path => img(&os.protocol_file_src(ICON_PROTOCOL, &icon.data)),
        IconKind::BuiltIn => img(&format!(
            "{}?type=builtin",
            os.protocol_file_src(ASSET_PROTOCOL, &icon.data)
        )),
        IconKind::Default => img(&os.protocol_file_src(ASSET_PROTOCOL, &icon.data)),
        IconKind::Url => img(&icon.data),
        IconKind::Unknown => {
            tracing::debug!(data = %icon.data, "unknown icon kind, using fallback");
            FALLBACK_ICON_SVG.to_string()
        }
    }
}

fn img(src: &str) -> String {
    format!(r#"<img src="{}" alt="" draggable="false" />"#, html::escape(src))
}
