/// Escape text for use in HTML element content and quoted attributes.
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Make raw CSS safe to embed in a `<style>` element.
pub fn style_text(css: &str) -> String {
    css.replace("</", "<\\/")
}
