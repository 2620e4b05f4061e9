use serde::{Deserialize, Serialize};

/// How the `data` of an [`Icon`] should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IconKind {
    /// `data` is a filesystem path to an image.
    Path,
    /// `data` is raw SVG markup.
    Svg,
    /// `data` is the name of an icon bundled with the host.
    #[serde(alias = "Builtin")]
    BuiltIn,
    /// `data` is a URL to an image.
    Url,
    /// `data` is a host-relative path into the default icon set.
    Default,
    /// A kind this build does not know about. Kept so a single unexpected
    /// icon does not fail decoding of a whole result list.
    #[serde(other)]
    Unknown,
}

/// An icon attached to a result item or action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Icon {
    #[serde(alias = "type")]
    pub kind: IconKind,
    #[serde(default)]
    pub data: String,
}

impl Icon {
    #[must_use]
    pub fn new(kind: IconKind, data: impl Into<String>) -> Self {
        Self {
            kind,
            data: data.into(),
        }
    }

    #[must_use]
    pub fn path(path: impl Into<String>) -> Self {
        Self::new(IconKind::Path, path)
    }

    #[must_use]
    pub fn svg(markup: impl Into<String>) -> Self {
        Self::new(IconKind::Svg, markup)
    }

    #[must_use]
    pub fn built_in(name: impl Into<String>) -> Self {
        Self::new(IconKind::BuiltIn, name)
    }

    #[must_use]
    pub fn url(url: impl Into<String>) -> Self {
        Self::new(IconKind::Url, url)
    }

    /// Whether there is nothing to render from `data`.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.data.trim().is_empty()
    }
}
