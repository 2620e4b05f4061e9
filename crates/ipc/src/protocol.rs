//! Resolution of host-served resources through custom URL schemes.
//!
//! Webviews on Windows cannot load arbitrary custom schemes, so the host
//! registers them as `http://<protocol>.localhost/` origins there. Every
//! other platform uses `<protocol>://` directly.

use serde::{Deserialize, Serialize};

/// Scheme the host answers commands on.
pub const IPC_PROTOCOL: &str = "kalipc";
/// Scheme serving icons referenced by filesystem path.
pub const ICON_PROTOCOL: &str = "kalicon";
/// Scheme serving the host's bundled assets, including built-in icons.
pub const ASSET_PROTOCOL: &str = "kalasset";

/// Operating system family of the host, which decides the URL form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Windows,
    Unix,
}

impl OsFamily {
    /// Family of the platform this binary was built for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }

    /// Build a URL addressing `path` on the given custom `protocol`.
    #[must_use]
    pub fn protocol_url(self, protocol: &str, path: &str) -> String {
        match self {
            Self::Windows => format!("http://{protocol}.localhost/{path}"),
            Self::Unix => format!("{protocol}://{path}"),
        }
    }

    /// Build a URL for a file, percent-encoding the whole path into a
    /// single URL segment first.
    #[must_use]
    pub fn protocol_file_src(self, protocol: &str, file_path: &str) -> String {
        self.protocol_url(protocol, &urlencoding::encode(file_path))
    }
}

impl Default for OsFamily {
    fn default() -> Self {
        Self::current()
    }
}
