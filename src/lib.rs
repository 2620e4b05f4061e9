//! Presentation side of the kal launcher.
//!
//! The [`controller`] turns input into state changes or host commands, the
//! [`bridge`] carries those commands and the host's pushes across the IPC
//! boundary, and [`render`] turns controller state into markup. A
//! [`Session`] ties them together for one window.

pub mod app_dirs;
pub mod bridge;
pub mod controller;
pub mod logging;
pub mod render;
pub mod session;
pub mod theme;

pub use bridge::{BridgeError, EventHub, HostBridge, RawEvent};
pub use controller::{Controller, Direction, Key, KeyInput, ScrollRequest, ViewEffect};
pub use kal_ipc as ipc;
pub use render::{ResultsView, render_icon, render_page, render_results};
pub use session::{Bootstrap, Session};
pub use theme::Theme;
