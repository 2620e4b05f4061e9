//! Message contract between the kal launcher host and its front-end.
//!
//! The host owns search, indexing and execution. The front-end talks to it
//! only through the vocabulary defined here: [`Command`]s going out,
//! [`HostEvent`]s coming in, and the data shapes both carry.

pub mod accent;
pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod icon;
pub mod protocol;
pub mod result_item;
pub mod wire;

pub use accent::{AccentColor, AccentPalette};
pub use command::{ACTION_SEPARATOR, Command, CommandName, ExecuteTarget};
pub use config::{AppearanceConfig, Config, GeneralConfig, Vibrancy};
pub use error::DecodeError;
pub use event::{EventName, HostEvent};
pub use icon::{Icon, IconKind};
pub use protocol::{ASSET_PROTOCOL, ICON_PROTOCOL, IPC_PROTOCOL, OsFamily};
pub use result_item::{Action, SearchResultItem};
pub use wire::{HostReply, HostRequest, Reply};
