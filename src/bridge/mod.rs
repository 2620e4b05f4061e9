//! Transport between the front-end and the host.
//!
//! Outbound, a [`HostBridge`] turns a [`Command`] into a host round-trip and
//! reports failures as errors. Inbound, transports queue the events the host
//! pushes as [`RawEvent`]s, which the [`EventHub`] decodes and hands to the
//! registered handlers.

use std::rc::Rc;
use std::sync::Arc;

use kal_ipc::{Command, DecodeError, Reply};
use serde_json::Value;
use thiserror::Error;

mod channel;
mod events;
mod journal;
mod stdio;
#[cfg(test)]
pub(crate) mod testing;

pub use channel::{ChannelBridge, HostCall, HostEndpoint, channel};
pub use events::{EventHandler, EventHub};
pub use journal::JournalBridge;
pub use stdio::StdioBridge;

/// Errors surfaced by a host round-trip.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The host went away before answering.
    #[error("host is no longer connected")]
    Disconnected,

    /// The host answered with a failure status.
    #[error("host rejected `{command}` with status {status}: {message}")]
    Host {
        command: &'static str,
        status: u16,
        message: String,
    },

    /// The reply could not be decoded.
    #[error("malformed reply to `{command}`: {source}")]
    Decode {
        command: &'static str,
        #[source]
        source: DecodeError,
    },

    /// Writing to or reading from the transport failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The transport produced something outside the wire format.
    #[error("protocol error: {0}")]
    Protocol(String),
}

/// An event as the host pushed it, before decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent {
    pub name: String,
    pub payload: Value,
}

impl RawEvent {
    pub fn new(name: impl Into<String>, payload: Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }
}

/// The capability the front-end uses to reach the host.
///
/// Passed in at construction rather than looked up globally, so tests and
/// tools can substitute their own.
pub trait HostBridge {
    /// Send `command` and wait for the host's reply.
    fn invoke(&self, command: &Command) -> Result<Reply, BridgeError>;

    /// Take the next event the host pushed, if one is waiting.
    fn try_next_event(&self) -> Option<RawEvent>;
}

impl<B: HostBridge + ?Sized> HostBridge for &B {
    fn invoke(&self, command: &Command) -> Result<Reply, BridgeError> {
        (**self).invoke(command)
    }

    fn try_next_event(&self) -> Option<RawEvent> {
        (**self).try_next_event()
    }
}

impl<B: HostBridge + ?Sized> HostBridge for Box<B> {
    fn invoke(&self, command: &Command) -> Result<Reply, BridgeError> {
        (**self).invoke(command)
    }

    fn try_next_event(&self) -> Option<RawEvent> {
        (**self).try_next_event()
    }
}

impl<B: HostBridge + ?Sized> HostBridge for Rc<B> {
    fn invoke(&self, command: &Command) -> Result<Reply, BridgeError> {
        (**self).invoke(command)
    }

    fn try_next_event(&self) -> Option<RawEvent> {
        (**self).try_next_event()
    }
}

impl<B: HostBridge + ?Sized> HostBridge for Arc<B> {
    fn invoke(&self, command: &Command) -> Result<Reply, BridgeError> {
        (**self).invoke(command)
    }

    fn try_next_event(&self) -> Option<RawEvent> {
        (**self).try_next_event()
    }
}

/// Turn a raw host reply into a [`Reply`], mapping failure statuses and
/// undecodable bodies to [`BridgeError`].
pub(crate) fn finish_reply(
    command: &Command,
    reply: kal_ipc::HostReply,
) -> Result<Reply, BridgeError> {
    let name = command.name().as_str();
    if !reply.is_success() {
        return Err(BridgeError::Host {
            command: name,
            status: reply.status,
            message: reply.error_message(),
        });
    }
    reply.decode().map_err(|source| BridgeError::Decode {
        command: name,
        source,
    })
}
