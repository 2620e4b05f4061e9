//! In-process transport for hosts running in the same process, on another
//! thread.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, SyncSender, TryRecvError};
use std::time::Duration;

use kal_ipc::{Command, DecodeError, HostEvent, HostReply, HostRequest, OsFamily, Reply};

use super::{BridgeError, HostBridge, RawEvent, finish_reply};

/// One request waiting for the host's answer.
#[derive(Debug)]
pub struct HostCall {
    pub request: HostRequest,
    reply: SyncSender<HostReply>,
}

impl HostCall {
    /// Decode the command carried by this call.
    pub fn command(&self) -> Result<Command, DecodeError> {
        Command::decode(self.request.command, &self.request.body)
    }

    /// Answer the call. Returns `false` when the caller stopped waiting.
    pub fn respond(self, reply: HostReply) -> bool {
        self.reply.send(reply).is_ok()
    }
}

/// Front-end half of an in-process connection.
#[derive(Debug)]
pub struct ChannelBridge {
    os: OsFamily,
    calls: Sender<HostCall>,
    events: Receiver<RawEvent>,
}

/// Host half of an in-process connection.
#[derive(Debug)]
pub struct HostEndpoint {
    calls: Receiver<HostCall>,
    events: Sender<RawEvent>,
}

/// Create a connected bridge/endpoint pair.
#[must_use]
pub fn channel(os: OsFamily) -> (ChannelBridge, HostEndpoint) {
    let (call_tx, call_rx) = mpsc::channel();
    let (event_tx, event_rx) = mpsc::channel();
    (
        ChannelBridge {
            os,
            calls: call_tx,
            events: event_rx,
        },
        HostEndpoint {
            calls: call_rx,
            events: event_tx,
        },
    )
}

impl HostBridge for ChannelBridge {
    fn invoke(&self, command: &Command) -> Result<Reply, BridgeError> {
        let (reply_tx, reply_rx) = mpsc::sync_channel(1);
        let call = HostCall {
            request: command.to_request(self.os),
            reply: reply_tx,
        };
        self.calls
            .send(call)
            .map_err(|_| BridgeError::Disconnected)?;
        let reply = reply_rx.recv().map_err(|_| BridgeError::Disconnected)?;
        finish_reply(command, reply)
    }

    fn try_next_event(&self) -> Option<RawEvent> {
        match self.events.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}

impl HostEndpoint {
    /// Block until the front-end sends a call. `None` once it is gone.
    pub fn recv(&self) -> Option<HostCall> {
        self.calls.recv().ok()
    }

    /// Wait up to `timeout` for the next call.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<HostCall, RecvTimeoutError> {
        self.calls.recv_timeout(timeout)
    }

    /// Push an event to the front-end. Returns `false` when it is gone.
    pub fn push(&self, event: &HostEvent) -> bool {
        match event.payload() {
            Ok(payload) => self.push_raw(RawEvent::new(event.name().as_str(), payload)),
            Err(err) => {
                tracing::error!(event = %event.name(), error = %err, "failed to encode event payload");
                false
            }
        }
    }

    /// Push an event exactly as given, without validating it.
    pub fn push_raw(&self, event: RawEvent) -> bool {
        self.events.send(event).is_ok()
    }
}
