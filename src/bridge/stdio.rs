//! Transport to a host running as a child process.
//!
//! Both directions use JSON lines. The front-end writes
//! `{"id", "command", "body"}` to the child's stdin, with the command body
//! base64-encoded. The child writes either replies,
//! `{"reply": id, "status", "content_type", "body"}`, or pushed events,
//! `{"event": name, "payload": ...}`, to its stdout. A reader thread routes
//! replies to the waiting caller and queues events.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::process::{Child, Command as Process, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, SyncSender, TryRecvError};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use kal_ipc::{Command, HostReply, Reply};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{BridgeError, HostBridge, RawEvent, finish_reply};

/// Waiting callers keyed by request id. `None` once the reader has stopped,
/// so late callers fail instead of waiting forever.
type PendingReplies = Arc<Mutex<Option<HashMap<u64, SyncSender<HostReply>>>>>;

#[derive(Serialize)]
struct OutboundLine<'a> {
    id: u64,
    command: &'static str,
    body: &'a str,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InboundLine {
    Reply {
        reply: u64,
        status: u16,
        #[serde(default)]
        content_type: Option<String>,
        #[serde(default)]
        body: String,
    },
    Event {
        event: String,
        #[serde(default)]
        payload: Value,
    },
}

/// Bridge to a host process speaking JSON lines over stdio.
pub struct StdioBridge {
    child: Option<Child>,
    /// `None` once the bridge is shutting down.
    writer: Mutex<Option<Box<dyn Write + Send>>>,
    pending: PendingReplies,
    events: Receiver<RawEvent>,
    next_id: AtomicU64,
    reader: Option<JoinHandle<()>>,
}

impl StdioBridge {
    /// Spawn `program` with `args` and connect to its stdio.
    pub fn spawn<I, S>(program: impl AsRef<OsStr>, args: I) -> io::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let program = program.as_ref();
        let mut child = Process::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::other("host stdin was not captured"))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("host stdout was not captured"))?;

        tracing::info!(program = %program.to_string_lossy(), pid = child.id(), "spawned host process");

        let mut bridge = Self::from_streams(stdout, stdin);
        bridge.child = Some(child);
        Ok(bridge)
    }

    /// Connect over an arbitrary reader/writer pair.
    pub fn from_streams(
        reader: impl Read + Send + 'static,
        writer: impl Write + Send + 'static,
    ) -> Self {
        let pending: PendingReplies = Arc::new(Mutex::new(Some(HashMap::new())));
        let (event_tx, event_rx) = mpsc::channel();
        let reader_pending = Arc::clone(&pending);
        let reader = thread::spawn(move || read_loop(reader, &reader_pending, &event_tx));

        Self {
            child: None,
            writer: Mutex::new(Some(Box::new(writer))),
            pending,
            events: event_rx,
            next_id: AtomicU64::new(0),
            reader: Some(reader),
        }
    }

    fn register(&self, id: u64) -> Result<Receiver<HostReply>, BridgeError> {
        let (tx, rx) = mpsc::sync_channel(1);
        let mut pending = self
            .pending
            .lock()
            .map_err(|_| BridgeError::Protocol("pending reply table poisoned".into()))?;
        let table = pending.as_mut().ok_or(BridgeError::Disconnected)?;
        table.insert(id, tx);
        Ok(rx)
    }

    fn forget(&self, id: u64) {
        if let Ok(mut pending) = self.pending.lock()
            && let Some(table) = pending.as_mut()
        {
            table.remove(&id);
        }
    }

    fn write_line(&self, line: &[u8]) -> Result<(), BridgeError> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| BridgeError::Protocol("host writer poisoned".into()))?;
        let writer = writer.as_mut().ok_or(BridgeError::Disconnected)?;
        match write_framed(&mut **writer, line) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Err(BridgeError::Disconnected),
            Err(err) => Err(err.into()),
        }
    }
}

impl HostBridge for StdioBridge {
    fn invoke(&self, command: &Command) -> Result<Reply, BridgeError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = BASE64.encode(command.encode_body());
        let line = serde_json::to_vec(&OutboundLine {
            id,
            command: command.name().as_str(),
            body: &body,
        })
        .map_err(|err| BridgeError::Protocol(err.to_string()))?;

        let reply_rx = self.register(id)?;
        if let Err(err) = self.write_line(&line) {
            self.forget(id);
            return Err(err);
        }

        tracing::debug!(id, command = %command.name(), "waiting for host reply");
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

impl Drop for StdioBridge {
    fn drop(&mut self) {
        // Close our end first so a peer waiting for EOF can finish and let
        // the reader thread stop.
        *self.writer.get_mut().unwrap_or_else(PoisonError::into_inner) = None;
        if let Some(mut child) = self.child.take() {
            if let Err(err) = child.kill() {
                tracing::debug!(error = %err, "host process already exited");
            }
            let _ = child.wait();
        }
        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
        }
    }
}

impl std::fmt::Debug for StdioBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdioBridge")
            .field("pid", &self.child.as_ref().map(Child::id))
            .field("next_id", &self.next_id.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

fn write_framed(writer: &mut dyn Write, line: &[u8]) -> io::Result<()> {
    writer.write_all(line)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

fn read_loop(reader: impl Read, pending: &PendingReplies, events: &Sender<RawEvent>) {
    for line in BufReader::new(reader).lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                tracing::error!(error = %err, "failed to read from host");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<InboundLine>(&line) {
            Ok(InboundLine::Event { event, payload }) => {
                if events.send(RawEvent::new(event, payload)).is_err() {
                    break;
                }
            }
            Ok(InboundLine::Reply {
                reply,
                status,
                content_type,
                body,
            }) => deliver_reply(pending, reply, status, content_type, &body),
            Err(err) => tracing::warn!(error = %err, line = %line, "ignoring malformed host line"),
        }
    }

    // Dropping the senders wakes every caller still waiting.
    if let Ok(mut pending) = pending.lock() {
        pending.take();
    }
    tracing::debug!("host output closed");
}

fn deliver_reply(
    pending: &PendingReplies,
    id: u64,
    status: u16,
    content_type: Option<String>,
    body: &str,
) {
    let waiter = pending
        .lock()
        .ok()
        .and_then(|mut pending| pending.as_mut().and_then(|table| table.remove(&id)));
    let Some(waiter) = waiter else {
        tracing::warn!(id, "reply for unknown request");
        return;
    };

    let reply = match BASE64.decode(body.trim()) {
        Ok(body) => HostReply {
            status,
            content_type,
            body,
        },
        Err(err) => HostReply::error(format!("reply body is not valid base64: {err}")),
    };
    let _ = waiter.send(reply);
}
