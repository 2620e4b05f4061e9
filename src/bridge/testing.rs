use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use kal_ipc::{Command, HostEvent, Reply};

use super::{BridgeError, HostBridge, RawEvent};

/// Fake bridge that records every command and answers from a script.
#[derive(Default)]
pub(crate) struct RecordingBridge {
    sent: RefCell<Vec<Command>>,
    replies: RefCell<VecDeque<Reply>>,
    events: RefCell<VecDeque<RawEvent>>,
    disconnected: Cell<bool>,
}

impl RecordingBridge {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn sent(&self) -> Vec<Command> {
        self.sent.borrow().clone()
    }

    pub(crate) fn clear(&self) {
        self.sent.borrow_mut().clear();
    }

    pub(crate) fn reply_with(&self, reply: Reply) {
        self.replies.borrow_mut().push_back(reply);
    }

    pub(crate) fn push(&self, event: &HostEvent) {
        let payload = event.payload().expect("encodable payload");
        self.events
            .borrow_mut()
            .push_back(RawEvent::new(event.name().as_str(), payload));
    }

    pub(crate) fn push_raw(&self, event: RawEvent) {
        self.events.borrow_mut().push_back(event);
    }

    pub(crate) fn disconnect(&self) {
        self.disconnected.set(true);
    }
}

impl HostBridge for RecordingBridge {
    fn invoke(&self, command: &Command) -> Result<Reply, BridgeError> {
        if self.disconnected.get() {
            return Err(BridgeError::Disconnected);
        }
        self.sent.borrow_mut().push(command.clone());
        Ok(self.replies.borrow_mut().pop_front().unwrap_or(Reply::Empty))
    }

    fn try_next_event(&self) -> Option<RawEvent> {
        self.events.borrow_mut().pop_front()
    }
}
