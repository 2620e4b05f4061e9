use std::collections::HashMap;

use kal_ipc::{EventName, HostEvent};

use super::RawEvent;

/// Callback invoked for a pushed event.
pub type EventHandler = Box<dyn FnMut(&HostEvent)>;

/// Registry of event handlers for one window session.
///
/// Handlers live as long as the hub; there is no way to remove one.
#[derive(Default)]
pub struct EventHub {
    handlers: HashMap<EventName, Vec<EventHandler>>,
}

impl EventHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for every future `name` event. Handlers for the
    /// same name run in registration order.
    pub fn on(&mut self, name: EventName, handler: impl FnMut(&HostEvent) + 'static) {
        self.handlers
            .entry(name)
            .or_default()
            .push(Box::new(handler));
    }

    /// Number of handlers registered for `name`.
    #[must_use]
    pub fn handler_count(&self, name: EventName) -> usize {
        self.handlers.get(&name).map_or(0, Vec::len)
    }

    /// Run every handler registered for the event's name.
    pub fn dispatch(&mut self, event: &HostEvent) {
        let Some(handlers) = self.handlers.get_mut(&event.name()) else {
            return;
        };
        for handler in handlers.iter_mut() {
            handler(event);
        }
    }

    /// Decode a raw event at the boundary. Events that do not decode are
    /// logged and dropped.
    #[must_use]
    pub fn decode(raw: RawEvent) -> Option<HostEvent> {
        match HostEvent::decode(&raw.name, raw.payload) {
            Ok(event) => Some(event),
            Err(err) => {
                tracing::warn!(event = %raw.name, error = %err, "dropping undecodable host event");
                None
            }
        }
    }

    /// Decode `raw` and dispatch it, returning the decoded event.
    pub fn dispatch_raw(&mut self, raw: RawEvent) -> Option<HostEvent> {
        let event = Self::decode(raw)?;
        self.dispatch(&event);
        Some(event)
    }
}

impl std::fmt::Debug for EventHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<_> = self
            .handlers
            .iter()
            .map(|(name, handlers)| (name.as_str(), handlers.len()))
            .collect();
        counts.sort_unstable();
        f.debug_struct("EventHub").field("handlers", &counts).finish()
    }
}
