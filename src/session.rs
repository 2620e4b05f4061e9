//! One launcher window: a controller, its bridge, the event hub and the
//! host-driven theme.

use std::collections::VecDeque;

use kal_ipc::{AccentColor, Config, EventName, HostEvent, OsFamily, Reply, SearchResultItem};
use serde::{Deserialize, Serialize};

use crate::bridge::{BridgeError, EventHub, HostBridge, RawEvent};
use crate::controller::{Controller, KeyInput, ViewEffect};
use crate::render;
use crate::theme::Theme;

/// Everything the host hands the window before the first event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bootstrap {
    #[serde(flatten)]
    pub config: Config,
    #[serde(alias = "customCss", alias = "custom-css")]
    pub custom_css: Option<String>,
    #[serde(alias = "accentColor", alias = "accent-color")]
    pub accent_color: Option<AccentColor>,
}

pub struct Session<B> {
    controller: Controller<B>,
    hub: EventHub,
    theme: Theme,
    os: OsFamily,
    pending: VecDeque<HostEvent>,
}

impl<B: HostBridge> Session<B> {
    pub fn new(bridge: B, bootstrap: Bootstrap, os: OsFamily) -> Self {
        Self {
            controller: Controller::new(bridge, bootstrap.config),
            hub: EventHub::new(),
            theme: Theme::new(bootstrap.accent_color, bootstrap.custom_css),
            os,
            pending: VecDeque::new(),
        }
    }

    pub fn controller(&self) -> &Controller<B> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller<B> {
        &mut self.controller
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn os(&self) -> OsFamily {
        self.os
    }

    /// Register an extra listener. Listeners run after the controller and
    /// theme have applied the event.
    pub fn on(&mut self, name: EventName, handler: impl FnMut(&HostEvent) + 'static) {
        self.hub.on(name, handler);
    }

    /// Queue an event that did not come through the bridge, such as one
    /// read from a script. Undecodable events are dropped.
    pub fn enqueue(&mut self, raw: RawEvent) {
        if let Some(event) = EventHub::decode(raw) {
            self.pending.push_back(event);
        }
    }

    /// Drain queued events in arrival order. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.next_event() {
            self.apply(&event);
            applied += 1;
        }
        applied
    }

    fn next_event(&mut self) -> Option<HostEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }
        loop {
            let raw = self.controller.bridge().try_next_event()?;
            if let Some(event) = EventHub::decode(raw) {
                return Some(event);
            }
        }
    }

    fn apply(&mut self, event: &HostEvent) {
        tracing::trace!(event = %event.name(), "applying host event");
        self.controller.handle_event(event);
        self.theme.apply(event);
        self.hub.dispatch(event);
    }

    /// The input text changed.
    ///
    /// Some hosts answer `Search` with the result list instead of pushing
    /// it. Such a reply is queued as a `Results` event so it is applied on
    /// the next [`Session::pump`], never synchronously.
    pub fn input(&mut self, text: impl Into<String>) -> Result<(), BridgeError> {
        let reply = self.controller.on_query_changed(text)?;
        // An empty query sent `ClearResults`; its reply must not refill the list.
        if self.controller.query().is_empty() {
            return Ok(());
        }
        if !matches!(&reply, Reply::Json(value) if value.is_array()) {
            return Ok(());
        }
        match reply.json_as::<Vec<SearchResultItem>>() {
            Some(Ok(items)) => self.pending.push_back(HostEvent::Results(items)),
            Some(Err(err)) => tracing::warn!(error = %err, "ignoring malformed search reply"),
            None => {}
        }
        Ok(())
    }

    /// Route a key press. See [`Controller::handle_key`].
    pub fn key(&mut self, input: KeyInput) -> Result<bool, BridgeError> {
        self.controller.handle_key(input)
    }

    pub fn take_effects(&mut self) -> Vec<ViewEffect> {
        self.controller.take_effects()
    }

    /// The whole window as an HTML document.
    #[must_use]
    pub fn render(&self) -> String {
        render::render_page(
            &self.controller.view(),
            self.controller.config(),
            &self.theme,
            self.os,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use kal_ipc::{Command, Icon};
    use serde_json::json;

    use super::*;
    use crate::bridge::testing::RecordingBridge;
    use crate::controller::Key;

    fn item(id: &str) -> SearchResultItem {
        SearchResultItem::new(id, id.to_uppercase(), "", Icon::svg("<svg/>"))
    }

    fn session() -> Session<Rc<RecordingBridge>> {
        Session::new(
            Rc::new(RecordingBridge::new()),
            Bootstrap::default(),
            OsFamily::Unix,
        )
    }

    #[test]
    fn pump_applies_events_in_arrival_order() {
        let mut session = session();
        let bridge = Rc::clone(session.controller().bridge());
        bridge.push(&HostEvent::Results(vec![item("a"), item("b")]));
        bridge.push(&HostEvent::Results(vec![item("c")]));

        assert_eq!(session.pump(), 2);
        let ids: Vec<_> = session
            .controller()
            .results()
            .iter()
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(ids, ["c"]);
        assert_eq!(session.controller().selection(), Some(0));
    }

    #[test]
    fn undecodable_events_are_skipped() {
        let mut session = session();
        let bridge = Rc::clone(session.controller().bridge());
        bridge.push_raw(RawEvent::new("Nope", json!(null)));
        bridge.push_raw(RawEvent::new("Results", json!({"not": "a list"})));
        bridge.push(&HostEvent::FocusInput);

        assert_eq!(session.pump(), 1);
        assert_eq!(session.take_effects(), vec![ViewEffect::FocusInput]);
    }

    #[test]
    fn listeners_run_after_state_is_updated() {
        let mut session = session();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        session.on(EventName::UpdateCustomCss, move |event| {
            sink.borrow_mut().push(event.name());
        });

        let bridge = Rc::clone(session.controller().bridge());
        bridge.push(&HostEvent::UpdateCustomCss("main { color: red }".into()));
        session.pump();

        assert_eq!(*seen.borrow(), [EventName::UpdateCustomCss]);
        assert_eq!(session.theme().custom_css(), Some("main { color: red }"));
    }

    #[test]
    fn search_reply_with_results_is_deferred_to_pump() {
        let mut session = session();
        let bridge = Rc::clone(session.controller().bridge());
        bridge.reply_with(Reply::Json(json!([
            {"primary_text": "Files", "secondary_text": "", "icon": {"type": "Default", "data": ""}, "needs_confirmation": false, "id": "files"}
        ])));

        session.input("fi").unwrap();
        assert!(session.controller().results().is_empty());
        assert_eq!(bridge.sent(), vec![Command::Search("fi".into())]);

        session.pump();
        assert_eq!(session.controller().results().len(), 1);
        assert_eq!(session.controller().results()[0].id, "files");
    }

    #[test]
    fn clear_reply_never_refills_results() {
        let mut session = session();
        let bridge = Rc::clone(session.controller().bridge());
        session.enqueue(RawEvent::new("Results", json!([item("a")])));
        session.pump();
        bridge.reply_with(Reply::Json(json!([item("stale")])));

        session.input("").unwrap();
        session.pump();

        assert!(session.controller().results().is_empty());
        assert_eq!(session.controller().selection(), None);
        assert_eq!(bridge.sent(), vec![Command::ClearResults]);
    }

    #[test]
    fn local_events_run_before_bridge_events() {
        let mut session = session();
        let bridge = Rc::clone(session.controller().bridge());
        bridge.push(&HostEvent::Results(vec![item("late")]));
        session.enqueue(RawEvent::new("Results", json!([item("early")])));
        session.enqueue(RawEvent::new("Bogus", json!(null)));

        assert_eq!(session.pump(), 2);
        assert_eq!(session.controller().results()[0].id, "late");
    }

    #[test]
    fn keys_reach_the_controller() {
        let mut session = session();
        let bridge = Rc::clone(session.controller().bridge());
        assert!(session.key(KeyInput::new(Key::Escape)).unwrap());
        assert_eq!(bridge.sent(), vec![Command::HideMainWindow]);
    }

    #[test]
    fn bootstrap_seeds_theme_and_config() {
        let bootstrap: Bootstrap = serde_json::from_value(json!({
            "general": {"maxResults": 10},
            "customCss": "body { margin: 0 }",
            "accentColor": "purple"
        }))
        .unwrap();
        let session = Session::new(RecordingBridge::new(), bootstrap, OsFamily::Unix);

        assert_eq!(session.controller().config().general.max_results, 10);
        let page = session.render();
        assert!(page.contains("--accent: purple;"));
        assert!(page.contains("body { margin: 0 }"));
    }
}
