//! Selection and query state for the launcher window.
//!
//! The [`Controller`] owns the query text, the result list the host last
//! pushed and the selected row. Keyboard and input events either change that
//! state locally or become commands sent through the [`HostBridge`]. Effects
//! that need the rendered view (scrolling, focusing the input) are queued as
//! [`ViewEffect`]s for whoever owns the view.
//!
//! Results only ever arrive through [`Controller::on_results_pushed`]; a
//! query change never fills the list synchronously. No request id ties a
//! push to the query that caused it, so the most recent push wins.

use kal_ipc::{Command, Config, ExecuteTarget, HostEvent, Reply, SearchResultItem};

use crate::bridge::{BridgeError, HostBridge};

mod keys;
#[cfg(test)]
mod tests;

pub use keys::{Key, KeyInput, ParseKeyError};

/// Direction of a keyboard navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// How a row should be brought into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
}

/// Which edge of the viewport a scrolled row aligns to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBlock {
    Nearest,
}

/// Request to scroll the row at `index` into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub index: usize,
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

impl ScrollRequest {
    #[must_use]
    pub fn nearest(index: usize) -> Self {
        Self {
            index,
            behavior: ScrollBehavior::Smooth,
            block: ScrollBlock::Nearest,
        }
    }
}

/// Side effects on the rendered view, drained with
/// [`Controller::take_effects`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEffect {
    ScrollIntoView(ScrollRequest),
    /// Focus the query input and select all of its text.
    FocusInput,
}

/// Query, results and selection for one launcher window.
#[derive(Debug)]
pub struct Controller<B> {
    bridge: B,
    config: Config,
    query: String,
    results: Vec<SearchResultItem>,
    selection: Option<usize>,
    action_cursor: usize,
    refreshing: bool,
    effects: Vec<ViewEffect>,
}

impl<B: HostBridge> Controller<B> {
    pub fn new(bridge: B, config: Config) -> Self {
        Self {
            bridge,
            config,
            query: String::new(),
            results: Vec::new(),
            selection: None,
            action_cursor: 0,
            refreshing: false,
            effects: Vec::new(),
        }
    }

    pub fn bridge(&self) -> &B {
        &self.bridge
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[SearchResultItem] {
        &self.results
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn selected_item(&self) -> Option<&SearchResultItem> {
        self.results.get(self.selection?)
    }

    /// Index of the highlighted action within the selected item.
    pub fn action_cursor(&self) -> usize {
        self.action_cursor
    }

    /// Whether an index refresh is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    /// Drain the view effects queued since the last call.
    pub fn take_effects(&mut self) -> Vec<ViewEffect> {
        std::mem::take(&mut self.effects)
    }

    /// The input text changed. Every change is dispatched; throttling, if
    /// any, is the host's business.
    pub fn on_query_changed(&mut self, text: impl Into<String>) -> Result<Reply, BridgeError> {
        self.query = text.into();
        if self.query.is_empty() {
            self.replace_results(Vec::new());
            self.dispatch(&Command::ClearResults)
        } else {
            self.dispatch(&Command::Search(self.query.clone()))
        }
    }

    /// The host pushed a new result list.
    pub fn on_results_pushed(&mut self, items: Vec<SearchResultItem>) {
        tracing::debug!(count = items.len(), "results pushed");
        self.replace_results(items);
    }

    /// Move the selection one row, wrapping at both ends, and ask the view
    /// to scroll the new row into view. Does nothing without results.
    pub fn on_navigate(&mut self, direction: Direction) -> Option<usize> {
        let len = self.results.len();
        if len == 0 {
            return None;
        }

        let current = self.selection.unwrap_or(0).min(len - 1);
        let next = match direction {
            Direction::Next => (current + 1) % len,
            Direction::Previous => (current + len - 1) % len,
        };
        self.select(next);
        self.effects
            .push(ViewEffect::ScrollIntoView(ScrollRequest::nearest(next)));
        Some(next)
    }

    /// Run the selected item, or its highlighted action when it has any.
    ///
    /// `modifier` asks the host to keep the window open afterwards. Items
    /// flagged `needs_confirmation` are confirmed by the host, not here.
    pub fn on_execute(&mut self, modifier: bool) -> Result<(), BridgeError> {
        let Some(item) = self.selected_item() else {
            return Ok(());
        };

        let target = match item.action(self.action_cursor) {
            Some(action) => ExecuteTarget::action(&action.id, &item.id),
            None => ExecuteTarget::item(&item.id),
        };
        self.dispatch(&Command::Execute { target, modifier }).map(drop)
    }

    /// Reveal the selected item in the file manager.
    pub fn on_show_in_dir(&mut self) -> Result<(), BridgeError> {
        let Some(index) = self.selection else {
            return Ok(());
        };
        self.dispatch(&Command::ShowItemInDir(index)).map(drop)
    }

    /// Ask the host to hide the window. Local state is kept; the host
    /// resets it on the next show.
    pub fn on_escape(&mut self) -> Result<(), BridgeError> {
        self.dispatch(&Command::HideMainWindow).map(drop)
    }

    /// The host wants the window ready for a new query.
    pub fn on_focus_requested(&mut self) {
        self.effects.push(ViewEffect::FocusInput);
    }

    /// Ask the host to rebuild its index. The refreshing flag stays set
    /// until the host reports completion.
    pub fn on_refresh_index(&mut self) -> Result<(), BridgeError> {
        self.refreshing = true;
        let result = self.dispatch(&Command::RefreshIndex);
        if result.is_err() {
            self.refreshing = false;
        }
        result.map(drop)
    }

    /// Move the highlighted action of the selected item, wrapping. Returns
    /// the new cursor, or `None` when the item has no actions to cycle.
    pub fn on_cycle_action(&mut self, direction: Direction) -> Option<usize> {
        let count = self.selected_item()?.actions.len();
        if count == 0 {
            return None;
        }
        let current = self.action_cursor.min(count - 1);
        self.action_cursor = match direction {
            Direction::Next => (current + 1) % count,
            Direction::Previous => (current + count - 1) % count,
        };
        Some(self.action_cursor)
    }

    pub fn on_config_updated(&mut self, config: Config) {
        self.config = config;
    }

    /// Apply an event pushed by the host. Theme events are ignored here.
    pub fn handle_event(&mut self, event: &HostEvent) {
        match event {
            HostEvent::FocusInput => self.on_focus_requested(),
            HostEvent::Results(items) => self.on_results_pushed(items.clone()),
            HostEvent::ClearResults => self.on_results_pushed(Vec::new()),
            HostEvent::UpdateConfig(config) => self.on_config_updated((**config).clone()),
            HostEvent::RefreshingIndexFinished => self.refreshing = false,
            HostEvent::UpdateSystemAccentColor(_) | HostEvent::UpdateCustomCss(_) => {}
        }
    }

    fn replace_results(&mut self, items: Vec<SearchResultItem>) {
        self.selection = if items.is_empty() { None } else { Some(0) };
        self.results = items;
        self.action_cursor = 0;
    }

    fn select(&mut self, index: usize) {
        if self.selection != Some(index) {
            self.action_cursor = 0;
        }
        self.selection = Some(index);
    }

    fn dispatch(&self, command: &Command) -> Result<Reply, BridgeError> {
        tracing::debug!(command = %command.name(), "dispatching command");
        self.bridge.invoke(command).inspect_err(|err| {
            tracing::warn!(command = %command.name(), error = %err, "host command failed");
        })
    }
}
