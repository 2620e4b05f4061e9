use serde::{Deserialize, Serialize};

use crate::icon::Icon;

/// An executable action offered for a result item.
///
/// The first action of an item is its default action, the one triggered by
/// a plain execute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<Icon>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accelerator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Action {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            icon: None,
            accelerator: None,
            description: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_accelerator(mut self, accelerator: impl Into<String>) -> Self {
        self.accelerator = Some(accelerator.into());
        self
    }
}

/// One selectable entry produced by the host in response to a query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub primary_text: String,
    pub secondary_text: String,
    pub icon: Icon,
    #[serde(default)]
    pub needs_confirmation: bool,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
}

impl SearchResultItem {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        primary_text: impl Into<String>,
        secondary_text: impl Into<String>,
        icon: Icon,
    ) -> Self {
        Self {
            primary_text: primary_text.into(),
            secondary_text: secondary_text.into(),
            icon,
            needs_confirmation: false,
            id: id.into(),
            tooltip: None,
            actions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.actions = actions.into_iter().collect();
        self
    }

    #[must_use]
    pub fn needing_confirmation(mut self) -> Self {
        self.needs_confirmation = true;
        self
    }

    /// The action a plain execute runs, if the item offers any.
    #[must_use]
    pub fn default_action(&self) -> Option<&Action> {
        self.actions.first()
    }

    /// Return the action at `index`, if the item has that many.
    #[must_use]
    pub fn action(&self, index: usize) -> Option<&Action> {
        self.actions.get(index)
    }
}
