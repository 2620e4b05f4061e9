//! Events the host pushes to the front-end.
//!
//! The host delivers an event as a name plus a JSON payload. Decoding turns
//! that pair into [`HostEvent`], a closed union with one payload shape per
//! name, so nothing past this boundary handles untyped payloads.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::accent::AccentColor;
use crate::config::Config;
use crate::error::DecodeError;
use crate::result_item::SearchResultItem;

/// Wire names of every event in the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventName {
    FocusInput,
    Results,
    ClearResults,
    UpdateConfig,
    UpdateSystemAccentColor,
    #[serde(rename = "UpdateCustomCSS")]
    UpdateCustomCss,
    RefreshingIndexFinished,
}

impl EventName {
    pub const ALL: [Self; 7] = [
        Self::FocusInput,
        Self::Results,
        Self::ClearResults,
        Self::UpdateConfig,
        Self::UpdateSystemAccentColor,
        Self::UpdateCustomCss,
        Self::RefreshingIndexFinished,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FocusInput => "FocusInput",
            Self::Results => "Results",
            Self::ClearResults => "ClearResults",
            Self::UpdateConfig => "UpdateConfig",
            Self::UpdateSystemAccentColor => "UpdateSystemAccentColor",
            Self::UpdateCustomCss => "UpdateCustomCSS",
            Self::RefreshingIndexFinished => "RefreshingIndexFinished",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventName {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "UpdateSystemAccentColors" {
            return Ok(Self::UpdateSystemAccentColor);
        }
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| DecodeError::UnknownEvent(s.to_string()))
    }
}

/// An event pushed by the host, decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// Focus the query input and select its text.
    FocusInput,
    /// Replace the result list.
    Results(Vec<SearchResultItem>),
    /// Empty the result list.
    ClearResults,
    /// Replace the configuration.
    UpdateConfig(Box<Config>),
    /// Update the theme accent colour.
    UpdateSystemAccentColor(AccentColor),
    /// Replace the injected user stylesheet.
    UpdateCustomCss(String),
    /// The index refresh the front-end requested has completed.
    RefreshingIndexFinished,
}

impl HostEvent {
    #[must_use]
    pub fn name(&self) -> EventName {
        match self {
            Self::FocusInput => EventName::FocusInput,
            Self::Results(_) => EventName::Results,
            Self::ClearResults => EventName::ClearResults,
            Self::UpdateConfig(_) => EventName::UpdateConfig,
            Self::UpdateSystemAccentColor(_) => EventName::UpdateSystemAccentColor,
            Self::UpdateCustomCss(_) => EventName::UpdateCustomCss,
            Self::RefreshingIndexFinished => EventName::RefreshingIndexFinished,
        }
    }

    /// Decode an event from its wire name and JSON payload.
    ///
    /// Events without a payload ignore whatever the host sent along.
    pub fn decode(name: &str, payload: Value) -> Result<Self, DecodeError> {
        let name: EventName = name.parse()?;
        let event = match name {
            EventName::FocusInput => Self::FocusInput,
            EventName::ClearResults => Self::ClearResults,
            EventName::RefreshingIndexFinished => Self::RefreshingIndexFinished,
            EventName::Results => Self::Results(payload_as(name, payload)?),
            EventName::UpdateConfig => Self::UpdateConfig(Box::new(payload_as(name, payload)?)),
            EventName::UpdateSystemAccentColor => {
                Self::UpdateSystemAccentColor(payload_as(name, payload)?)
            }
            EventName::UpdateCustomCss => Self::UpdateCustomCss(match payload {
                Value::Null => String::new(),
                other => payload_as(name, other)?,
            }),
        };
        Ok(event)
    }

    /// The JSON payload the host would send for this event.
    pub fn payload(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::FocusInput | Self::ClearResults | Self::RefreshingIndexFinished => {
                Ok(Value::Null)
            }
            Self::Results(items) => serde_json::to_value(items),
            Self::UpdateConfig(config) => serde_json::to_value(config),
            Self::UpdateSystemAccentColor(color) => serde_json::to_value(color),
            Self::UpdateCustomCss(css) => Ok(Value::String(css.clone())),
        }
    }
}

fn payload_as<T: DeserializeOwned>(name: EventName, payload: Value) -> Result<T, DecodeError> {
    serde_json::from_value(payload).map_err(|err| DecodeError::payload(name.as_str(), err))
}
