//! Commands the front-end sends to the host.
//!
//! Each command travels as a name plus a byte body. Positional arguments
//! are concatenated: strings as UTF-8 and booleans as a single `1`/`0`
//! byte.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::protocol::{IPC_PROTOCOL, OsFamily};
use crate::wire::HostRequest;

/// Separator between an action id and an item id in an execute target.
pub const ACTION_SEPARATOR: char = '#';

/// Wire names of every command in the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandName {
    Search,
    ClearResults,
    Execute,
    ShowItemInDir,
    RefreshIndex,
    HideMainWindow,
}

impl CommandName {
    pub const ALL: [Self; 6] = [
        Self::Search,
        Self::ClearResults,
        Self::Execute,
        Self::ShowItemInDir,
        Self::RefreshIndex,
        Self::HideMainWindow,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::ClearResults => "ClearResults",
            Self::Execute => "Execute",
            Self::ShowItemInDir => "ShowItemInDir",
            Self::RefreshIndex => "RefreshIndex",
            Self::HideMainWindow => "HideMainWindow",
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandName {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| DecodeError::UnknownCommand(s.to_string()))
    }
}

/// What an execute command should run: an item's default behaviour, or one
/// specific action of that item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecuteTarget {
    pub item_id: String,
    pub action_id: Option<String>,
}

impl ExecuteTarget {
    #[must_use]
    pub fn item(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            action_id: None,
        }
    }

    #[must_use]
    pub fn action(action_id: impl Into<String>, item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            action_id: Some(action_id.into()),
        }
    }

    /// Parse the `actionId#itemId` (or bare `itemId`) form.
    ///
    /// Item ids may themselves contain the separator, so only the first one
    /// splits.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.split_once(ACTION_SEPARATOR) {
            Some((action, item)) => Self::action(action, item),
            None => Self::item(raw),
        }
    }
}

impl fmt::Display for ExecuteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.action_id {
            Some(action) => write!(f, "{action}{ACTION_SEPARATOR}{}", self.item_id),
            None => f.write_str(&self.item_id),
        }
    }
}

/// A command addressed to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Request a new result set for `query`.
    Search(String),
    /// Discard the current results.
    ClearResults,
    /// Run the target. `modifier` asks the host to keep the window open.
    Execute {
        target: ExecuteTarget,
        modifier: bool,
    },
    /// Reveal the item at this selection index in the file manager.
    ShowItemInDir(usize),
    /// Ask the host to rebuild its index.
    RefreshIndex,
    /// Hide the launcher window.
    HideMainWindow,
}

impl Command {
    #[must_use]
    pub fn name(&self) -> CommandName {
        match self {
            Self::Search(_) => CommandName::Search,
            Self::ClearResults => CommandName::ClearResults,
            Self::Execute { .. } => CommandName::Execute,
            Self::ShowItemInDir(_) => CommandName::ShowItemInDir,
            Self::RefreshIndex => CommandName::RefreshIndex,
            Self::HideMainWindow => CommandName::HideMainWindow,
        }
    }

    /// Serialize the positional arguments into the request body.
    #[must_use]
    pub fn encode_body(&self) -> Vec<u8> {
        let mut body = Vec::new();
        match self {
            Self::Search(query) => push_str(&mut body, query),
            Self::Execute { target, modifier } => {
                push_bool(&mut body, *modifier);
                push_str(&mut body, &target.to_string());
            }
            Self::ShowItemInDir(index) => push_str(&mut body, &index.to_string()),
            Self::ClearResults | Self::RefreshIndex | Self::HideMainWindow => {}
        }
        body
    }

    /// Decode a command from its wire name and body, as the host does.
    pub fn decode(name: CommandName, body: &[u8]) -> Result<Self, DecodeError> {
        let text = |command: &'static str, bytes: &[u8]| {
            std::str::from_utf8(bytes)
                .map(str::to_string)
                .map_err(|err| DecodeError::invalid_utf8(command, err))
        };

        let command = match name {
            CommandName::Search => Self::Search(text(name.as_str(), body)?),
            CommandName::ClearResults => Self::ClearResults,
            CommandName::Execute => {
                let (&flag, rest) = body.split_first().ok_or(DecodeError::MissingArgument {
                    command: name.as_str(),
                    argument: "the modifier flag",
                })?;
                let target = text(name.as_str(), rest)?;
                Self::Execute {
                    target: ExecuteTarget::parse(&target),
                    modifier: flag == 1,
                }
            }
            CommandName::ShowItemInDir => {
                let raw = text(name.as_str(), body)?;
                let index = raw.trim().parse::<usize>().map_err(|_| DecodeError::InvalidIndex {
                    command: name.as_str(),
                    value: raw.clone(),
                })?;
                Self::ShowItemInDir(index)
            }
            CommandName::RefreshIndex => Self::RefreshIndex,
            CommandName::HideMainWindow => Self::HideMainWindow,
        };
        Ok(command)
    }

    /// Build the request a protocol-URL transport posts for this command.
    #[must_use]
    pub fn to_request(&self, os: OsFamily) -> HostRequest {
        let name = self.name();
        HostRequest {
            command: name,
            url: os.protocol_url(IPC_PROTOCOL, name.as_str()),
            content_type: HostRequest::CONTENT_TYPE.to_string(),
            body: self.encode_body(),
        }
    }
}

fn push_str(body: &mut Vec<u8>, value: &str) {
    body.extend_from_slice(value.as_bytes());
}

fn push_bool(body: &mut Vec<u8>, value: bool) {
    body.push(u8::from(value));
}
