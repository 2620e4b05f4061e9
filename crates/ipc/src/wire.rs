//! Request and reply envelopes exchanged with the host.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::command::CommandName;
use crate::error::DecodeError;

/// A command serialized for transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostRequest {
    pub command: CommandName,
    pub url: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl HostRequest {
    pub const CONTENT_TYPE: &'static str = "application/octet-stream";
}

/// The raw reply the host sends back for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostReply {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HostReply {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            status: 200,
            content_type: None,
            body: Vec::new(),
        }
    }

    pub fn json(value: &impl Serialize) -> Result<Self, serde_json::Error> {
        Ok(Self {
            status: 200,
            content_type: Some("application/json".to_string()),
            body: serde_json::to_vec(value)?,
        })
    }

    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            status: 200,
            content_type: Some("text/plain".to_string()),
            body: text.into().into_bytes(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: 500,
            ..Self::text(message)
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Interpret the body according to its content type. A missing content
    /// type means raw bytes.
    pub fn decode(self) -> Result<Reply, DecodeError> {
        let Some(content_type) = self.content_type.as_deref() else {
            return Ok(Reply::from_bytes(self.body));
        };

        if content_type.contains("application/json") {
            if self.body.is_empty() {
                return Ok(Reply::Empty);
            }
            Ok(Reply::Json(serde_json::from_slice(&self.body)?))
        } else if content_type.contains("text/") {
            Ok(Reply::Text(
                String::from_utf8_lossy(&self.body).into_owned(),
            ))
        } else {
            Ok(Reply::from_bytes(self.body))
        }
    }

    /// Error text carried by a failed reply.
    #[must_use]
    pub fn error_message(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A successfully decoded reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Empty,
    Json(serde_json::Value),
    Text(String),
    Bytes(Vec<u8>),
}

impl Reply {
    fn from_bytes(body: Vec<u8>) -> Self {
        if body.is_empty() {
            Self::Empty
        } else {
            Self::Bytes(body)
        }
    }

    /// Deserialize a JSON reply into `T`. Returns `None` for non-JSON
    /// replies.
    pub fn json_as<T: DeserializeOwned>(&self) -> Option<Result<T, DecodeError>> {
        match self {
            Self::Json(value) => Some(T::deserialize(value).map_err(DecodeError::from)),
            _ => None,
        }
    }
}
