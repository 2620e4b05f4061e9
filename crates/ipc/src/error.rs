use thiserror::Error;

/// Errors raised while decoding data that crossed the IPC boundary.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The command name is not part of the contract.
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    /// The event name is not part of the contract.
    #[error("unknown event `{0}`")]
    UnknownEvent(String),

    /// A command body that should carry text was not valid UTF-8.
    #[error("`{command}` body is not valid UTF-8")]
    InvalidUtf8 {
        command: &'static str,
        #[source]
        source: std::str::Utf8Error,
    },

    /// A command body was missing a required argument.
    #[error("`{command}` body is missing {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    /// A numeric argument could not be parsed.
    #[error("`{command}` body carries an invalid index `{value}`")]
    InvalidIndex { command: &'static str, value: String },

    /// An event payload did not match the shape declared for its name.
    #[error("invalid payload for event `{event}`: {source}")]
    Payload {
        event: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A JSON reply body could not be parsed.
    #[error("invalid JSON reply: {0}")]
    Json(#[from] serde_json::Error),
}

impl DecodeError {
    pub(crate) fn invalid_utf8(command: &'static str, source: std::str::Utf8Error) -> Self {
        Self::InvalidUtf8 { command, source }
    }

    pub(crate) fn payload(event: &'static str, source: serde_json::Error) -> Self {
        Self::Payload { event, source }
    }
}
