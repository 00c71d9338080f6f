use thiserror::Error;

/// Errors raised while encoding values into their RTF representation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The control parameter could not be interpreted as an integer.
    #[error("invalid control parameter: {value:?} is not an integer")]
    InvalidParameter {
        /// The offending input, as received.
        value: String,
    },
    /// The control parameter is an integer too wide for 128 bits.
    #[error("control parameter {value:?} does not fit in a 128-bit integer")]
    ParameterOutOfRange {
        /// The offending input, as received.
        value: String,
    },
}

/// Errors raised by the diagnostic gate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiagnosticError {
    /// A channel that only logs tokens was handed some other payload.
    #[error("HTMLRTF stripping channel only logs tokens, got {found} payload")]
    MalformedDiagnosticPayload {
        /// The kind of payload that was rejected.
        found: &'static str,
    },
}

/// Errors emitted when building a [`DiagnosticConfig`](crate::DiagnosticConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The directive named a channel that does not exist.
    #[error("unknown diagnostic channel: {name}")]
    UnknownChannel {
        /// The channel name as written in the directive.
        name: String,
    },
    /// The directive carried a level that is not recognised.
    #[error("invalid level {level:?} for channel {channel}")]
    InvalidLevel {
        /// The channel the level was meant for (`*` for a bare level).
        channel: String,
        /// The level text as written in the directive.
        level: String,
    },
    /// The directive could not be split into a channel and a level.
    #[error("malformed diagnostic directive: {directive:?}")]
    MalformedDirective {
        /// The directive text.
        directive: String,
    },
}
