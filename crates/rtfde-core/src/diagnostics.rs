//! Channel-gated debug logging.
//!
//! Each [`Channel`] has its own verbosity in a [`DiagnosticConfig`] that the
//! caller builds once and hands to [`Diagnostics`]. A payload is formatted
//! only after its channel has been found to accept debug output, so large
//! tree and diff payloads cost nothing while a channel is quiet.
//!
//! Events are emitted through `tracing` with a fixed target per channel;
//! installing a subscriber is left to the binary.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use tracing::level_filters::LevelFilter;

use crate::{string_diff, tree_diff, ConfigError, DiagnosticError, Token, Tree};

const VALIDATION_TARGET: &str = "rtfde::validation";
const TRANSFORM_TARGET: &str = "rtfde::transform";
const HTMLRTF_TARGET: &str = "rtfde::htmlrtf_stripping";
const GENERAL_TARGET: &str = "rtfde";

/// A named diagnostic sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Checks run on the input before de-encapsulation.
    Validation,
    /// Tree rewrites performed by transformation passes.
    Transformation,
    /// `\htmlrtf` control words removed from encapsulated HTML.
    HtmlRtfStripping,
    /// Everything else, including string and tree diffs.
    General,
}

impl Channel {
    /// Every channel, in configuration order.
    pub const ALL: [Channel; 4] =
        [Channel::Validation, Channel::Transformation, Channel::HtmlRtfStripping, Channel::General];

    /// Short name used in configuration directives.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Channel::Validation => "validation",
            Channel::Transformation => "transform",
            Channel::HtmlRtfStripping => "htmlrtf_stripping",
            Channel::General => "general",
        }
    }

    /// `tracing` target the channel's events are emitted under.
    #[must_use]
    pub fn target(self) -> &'static str {
        match self {
            Channel::Validation => VALIDATION_TARGET,
            Channel::Transformation => TRANSFORM_TARGET,
            Channel::HtmlRtfStripping => HTMLRTF_TARGET,
            Channel::General => GENERAL_TARGET,
        }
    }

    fn index(self) -> usize {
        match self {
            Channel::Validation => 0,
            Channel::Transformation => 1,
            Channel::HtmlRtfStripping => 2,
            Channel::General => 3,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|channel| channel.name() == name || channel.target() == name)
            .ok_or_else(|| ConfigError::UnknownChannel { name: name.to_string() })
    }
}

/// Per-channel verbosity thresholds.
///
/// ```
/// # use rtfde_core::{Channel, DiagnosticConfig};
/// # use tracing::level_filters::LevelFilter;
/// let config = DiagnosticConfig::from_directives("info,validation=debug")?;
/// assert!(config.permits_debug(Channel::Validation));
/// assert!(!config.permits_debug(Channel::General));
/// assert_eq!(config.level(Channel::General), LevelFilter::INFO);
/// # Ok::<(), rtfde_core::ConfigError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticConfig {
    levels: [LevelFilter; 4],
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self { levels: [LevelFilter::OFF; 4] }
    }
}

impl DiagnosticConfig {
    /// Every channel at the same level.
    #[must_use]
    pub fn uniform(level: LevelFilter) -> Self {
        Self { levels: [level; 4] }
    }

    /// Sets the threshold for one channel.
    #[must_use]
    pub fn with_level(mut self, channel: Channel, level: LevelFilter) -> Self {
        self.levels[channel.index()] = level;
        self
    }

    /// Returns the threshold for `channel`.
    #[must_use]
    pub fn level(&self, channel: Channel) -> LevelFilter {
        self.levels[channel.index()]
    }

    /// Indicates whether `channel` accepts debug-level events.
    #[must_use]
    pub fn permits_debug(&self, channel: Channel) -> bool {
        self.level(channel) >= LevelFilter::DEBUG
    }

    /// Parses a comma-separated list of `channel=level` directives.
    ///
    /// A bare level applies to every channel; later directives override
    /// earlier ones. Channels may be named by short name or by target.
    pub fn from_directives(directives: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        for directive in directives.split(',').map(str::trim).filter(|d| !d.is_empty()) {
            match directive.split_once('=') {
                None => {
                    let level = parse_level("*", directive)?;
                    config = Self::uniform(level);
                }
                Some((channel, level)) => {
                    let channel = channel.trim();
                    if channel.is_empty() {
                        return Err(ConfigError::MalformedDirective {
                            directive: directive.to_string(),
                        });
                    }
                    let level = parse_level(channel, level.trim())?;
                    config = config.with_level(channel.parse()?, level);
                }
            }
        }
        Ok(config)
    }
}

fn parse_level(channel: &str, level: &str) -> Result<LevelFilter, ConfigError> {
    level.parse::<LevelFilter>().map_err(|_| ConfigError::InvalidLevel {
        channel: channel.to_string(),
        level: level.to_string(),
    })
}

/// Something to log. Formatting is deferred until the gate has passed.
pub enum Payload<'a> {
    /// A preformatted message.
    Text(&'a str),
    /// Arbitrary data, logged through its `Debug` form.
    Data(&'a dyn fmt::Debug),
    /// A single token.
    Token(&'a Token),
    /// Two strings to be diffed, see [`string_diff`].
    StringDiff {
        /// Text before the change.
        original: &'a str,
        /// Text after the change.
        revised: &'a str,
        /// Optional unit separator.
        separator: Option<&'a Regex>,
    },
    /// Two trees to be diffed, see [`tree_diff`].
    TreeDiff {
        /// Tree before the pass.
        original: &'a Tree,
        /// Tree after the pass.
        revised: &'a Tree,
    },
}

impl Payload<'_> {
    /// Short name of the variant, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Text(_) => "text",
            Payload::Data(_) => "data",
            Payload::Token(_) => "token",
            Payload::StringDiff { .. } => "string diff",
            Payload::TreeDiff { .. } => "tree diff",
        }
    }

    fn render(&self) -> String {
        match self {
            Payload::Text(text) => (*text).to_string(),
            Payload::Data(data) => format!("{data:?}"),
            Payload::Token(token) => token.repr(),
            Payload::StringDiff { original, revised, separator } => {
                string_diff(original, revised, *separator)
            }
            Payload::TreeDiff { original, revised } => tree_diff(original, revised),
        }
    }
}

impl fmt::Debug for Payload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Payload::{}", self.kind())
    }
}

/// The diagnostic gate.
///
/// ```
/// # use rtfde_core::{Channel, DiagnosticConfig, Diagnostics, Payload};
/// let diagnostics = Diagnostics::new(DiagnosticConfig::default());
/// assert!(!diagnostics.is_enabled(Channel::General));
/// diagnostics.log_if_enabled(Channel::General, Payload::Text("never formatted"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    config: DiagnosticConfig,
}

impl Diagnostics {
    /// Creates a gate over `config`.
    #[must_use]
    pub fn new(config: DiagnosticConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration the gate was built with.
    #[must_use]
    pub fn config(&self) -> &DiagnosticConfig {
        &self.config
    }

    /// Indicates whether `channel` currently accepts debug output.
    #[must_use]
    pub fn is_enabled(&self, channel: Channel) -> bool {
        self.config.permits_debug(channel)
    }

    /// Formats and emits `payload` on `channel` if the channel accepts debug
    /// output; otherwise does nothing.
    pub fn log_if_enabled(&self, channel: Channel, payload: Payload<'_>) {
        if !self.is_enabled(channel) {
            return;
        }
        emit(channel, &payload.render());
    }

    /// Logs a token removed while stripping `\htmlrtf` content.
    ///
    /// Every emitted line reads `HTMLRTF Removed: value, line, end_line,
    /// start_pos, end_pos`, with control characters in the value escaped so
    /// the event stays on one line. Payloads other than tokens are rejected whether
    /// or not the channel is enabled.
    pub fn log_stripped_token(&self, payload: Payload<'_>) -> Result<(), DiagnosticError> {
        let Payload::Token(token) = payload else {
            return Err(DiagnosticError::MalformedDiagnosticPayload { found: payload.kind() });
        };
        if self.is_enabled(Channel::HtmlRtfStripping) {
            emit(
                Channel::HtmlRtfStripping,
                &format!(
                    "HTMLRTF Removed: {}, {}, {}, {}, {}",
                    single_line(&token.value),
                    token.line,
                    token.end_line,
                    token.start_pos,
                    token.end_pos
                ),
            );
        }
        Ok(())
    }

    /// Logs on the validation channel.
    pub fn log_validation(&self, payload: Payload<'_>) {
        self.log_if_enabled(Channel::Validation, payload);
    }

    /// Logs on the transformation channel.
    pub fn log_transformation(&self, payload: Payload<'_>) {
        self.log_if_enabled(Channel::Transformation, payload);
    }

    /// Logs the diff of two strings on the general channel.
    pub fn log_string_diff(&self, original: &str, revised: &str, separator: Option<&Regex>) {
        self.log_if_enabled(Channel::General, Payload::StringDiff { original, revised, separator });
    }

    /// Logs the diff of two trees on the general channel.
    pub fn log_tree_diff(&self, original: &Tree, revised: &Tree) {
        self.log_if_enabled(Channel::General, Payload::TreeDiff { original, revised });
    }
}

fn single_line(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_control() || matches!(ch, '\u{2028}' | '\u{2029}') {
            escaped.extend(ch.escape_debug());
        } else {
            escaped.push(ch);
        }
    }
    escaped
}

fn emit(channel: Channel, message: &str) {
    match channel {
        Channel::Validation => tracing::debug!(target: VALIDATION_TARGET, "{message}"),
        Channel::Transformation => tracing::debug!(target: TRANSFORM_TARGET, "{message}"),
        Channel::HtmlRtfStripping => tracing::debug!(target: HTMLRTF_TARGET, "{message}"),
        Channel::General => tracing::debug!(target: GENERAL_TARGET, "{message}"),
    }
}
