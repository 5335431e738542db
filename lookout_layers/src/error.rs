// Copyright 2026 the Lookout Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration and wire-message errors.

use core::fmt;

/// Error returned when a widget configuration cannot be used.
#[derive(Debug)]
pub enum ConfigError {
    /// The JSON document did not decode into the configuration type.
    Json {
        /// Widget kind being configured, e.g. `"map"`.
        kind: &'static str,
        /// Decoder error.
        source: serde_json::Error,
    },
    /// The configuration decoded but cannot drive the widget.
    Invalid {
        /// Widget kind being configured.
        kind: &'static str,
        /// What is wrong.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json { kind, source } => write!(f, "invalid {kind} config: {source}"),
            Self::Invalid { kind, reason } => write!(f, "unusable {kind} config: {reason}"),
        }
    }
}

impl core::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Json { source, .. } => Some(source),
            Self::Invalid { .. } => None,
        }
    }
}

/// Error returned when a wire message cannot be turned into a [`MapEvent`](crate::MapEvent).
#[derive(Debug)]
pub enum EventError {
    /// The channel name is not one the map understands.
    UnknownChannel(String),
    /// The payload does not match the channel.
    Payload {
        /// Wire name of the channel, or `None` for unchanneled messages.
        channel: Option<&'static str>,
        /// Decoder error.
        source: serde_json::Error,
    },
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownChannel(name) => write!(f, "unknown channel {name:?}"),
            Self::Payload {
                channel: Some(channel),
                source,
            } => write!(f, "bad payload on channel {channel}: {source}"),
            Self::Payload {
                channel: None,
                source,
            } => write!(f, "bad unchanneled payload: {source}"),
        }
    }
}

impl core::error::Error for EventError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::UnknownChannel(_) => None,
            Self::Payload { source, .. } => Some(source),
        }
    }
}
