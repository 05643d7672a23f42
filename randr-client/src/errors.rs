//! Error types for the RandR client.

use randr_model::{
    ConfigStatus, UnknownConfigStatus, UnknownConnectionState, UnknownSubpixelOrder,
};
use std::io;
use thiserror::Error;

/// Errors that can occur while querying or changing the screen configuration.
///
/// Every variant is fatal: the tool performs no retries, and the binary maps
/// any of these to a one-line diagnostic on stderr and exit status 1.
#[derive(Debug, Error)]
pub enum RandrClientError {
    /// The display connection could not be opened.
    #[error("Can't open display {display}")]
    Connect {
        /// The display that was asked for (explicit, or the environment's
        /// default).
        display: String,
    },

    /// The server's RandR extension predates the resource-enumeration
    /// requests this tool needs.
    #[error("RandR version too old (need 1.2 or better, server reports {major}.{minor})")]
    VersionTooOld { major: u32, minor: u32 },

    /// The requested screen index does not exist on this display.
    #[error("Invalid screen number {screen} (display has {count})")]
    InvalidScreen { screen: usize, count: usize },

    /// The server returned a snapshot with no CRTCs, outputs, or modes.
    #[error("Cannot get screen resources")]
    EmptyResources,

    /// The server reported a connection state outside the defined codes.
    #[error(transparent)]
    ConnectionState(#[from] UnknownConnectionState),

    /// The server reported a subpixel order outside the defined codes.
    #[error(transparent)]
    SubpixelOrder(#[from] UnknownSubpixelOrder),

    /// The server reported a set-config status outside the defined codes.
    #[error(transparent)]
    ConfigStatus(#[from] UnknownConfigStatus),

    /// `-s WxH` named dimensions absent from the server's size table.
    #[error("No size matches {width}x{height}")]
    NoMatchingSize { width: u16, height: u16 },

    /// `-s <index>` named a slot past the end of the server's size table.
    #[error("Size index {index} is out of range (screen has {count} sizes)")]
    InvalidSizeIndex { index: u16, count: usize },

    /// The server refused the configuration change.
    #[error("Screen configuration rejected: {0}")]
    ApplyFailed(ConfigStatus),

    /// A protocol-level failure on the display connection.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Writing query output failed.
    #[error("Output error: {0}")]
    Io(#[from] io::Error),
}

impl From<x11rb::errors::ConnectionError> for RandrClientError {
    fn from(err: x11rb::errors::ConnectionError) -> Self {
        Self::Protocol(err.to_string())
    }
}

impl From<x11rb::errors::ReplyError> for RandrClientError {
    fn from(err: x11rb::errors::ReplyError) -> Self {
        Self::Protocol(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_error_names_display() {
        let err = RandrClientError::Connect {
            display: ":7".to_string(),
        };
        assert!(err.to_string().contains(":7"));
    }

    #[test]
    fn test_version_error_reports_server_version() {
        let err = RandrClientError::VersionTooOld { major: 1, minor: 1 };
        let text = err.to_string();
        assert!(text.contains("too old"));
        assert!(text.contains("1.1"));
    }

    #[test]
    fn test_invalid_screen_reports_count() {
        let err = RandrClientError::InvalidScreen {
            screen: 4,
            count: 2,
        };
        assert_eq!(err.to_string(), "Invalid screen number 4 (display has 2)");
    }

    #[test]
    fn test_apply_failed_carries_status() {
        let err = RandrClientError::ApplyFailed(ConfigStatus::InvalidTime);
        assert_eq!(err.to_string(), "Screen configuration rejected: invalid time");
    }
}
