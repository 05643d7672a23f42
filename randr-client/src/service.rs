//! The seam between configuration logic and the display server.
//!
//! [`DisplayService`] exposes one method per protocol operation the tool
//! consumes. The production implementation is [`crate::x11::XDisplay`];
//! tests drive the session, reporter, and applier through a mock instead.

use crate::errors::RandrClientError;
use randr_model::{
    ConfigRequest, ConfigStatus, OutputInfo, ProtocolVersion, ScreenConfig, ScreenSnapshot,
};

/// Operations consumed from the external display service.
///
/// All calls block until the server responds; there is no timeout or retry
/// anywhere, and any failure is fatal to the invocation.
pub trait DisplayService {
    /// The RandR protocol version the server speaks.
    fn protocol_version(&self) -> Result<ProtocolVersion, RandrClientError>;

    /// Number of screens on this display.
    fn screen_count(&self) -> usize;

    /// The connection's default screen index.
    fn default_screen(&self) -> usize;

    /// Root window of the given screen. The screen index must already have
    /// been validated against [`Self::screen_count`].
    fn root_window(&self, screen: usize) -> u32;

    /// Fetch the current resource snapshot for a root window.
    fn screen_resources(&self, root: u32) -> Result<ScreenSnapshot, RandrClientError>;

    /// Fetch the details of one output, as of the given config timestamp.
    fn output_info(
        &self,
        output: u32,
        config_timestamp: u32,
    ) -> Result<OutputInfo, RandrClientError>;

    /// Fetch the legacy screen-configuration view for a root window.
    fn screen_config(&self, root: u32) -> Result<ScreenConfig, RandrClientError>;

    /// Ask the server to apply a configuration change. A refusal is reported
    /// through the returned status, not as an `Err`.
    fn set_screen_config(
        &self,
        root: u32,
        request: &ConfigRequest,
    ) -> Result<ConfigStatus, RandrClientError>;
}
