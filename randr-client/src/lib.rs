//! Client library for querying and changing the X screen configuration
//! through the RandR extension.
//!
//! The crate is a thin pass-through over the display server: it parses
//! nothing itself (the binary owns the command line), opens a connection,
//! gates on protocol 1.2, and then either prints the resource snapshot or
//! sends one configuration change. Everything runs on the calling thread,
//! strictly sequentially, and every failure is fatal to the invocation.
//!
//! # Architecture
//!
//! - [`Options`] - the flat record of what one run was asked to do
//! - [`DisplayService`] - the seam over the display server; the production
//!   implementation is [`XDisplay`], tests substitute a mock
//! - [`Session`] - version gate plus screen/root resolution
//! - [`report`] - the fixed-format resource report
//! - [`apply`] - the one-shot configuration change
//!
//! # Quick start
//!
//! ```no_run
//! use randr_client::{run, Options};
//!
//! let options = Options::default();
//! run(&options, &mut std::io::stdout())?;
//! # Ok::<(), randr_client::RandrClientError>(())
//! ```

#![forbid(unsafe_code)]

pub mod apply;
pub mod errors;
pub mod options;
pub mod report;
pub mod service;
pub mod session;
pub mod x11;

pub use errors::RandrClientError;
pub use options::Options;
pub use service::DisplayService;
pub use session::Session;
pub use x11::XDisplay;

use std::io::Write;

/// Run one invocation against the real display server.
///
/// Opens the display named in `options` (or the environment's default),
/// establishes the session, applies any requested change, and prints the
/// resource report when the run is a query.
///
/// # Errors
///
/// Any [`RandrClientError`]; all are fatal, none are retried.
pub fn run<W: Write>(options: &Options, out: &mut W) -> Result<(), RandrClientError> {
    let display = XDisplay::open(options.display.as_deref())?;
    run_with_service(&display, options, out)
}

/// [`run`], generic over the display service. Tests drive this with a mock.
pub fn run_with_service<S, W>(
    service: &S,
    options: &Options,
    out: &mut W,
) -> Result<(), RandrClientError>
where
    S: DisplayService,
    W: Write,
{
    let session = Session::establish(service, options)?;

    if options.show_version {
        writeln!(out, "Server reports RandR version {}", session.version)?;
    }
    if options.is_set() {
        apply::apply(service, &session, options)?;
    }
    if options.wants_query() {
        report::report(service, &session, out)?;
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod testutil {
    //! A scripted display service for driving the session, reporter, and
    //! applier without an X server.

    use crate::errors::RandrClientError;
    use crate::service::DisplayService;
    use randr_model::{
        ConfigRequest, ConfigStatus, ConnectionState, ModeInfo, OutputInfo, ProtocolVersion,
        Reflection, Rotation, ScreenConfig, ScreenSize, ScreenSnapshot, SubpixelOrder,
    };
    use std::cell::RefCell;
    use std::collections::HashMap;

    pub struct MockDisplay {
        pub version: ProtocolVersion,
        pub roots: Vec<u32>,
        pub default: usize,
        pub snapshot: ScreenSnapshot,
        pub output_details: HashMap<u32, OutputInfo>,
        pub config: ScreenConfig,
        pub set_status: ConfigStatus,
        /// Every configuration request the mock was asked to apply.
        pub requests: RefCell<Vec<ConfigRequest>>,
    }

    impl MockDisplay {
        pub const ROOTS: [u32; 2] = [0x10, 0x11];

        /// A 1.2 server with one screen and nothing on it.
        pub fn minimal() -> Self {
            Self {
                version: ProtocolVersion::new(1, 2),
                roots: vec![Self::ROOTS[0]],
                default: 0,
                snapshot: ScreenSnapshot::default(),
                output_details: HashMap::new(),
                config: ScreenConfig {
                    timestamp: 1000,
                    config_timestamp: 900,
                    current_size: 0,
                    current_rate: 60,
                    current_rotation: Rotation::Normal,
                    current_reflection: Reflection::empty(),
                    sizes: Vec::new(),
                },
                set_status: ConfigStatus::Success,
                requests: RefCell::new(Vec::new()),
            }
        }

        /// Two screens, with the second as the connection default.
        pub fn two_screens() -> Self {
            let mut mock = Self::minimal();
            mock.roots = Self::ROOTS.to_vec();
            mock.default = 1;
            mock
        }

        /// One CRTC, one connected output named VGA1, one 800x600 mode, and
        /// a two-entry legacy size table.
        pub fn with_vga_output() -> Self {
            let mut mock = Self::minimal();
            mock.snapshot = ScreenSnapshot {
                timestamp: 1000,
                config_timestamp: 900,
                crtcs: vec![0x3f],
                outputs: vec![0x40],
                modes: vec![ModeInfo {
                    id: 0x41,
                    name: "800x600".to_string(),
                    width: 800,
                    height: 600,
                    mm_width: 0,
                    mm_height: 0,
                    dot_clock: 40_000_000,
                    hsync_start: 840,
                    hsync_end: 968,
                    htotal: 1056,
                    vsync_start: 601,
                    vsync_end: 605,
                    vtotal: 628,
                    mode_flags: 0x5,
                }],
            };
            mock.output_details.insert(
                0x40,
                OutputInfo {
                    name: "VGA1".to_string(),
                    timestamp: 999,
                    crtc: 0x3f,
                    connection: ConnectionState::Connected,
                    subpixel_order: SubpixelOrder::Unknown,
                },
            );
            mock.config.sizes = vec![
                ScreenSize {
                    width: 1024,
                    height: 768,
                    mm_width: 270,
                    mm_height: 203,
                },
                ScreenSize {
                    width: 800,
                    height: 600,
                    mm_width: 270,
                    mm_height: 203,
                },
            ];
            mock
        }
    }

    impl DisplayService for MockDisplay {
        fn protocol_version(&self) -> Result<ProtocolVersion, RandrClientError> {
            Ok(self.version)
        }

        fn screen_count(&self) -> usize {
            self.roots.len()
        }

        fn default_screen(&self) -> usize {
            self.default
        }

        fn root_window(&self, screen: usize) -> u32 {
            self.roots[screen]
        }

        fn screen_resources(&self, _root: u32) -> Result<ScreenSnapshot, RandrClientError> {
            Ok(self.snapshot.clone())
        }

        fn output_info(
            &self,
            output: u32,
            _config_timestamp: u32,
        ) -> Result<OutputInfo, RandrClientError> {
            self.output_details
                .get(&output)
                .cloned()
                .ok_or_else(|| RandrClientError::Protocol(format!("no such output 0x{output:x}")))
        }

        fn screen_config(&self, _root: u32) -> Result<ScreenConfig, RandrClientError> {
            Ok(self.config.clone())
        }

        fn set_screen_config(
            &self,
            _root: u32,
            request: &ConfigRequest,
        ) -> Result<ConfigStatus, RandrClientError> {
            self.requests.borrow_mut().push(*request);
            Ok(self.set_status)
        }
    }
}
