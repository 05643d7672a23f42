//! X11 backend: [`DisplayService`] over an x11rb connection.

use crate::errors::RandrClientError;
use crate::service::DisplayService;
use randr_model::{
    ConfigRequest, ConfigStatus, ConnectionState, ModeInfo, OutputInfo, ProtocolVersion,
    Reflection, Rotation, ScreenConfig, ScreenSize, ScreenSnapshot, SubpixelOrder,
};
use std::env;
use tracing::debug;
use x11rb::connection::Connection;
use x11rb::protocol::randr::{self, ConnectionExt as _};
use x11rb::rust_connection::RustConnection;

/// The RandR version this tool asks the server for.
const CLIENT_VERSION: (u32, u32) = (1, 2);

/// A live connection to an X display.
pub struct XDisplay {
    conn: RustConnection,
    default_screen: usize,
}

impl XDisplay {
    /// Open a connection to the named display, or to the environment's
    /// default when `display` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`RandrClientError::Connect`] naming the unreachable display.
    pub fn open(display: Option<&str>) -> Result<Self, RandrClientError> {
        let (conn, default_screen) = x11rb::connect(display).map_err(|err| {
            debug!("connect failed: {err}");
            RandrClientError::Connect {
                display: display_name(display),
            }
        })?;
        debug!("connected, default screen {default_screen}");
        Ok(Self {
            conn,
            default_screen,
        })
    }
}

/// The display the user asked for, the way the server-side tools would name
/// it: the explicit argument if any, else the environment's default.
fn display_name(requested: Option<&str>) -> String {
    requested
        .map(str::to_owned)
        .or_else(|| env::var("DISPLAY").ok())
        .unwrap_or_default()
}

impl DisplayService for XDisplay {
    fn protocol_version(&self) -> Result<ProtocolVersion, RandrClientError> {
        let reply = self
            .conn
            .randr_query_version(CLIENT_VERSION.0, CLIENT_VERSION.1)?
            .reply()?;
        Ok(ProtocolVersion::new(
            reply.major_version,
            reply.minor_version,
        ))
    }

    fn screen_count(&self) -> usize {
        self.conn.setup().roots.len()
    }

    fn default_screen(&self) -> usize {
        self.default_screen
    }

    fn root_window(&self, screen: usize) -> u32 {
        self.conn.setup().roots[screen].root
    }

    fn screen_resources(&self, root: u32) -> Result<ScreenSnapshot, RandrClientError> {
        let reply = self.conn.randr_get_screen_resources(root)?.reply()?;

        // Mode names come back as one packed buffer, in mode order.
        let mut names = reply.names.as_slice();
        let mut modes = Vec::with_capacity(reply.modes.len());
        for mode in &reply.modes {
            let len = usize::from(mode.name_len).min(names.len());
            let (raw, rest) = names.split_at(len);
            names = rest;
            modes.push(ModeInfo {
                id: mode.id,
                name: String::from_utf8_lossy(raw).into_owned(),
                width: mode.width,
                height: mode.height,
                // The final 1.2 protocol dropped the physical-size fields
                // from mode records.
                mm_width: 0,
                mm_height: 0,
                dot_clock: mode.dot_clock,
                hsync_start: mode.hsync_start,
                hsync_end: mode.hsync_end,
                htotal: mode.htotal,
                vsync_start: mode.vsync_start,
                vsync_end: mode.vsync_end,
                vtotal: mode.vtotal,
                mode_flags: u32::from(mode.mode_flags),
            });
        }

        Ok(ScreenSnapshot {
            timestamp: reply.timestamp,
            config_timestamp: reply.config_timestamp,
            crtcs: reply.crtcs,
            outputs: reply.outputs,
            modes,
        })
    }

    fn output_info(
        &self,
        output: u32,
        config_timestamp: u32,
    ) -> Result<OutputInfo, RandrClientError> {
        let reply = self
            .conn
            .randr_get_output_info(output, config_timestamp)?
            .reply()?;
        Ok(OutputInfo {
            name: String::from_utf8_lossy(&reply.name).into_owned(),
            timestamp: reply.timestamp,
            crtc: reply.crtc,
            connection: ConnectionState::try_from(u32::from(reply.connection))?,
            subpixel_order: SubpixelOrder::try_from(u32::from(reply.subpixel_order))?,
        })
    }

    fn screen_config(&self, root: u32) -> Result<ScreenConfig, RandrClientError> {
        let reply = self.conn.randr_get_screen_info(root)?.reply()?;
        let bits = u16::from(reply.rotation);
        let rotation = Rotation::from_randr_bits(bits).ok_or_else(|| {
            RandrClientError::Protocol(format!("unrecognized rotation bits 0x{bits:x}"))
        })?;
        let sizes = reply
            .sizes
            .iter()
            .map(|size| ScreenSize {
                width: size.width,
                height: size.height,
                mm_width: size.mwidth,
                mm_height: size.mheight,
            })
            .collect();
        Ok(ScreenConfig {
            timestamp: reply.timestamp,
            config_timestamp: reply.config_timestamp,
            current_size: reply.size_id,
            current_rate: reply.rate,
            current_rotation: rotation,
            current_reflection: Reflection::from_bits_truncate(bits),
            sizes,
        })
    }

    fn set_screen_config(
        &self,
        root: u32,
        request: &ConfigRequest,
    ) -> Result<ConfigStatus, RandrClientError> {
        let reply = self
            .conn
            .randr_set_screen_config(
                root,
                request.timestamp,
                request.config_timestamp,
                request.size_id,
                wire_rotation(request),
                request.rate,
            )?
            .reply()?;
        Ok(ConfigStatus::try_from(u32::from(reply.status))?)
    }
}

/// Compose the request's rotation and reflection into the wire bitmask.
fn wire_rotation(request: &ConfigRequest) -> randr::Rotation {
    let mut bits = match request.rotation {
        Rotation::Normal => randr::Rotation::ROTATE0,
        Rotation::Left => randr::Rotation::ROTATE90,
        Rotation::Inverted => randr::Rotation::ROTATE180,
        Rotation::Right => randr::Rotation::ROTATE270,
    };
    if request.reflection.contains(Reflection::X) {
        bits = bits | randr::Rotation::REFLECT_X;
    }
    if request.reflection.contains(Reflection::Y) {
        bits = bits | randr::Rotation::REFLECT_Y;
    }
    bits
}
