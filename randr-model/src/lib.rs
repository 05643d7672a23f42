//! Common types for the RandR screen-configuration tools.
//!
//! This crate provides the plain value types shared between the client
//! library and the command-line front end:
//! - [`Rotation`] and [`Reflection`] - orientation selections
//! - [`ConnectionState`] and [`SubpixelOrder`] - per-output attributes
//! - [`SizeSpec`] - a size selection, by index or by pixel dimensions
//! - [`ModeInfo`], [`OutputInfo`], [`ScreenSnapshot`] - query results
//! - [`ScreenConfig`], [`ConfigRequest`], [`ConfigStatus`] - the set path
//!
//! All records are transient: they are built from one server reply, read
//! once, and dropped. Nothing here is mutated after construction.

use bitflags::bitflags;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Screen rotation, one of the four cardinal orientations.
///
/// The discriminant is the classic direction index (0-3); the RandR wire
/// encoding is the single bit `1 << index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    /// No rotation.
    #[default]
    Normal = 0,
    /// Rotated 90 degrees counter-clockwise.
    Left = 1,
    /// Rotated 180 degrees.
    Inverted = 2,
    /// Rotated 270 degrees counter-clockwise.
    Right = 3,
}

impl Rotation {
    /// All rotations, in direction-index order.
    pub const ALL: [Rotation; 4] = [
        Rotation::Normal,
        Rotation::Left,
        Rotation::Inverted,
        Rotation::Right,
    ];

    /// The direction index (0-3).
    #[must_use]
    pub const fn index(self) -> u16 {
        self as u16
    }

    /// The RandR rotation bit (`RR_Rotate_0` .. `RR_Rotate_270`).
    #[must_use]
    pub const fn to_randr_bits(self) -> u16 {
        1 << self.index()
    }

    /// Recover a rotation from a RandR rotation bitmask.
    ///
    /// Only the four rotate bits are inspected; reflection bits are ignored.
    /// Returns `None` when no single rotate bit is set.
    #[must_use]
    pub fn from_randr_bits(bits: u16) -> Option<Self> {
        match bits & 0x0f {
            0x1 => Some(Rotation::Normal),
            0x2 => Some(Rotation::Left),
            0x4 => Some(Rotation::Inverted),
            0x8 => Some(Rotation::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Rotation::Normal => "normal",
            Rotation::Left => "left",
            Rotation::Inverted => "inverted",
            Rotation::Right => "right",
        };
        f.write_str(name)
    }
}

/// Error returned when an orientation argument matches neither a direction
/// name nor an index in 0-3.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized orientation '{0}' (expected normal, left, inverted, right, or 0-3)")]
pub struct ParseRotationError(pub String);

impl FromStr for Rotation {
    type Err = ParseRotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        for rotation in Rotation::ALL {
            if s == rotation.to_string() {
                return Ok(rotation);
            }
        }
        match s.parse::<u16>() {
            Ok(index) if index < 4 => Ok(Rotation::ALL[usize::from(index)]),
            _ => Err(ParseRotationError(s.to_owned())),
        }
    }
}

bitflags! {
    /// Reflection selection. The bits are independent and match the RandR
    /// `RR_Reflect_X` / `RR_Reflect_Y` wire encoding.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Reflection: u16 {
        /// Reflect along the X axis.
        const X = 0x10;
        /// Reflect along the Y axis.
        const Y = 0x20;
    }
}

impl Default for Reflection {
    fn default() -> Self {
        Reflection::empty()
    }
}

impl fmt::Display for Reflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match (self.contains(Reflection::X), self.contains(Reflection::Y)) {
            (false, false) => "none",
            (true, false) => "x axis",
            (false, true) => "y axis",
            (true, true) => "x and y axis",
        };
        f.write_str(label)
    }
}

/// Whether an output has a display attached, as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    Disconnected,
    /// The server cannot tell (common for analog connectors).
    Unknown,
}

/// Error for a connection-state value outside the three defined codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Connection state {0} is out of range")]
pub struct UnknownConnectionState(pub u32);

impl TryFrom<u32> for ConnectionState {
    type Error = UnknownConnectionState;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(ConnectionState::Connected),
            1 => Ok(ConnectionState::Disconnected),
            2 => Ok(ConnectionState::Unknown),
            other => Err(UnknownConnectionState(other)),
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConnectionState::Connected => "connected",
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Unknown => "unknown connection",
        };
        f.write_str(label)
    }
}

/// Geometric arrangement of the colour sub-elements on a physical output.
///
/// Reported for font-rendering hints; this tool only prints it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubpixelOrder {
    Unknown,
    HorizontalRgb,
    HorizontalBgr,
    VerticalRgb,
    VerticalBgr,
    NoSubpixels,
}

/// Error for a subpixel-order value outside the six defined codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Subpixel order {0} is out of range")]
pub struct UnknownSubpixelOrder(pub u32);

impl TryFrom<u32> for SubpixelOrder {
    type Error = UnknownSubpixelOrder;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(SubpixelOrder::Unknown),
            1 => Ok(SubpixelOrder::HorizontalRgb),
            2 => Ok(SubpixelOrder::HorizontalBgr),
            3 => Ok(SubpixelOrder::VerticalRgb),
            4 => Ok(SubpixelOrder::VerticalBgr),
            5 => Ok(SubpixelOrder::NoSubpixels),
            other => Err(UnknownSubpixelOrder(other)),
        }
    }
}

impl fmt::Display for SubpixelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SubpixelOrder::Unknown => "unknown",
            SubpixelOrder::HorizontalRgb => "horizontal rgb",
            SubpixelOrder::HorizontalBgr => "horizontal bgr",
            SubpixelOrder::VerticalRgb => "vertical rgb",
            SubpixelOrder::VerticalBgr => "vertical bgr",
            SubpixelOrder::NoSubpixels => "no subpixels",
        };
        f.write_str(label)
    }
}

/// A target size, selected either by index into the server's size table or
/// by explicit pixel dimensions. The two modes are mutually exclusive by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSpec {
    /// Index into the size table reported by the server.
    Index(u16),
    /// Explicit pixel dimensions, matched against the size table.
    Pixels { width: u16, height: u16 },
}

/// Error returned when a size argument is neither `WxH` nor a non-negative
/// index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid size '{0}' (expected an index or <width>x<height>)")]
pub struct ParseSizeError(pub String);

impl FromStr for SizeSpec {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((w, h)) = s.split_once('x') {
            let width = w.parse().map_err(|_| ParseSizeError(s.to_owned()))?;
            let height = h.parse().map_err(|_| ParseSizeError(s.to_owned()))?;
            return Ok(SizeSpec::Pixels { width, height });
        }
        let index = s.parse().map_err(|_| ParseSizeError(s.to_owned()))?;
        Ok(SizeSpec::Index(index))
    }
}

/// The display extension's protocol version, as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolVersion {
    pub major: u32,
    pub minor: u32,
}

impl ProtocolVersion {
    #[must_use]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    /// Whether the server speaks at least protocol 1.2.
    ///
    /// The resource-enumeration requests this tool relies on were added in
    /// 1.2; older servers only expose the legacy screen-configuration view.
    #[must_use]
    pub const fn supports_resources(self) -> bool {
        self.major > 1 || (self.major == 1 && self.minor >= 2)
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// One mode: a named set of timing parameters that can be applied to a CRTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeInfo {
    pub id: u32,
    pub name: String,
    pub width: u16,
    pub height: u16,
    /// Physical width in millimetres. The final 1.2 protocol dropped this
    /// field from mode records, so servers report it as zero.
    pub mm_width: u32,
    /// Physical height in millimetres; see `mm_width`.
    pub mm_height: u32,
    pub dot_clock: u32,
    pub hsync_start: u16,
    pub hsync_end: u16,
    pub htotal: u16,
    pub vsync_start: u16,
    pub vsync_end: u16,
    pub vtotal: u16,
    pub mode_flags: u32,
}

/// Per-output details, fetched one output at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputInfo {
    pub name: String,
    /// Time of the last configuration change for this output.
    pub timestamp: u32,
    /// The CRTC currently driving this output; 0 when none.
    pub crtc: u32,
    pub connection: ConnectionState,
    pub subpixel_order: SubpixelOrder,
}

/// The full set of CRTCs, outputs, and modes known to the server at a given
/// timestamp. Owned by one query and dropped after printing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenSnapshot {
    pub timestamp: u32,
    pub config_timestamp: u32,
    pub crtcs: Vec<u32>,
    pub outputs: Vec<u32>,
    pub modes: Vec<ModeInfo>,
}

impl ScreenSnapshot {
    /// True when the server returned no resources at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.crtcs.is_empty() && self.outputs.is_empty() && self.modes.is_empty()
    }
}

/// One entry of the legacy size table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: u16,
    pub height: u16,
    pub mm_width: u16,
    pub mm_height: u16,
}

/// The legacy screen-configuration view, used by the set path to fill
/// defaults for fields the user did not specify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenConfig {
    pub timestamp: u32,
    pub config_timestamp: u32,
    pub current_size: u16,
    pub current_rate: u16,
    pub current_rotation: Rotation,
    pub current_reflection: Reflection,
    pub sizes: Vec<ScreenSize>,
}

/// A fully-resolved configuration change, ready to send to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigRequest {
    pub timestamp: u32,
    pub config_timestamp: u32,
    pub size_id: u16,
    pub rotation: Rotation,
    pub reflection: Reflection,
    pub rate: u16,
}

impl ConfigRequest {
    /// The combined rotation/reflection bitmask in RandR wire encoding.
    #[must_use]
    pub fn rotation_bits(&self) -> u16 {
        self.rotation.to_randr_bits() | self.reflection.bits()
    }
}

/// Status of a configuration change, as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigStatus {
    Success,
    InvalidConfigTime,
    InvalidTime,
    Failed,
}

/// Error for a set-config status outside the four defined codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Configuration status {0} is out of range")]
pub struct UnknownConfigStatus(pub u32);

impl TryFrom<u32> for ConfigStatus {
    type Error = UnknownConfigStatus;

    fn try_from(raw: u32) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(ConfigStatus::Success),
            1 => Ok(ConfigStatus::InvalidConfigTime),
            2 => Ok(ConfigStatus::InvalidTime),
            3 => Ok(ConfigStatus::Failed),
            other => Err(UnknownConfigStatus(other)),
        }
    }
}

impl fmt::Display for ConfigStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfigStatus::Success => "success",
            ConfigStatus::InvalidConfigTime => "invalid config time",
            ConfigStatus::InvalidTime => "invalid time",
            ConfigStatus::Failed => "failed",
        };
        f.write_str(label)
    }
}
