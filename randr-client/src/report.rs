//! The resource report: fetch the snapshot and print it in the fixed
//! textual format.
//!
//! Identifiers print in hexadecimal, everything else in decimal; the field
//! labels and tab indentation are part of the tool's stable output contract.

use crate::errors::RandrClientError;
use crate::service::DisplayService;
use crate::session::Session;
use std::io::Write;
use tracing::debug;

/// Fetch the screen's resource snapshot and print it to `out`.
///
/// The snapshot is checked for emptiness immediately after the fetch, before
/// any field is touched. Per-output details are fetched and printed one at a
/// time, each dropped before the next is requested.
pub fn report<S, W>(service: &S, session: &Session, out: &mut W) -> Result<(), RandrClientError>
where
    S: DisplayService,
    W: Write,
{
    let snapshot = service.screen_resources(session.root)?;
    if snapshot.is_empty() {
        return Err(RandrClientError::EmptyResources);
    }
    debug!(
        "snapshot: {} crtcs, {} outputs, {} modes",
        snapshot.crtcs.len(),
        snapshot.outputs.len(),
        snapshot.modes.len()
    );

    writeln!(out, "timestamp: {}", snapshot.timestamp)?;
    writeln!(out, "configTimestamp: {}", snapshot.config_timestamp)?;

    for crtc in &snapshot.crtcs {
        writeln!(out, "\tcrtc: 0x{crtc:x}")?;
    }

    for &output in &snapshot.outputs {
        writeln!(out, "\toutput: 0x{output:x}")?;
        let info = service.output_info(output, snapshot.config_timestamp)?;
        writeln!(out, "\t\tname: {}", info.name)?;
        writeln!(out, "\t\ttimestamp: {}", info.timestamp)?;
        writeln!(out, "\t\tcrtc: 0x{:x}", info.crtc)?;
        writeln!(out, "\t\tconnection: {}", info.connection)?;
        writeln!(out, "\t\tsubpixel_order: {}", info.subpixel_order)?;
    }

    for mode in &snapshot.modes {
        writeln!(out, "\tmode: 0x{:x}", mode.id)?;
        writeln!(out, "\t\tname: {}", mode.name)?;
        writeln!(out, "\t\twidth: {}", mode.width)?;
        writeln!(out, "\t\theight: {}", mode.height)?;
        writeln!(out, "\t\tmmWidth: {}", mode.mm_width)?;
        writeln!(out, "\t\tmmHeight: {}", mode.mm_height)?;
        writeln!(out, "\t\tdotClock: {}", mode.dot_clock)?;
        writeln!(out, "\t\thSyncStart: {}", mode.hsync_start)?;
        writeln!(out, "\t\thSyncEnd: {}", mode.hsync_end)?;
        writeln!(out, "\t\thTotal: {}", mode.htotal)?;
        writeln!(out, "\t\tvSyncStart: {}", mode.vsync_start)?;
        writeln!(out, "\t\tvSyncEnd: {}", mode.vsync_end)?;
        writeln!(out, "\t\tvTotal: {}", mode.vtotal)?;
        writeln!(out, "\t\tmodeFlags: 0x{:x}", mode.mode_flags)?;
    }

    Ok(())
}
