//! The set path: turn the option record into one configuration request.

use crate::errors::RandrClientError;
use crate::options::Options;
use crate::service::DisplayService;
use crate::session::Session;
use randr_model::{ConfigRequest, ConfigStatus, SizeSpec};
use tracing::{debug, info};

/// Apply the requested rotation, reflection, size, and rate to the session's
/// screen.
///
/// The currently reported rotation and rate fill in any field the user did
/// not specify; the size defaults to the current size index. A refusal from
/// the server surfaces as [`RandrClientError::ApplyFailed`] carrying the
/// status code, never as a crash.
pub fn apply<S: DisplayService>(
    service: &S,
    session: &Session,
    options: &Options,
) -> Result<(), RandrClientError> {
    let current = service.screen_config(session.root)?;

    let size_id = match options.size {
        None => current.current_size,
        Some(SizeSpec::Index(index)) => {
            if usize::from(index) >= current.sizes.len() {
                return Err(RandrClientError::InvalidSizeIndex {
                    index,
                    count: current.sizes.len(),
                });
            }
            index
        }
        Some(SizeSpec::Pixels { width, height }) => {
            let found = current
                .sizes
                .iter()
                .position(|size| size.width == width && size.height == height);
            match found {
                Some(index) => index as u16,
                None => return Err(RandrClientError::NoMatchingSize { width, height }),
            }
        }
    };

    let request = ConfigRequest {
        timestamp: current.timestamp,
        config_timestamp: current.config_timestamp,
        size_id,
        rotation: options.rotation.unwrap_or(current.current_rotation),
        reflection: options.reflection,
        rate: options.rate.unwrap_or(current.current_rate),
    };
    debug!(
        "applying size {} rotation {} reflection {} rate {}",
        request.size_id, request.rotation, request.reflection, request.rate
    );

    match service.set_screen_config(session.root, &request)? {
        ConfigStatus::Success => {
            info!("screen configuration applied");
            Ok(())
        }
        status => Err(RandrClientError::ApplyFailed(status)),
    }
}
