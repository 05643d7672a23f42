//! Session establishment: version gate and screen resolution.

use crate::errors::RandrClientError;
use crate::options::Options;
use crate::service::DisplayService;
use randr_model::ProtocolVersion;
use tracing::debug;

/// A resolved target for the rest of the run: which screen, which root
/// window, and the protocol version the server reported.
#[derive(Debug, Clone, Copy)]
pub struct Session {
    /// The resolved screen index.
    pub screen: usize,
    /// Root window of the resolved screen; the addressing handle for every
    /// subsequent request.
    pub root: u32,
    /// The server's RandR protocol version.
    pub version: ProtocolVersion,
}

impl Session {
    /// Verify the server's protocol version and resolve the target screen.
    ///
    /// Steps:
    /// 1) Query the extension version; anything below 1.2 is rejected, since
    ///    the resource-enumeration requests need 1.2 semantics.
    /// 2) Resolve the screen: the requested index when given (rejected when
    ///    out of range for this display), else the connection's default.
    /// 3) Resolve the screen's root window.
    pub fn establish<S: DisplayService>(
        service: &S,
        options: &Options,
    ) -> Result<Self, RandrClientError> {
        let version = service.protocol_version()?;
        if !version.supports_resources() {
            return Err(RandrClientError::VersionTooOld {
                major: version.major,
                minor: version.minor,
            });
        }

        let count = service.screen_count();
        let screen = match options.screen {
            Some(screen) if screen >= count => {
                return Err(RandrClientError::InvalidScreen { screen, count });
            }
            Some(screen) => screen,
            None => service.default_screen(),
        };

        let root = service.root_window(screen);
        debug!("session: RandR {version}, screen {screen}, root 0x{root:x}");
        Ok(Self {
            screen,
            root,
            version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::MockDisplay;

    #[test]
    fn test_establish_uses_default_screen() {
        let mock = MockDisplay::two_screens();
        let session = Session::establish(&mock, &Options::default()).unwrap();
        assert_eq!(session.screen, 1);
        assert_eq!(session.root, MockDisplay::ROOTS[1]);
    }

    #[test]
    fn test_establish_honors_requested_screen() {
        let mock = MockDisplay::two_screens();
        let options = Options {
            screen: Some(0),
            ..Options::default()
        };
        let session = Session::establish(&mock, &options).unwrap();
        assert_eq!(session.screen, 0);
        assert_eq!(session.root, MockDisplay::ROOTS[0]);
    }

    #[test]
    fn test_establish_rejects_out_of_range_screen() {
        let mock = MockDisplay::two_screens();
        let options = Options {
            screen: Some(2),
            ..Options::default()
        };
        let err = Session::establish(&mock, &options).unwrap_err();
        assert!(matches!(
            err,
            RandrClientError::InvalidScreen { screen: 2, count: 2 }
        ));
    }

    #[test]
    fn test_establish_rejects_old_server() {
        let mut mock = MockDisplay::minimal();
        mock.version = ProtocolVersion::new(1, 1);
        let err = Session::establish(&mock, &Options::default()).unwrap_err();
        assert!(matches!(
            err,
            RandrClientError::VersionTooOld { major: 1, minor: 1 }
        ));
    }
}
