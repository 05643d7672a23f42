//! The flat option record driving one invocation.
//!
//! Built once from the command line, then read by the session, reporter, and
//! applier. Nothing mutates it after construction.

use randr_model::{Reflection, Rotation, SizeSpec};

/// Everything one run of the tool was asked to do.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Display to connect to; `None` means the environment's default.
    pub display: Option<String>,
    /// Screen index; `None` means the connection's default screen.
    pub screen: Option<usize>,
    /// Verbose output. Implies a query.
    pub verbose: bool,
    /// Explicit query request.
    pub query: bool,
    /// Requested rotation; `None` keeps the current one.
    pub rotation: Option<Rotation>,
    /// Requested reflection bits.
    pub reflection: Reflection,
    /// Requested size, by index or pixel dimensions.
    pub size: Option<SizeSpec>,
    /// Requested refresh rate in Hz; `None` keeps the current one.
    pub rate: Option<u16>,
    /// Print the server's RandR protocol version.
    pub show_version: bool,
}

impl Options {
    /// Whether any mutating flag was given, marking this run as a set
    /// operation.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.rotation.is_some()
            || !self.reflection.is_empty()
            || self.size.is_some()
            || self.rate.is_some()
    }

    /// Whether the run should print the resource report.
    ///
    /// An explicit `-q`, `--verbose`, or the absence of any mutating flag
    /// all select query mode; in particular a bare invocation queries.
    #[must_use]
    pub fn wants_query(&self) -> bool {
        self.query || self.verbose || !self.is_set()
    }
}
