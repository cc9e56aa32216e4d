use crate::config::AcquireConfig;
use crate::console::Console;
use crate::gate::{SourceLookup, StatusFeed};
use pulith_fs::SpaceProbe;

/// Configuration and collaborators shared by the commands.
#[derive(Clone, Copy)]
pub struct Context<'a> {
    pub config:  &'a AcquireConfig,
    pub console: &'a dyn Console,
    pub probe:   &'a dyn SpaceProbe,
    pub feed:    &'a dyn StatusFeed,
    pub lookup:  &'a dyn SourceLookup,
}
