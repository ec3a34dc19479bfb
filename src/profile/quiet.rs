// Quiet profile: no discovery or assembly chatter

use std::path::PathBuf;
use std::sync::Arc;

use super::{Handler, Profile, default};
use crate::event::EventKind;
use crate::sink::Sink;

/// Suppresses discovery and assembly progress lines entirely; failures,
/// skips, and errors render exactly as the default profile does.
pub struct QuietProfile;

impl Profile for QuietProfile {
    fn selector(&self) -> &'static str {
        "quiet"
    }

    fn description(&self) -> &'static str {
        "failures, skips, and errors only"
    }

    fn handler(&self, sink: Arc<dyn Sink>, base_directory: Option<PathBuf>) -> Handler {
        let mut table = default::table();
        for kind in [
            EventKind::DiscoveryStarting,
            EventKind::DiscoveryFinished,
            EventKind::AssemblyStarting,
            EventKind::AssemblyFinished,
        ] {
            table.suppress(kind);
        }
        Handler::new(table, sink, base_directory)
    }
}
