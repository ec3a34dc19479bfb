// Silent profile: render nothing at all

use std::path::PathBuf;
use std::sync::Arc;

use super::{Handler, Profile};
use crate::dispatch::HandlerTable;
use crate::event::EventKind;
use crate::sink::Sink;

/// Suppresses every known event variant. Useful when the driver only cares
/// about machine-readable artifacts written elsewhere.
pub struct SilentProfile;

impl Profile for SilentProfile {
    fn selector(&self) -> &'static str {
        "silent"
    }

    fn description(&self) -> &'static str {
        "no output"
    }

    fn handler(&self, sink: Arc<dyn Sink>, base_directory: Option<PathBuf>) -> Handler {
        let mut table = HandlerTable::new();
        for kind in EventKind::all() {
            table.suppress(*kind);
        }
        Handler::new(table, sink, base_directory)
    }
}
