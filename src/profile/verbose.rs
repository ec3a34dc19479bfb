// Verbose profile: opt-in progress lines for test starts and passes

use std::path::PathBuf;
use std::sync::Arc;

use super::{Handler, Profile, default};
use crate::event::{Event, EventKind};
use crate::sink::Sink;
use crate::transform;

/// Adds `START:` and `PASS:` progress lines on top of the default table.
/// Failure and skip rendering are inherited untouched.
pub struct VerboseProfile;

impl Profile for VerboseProfile {
    fn selector(&self) -> &'static str {
        "verbose"
    }

    fn description(&self) -> &'static str {
        "default output plus a line for every test start and pass"
    }

    fn handler(&self, sink: Arc<dyn Sink>, base_directory: Option<PathBuf>) -> Handler {
        let mut table = default::table();

        table.insert(EventKind::TestStarting, |ctx, event| {
            let Event::TestStarting { test_display_name } = event else {
                return Ok(true);
            };
            ctx.sink
                .log_message(&format!("    START: {}", transform::escape(test_display_name)))?;
            Ok(true)
        });

        table.insert(EventKind::TestPassed, |ctx, event| {
            let Event::TestPassed { test_display_name } = event else {
                return Ok(true);
            };
            ctx.sink
                .log_message(&format!("    PASS: {}", transform::escape(test_display_name)))?;
            Ok(true)
        });

        Handler::new(table, sink, base_directory)
    }
}
