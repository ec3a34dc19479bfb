// JSON profile: newline-delimited JSON, one object per event

use std::path::PathBuf;
use std::sync::Arc;

use super::{Handler, Profile};
use crate::dispatch::{HandlerContext, HandlerTable};
use crate::error::ReportError;
use crate::event::{Event, EventKind};
use crate::sink::Sink;

/// Streams every event as one JSON line with an `event` discriminant and an
/// RFC 3339 timestamp, for CI systems and log processors that would rather
/// parse than scrape.
pub struct JsonProfile;

impl Profile for JsonProfile {
    fn selector(&self) -> &'static str {
        "json"
    }

    fn description(&self) -> &'static str {
        "newline-delimited JSON, one object per event"
    }

    fn handler(&self, sink: Arc<dyn Sink>, base_directory: Option<PathBuf>) -> Handler {
        let mut table = HandlerTable::new();
        for kind in EventKind::all() {
            table.insert(*kind, emit);
        }
        Handler::new(table, sink, base_directory)
    }
}

fn emit(ctx: &HandlerContext, event: &Event) -> Result<bool, ReportError> {
    let mut value = serde_json::to_value(event)?;
    value["timestamp"] = serde_json::json!(chrono::Utc::now().to_rfc3339());
    ctx.sink.log_message(&serde_json::to_string(&value)?)?;
    Ok(true)
}
