// Per-variant event dispatch over layered handler tables

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::error::ReportError;
use crate::event::{Event, EventKind};
use crate::sink::Sink;

/// One handler entry. Returns `Ok(true)` to let further-registered handlers
/// for the same variant run, `Ok(false)` to stop propagation for this event.
pub type HandlerFn = Arc<dyn Fn(&HandlerContext, &Event) -> Result<bool, ReportError> + Send + Sync>;

/// Per-run state shared by every handler in a table: the sink and the base
/// directory snapshot taken at handler construction. Both are read-only for
/// the handler's lifetime.
pub struct HandlerContext {
    pub sink: Arc<dyn Sink>,
    pub base_directory: Option<PathBuf>,
}

/// Routing table from variant tag to its handler layers. Built once when a
/// profile constructs its handler, immutable afterward. The front of each
/// layer list is the most-derived entry, so a derived profile's handler runs
/// before the table it started from.
#[derive(Clone, Default)]
pub struct HandlerTable {
    entries: HashMap<EventKind, Vec<HandlerFn>>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind`, ahead of any handler already there.
    pub fn insert<F>(&mut self, kind: EventKind, handler: F)
    where
        F: Fn(&HandlerContext, &Event) -> Result<bool, ReportError> + Send + Sync + 'static,
    {
        self.entries.entry(kind).or_default().insert(0, Arc::new(handler));
    }

    /// Register a handler that suppresses the variant outright: no output,
    /// stop propagation.
    pub fn suppress(&mut self, kind: EventKind) {
        self.insert(kind, |_, _| Ok(false));
    }
}

/// Route one event through `table`. A variant with no entry is passed through
/// as a successful no-op, so tables built against an older event model keep
/// working as new variants appear.
pub fn dispatch(
    ctx: &HandlerContext,
    table: &HandlerTable,
    event: &Event,
) -> Result<bool, ReportError> {
    let Some(handlers) = table.entries.get(&event.kind()) else {
        return Ok(true);
    };
    for handler in handlers {
        if !handler(ctx, event)? {
            return Ok(false);
        }
    }
    Ok(true)
}
