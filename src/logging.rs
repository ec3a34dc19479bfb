// Diagnostics formatting for the reporting layer's own tracing output

use chrono::Local;
use tracing::{Event, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Compact single-line formatter: `LEVEL [HH:MM:SS]: message`.
pub struct LineFormatter;

impl<S, N> FormatEvent<S, N> for LineFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let level = *event.metadata().level();
        let timestamp = Local::now().format("%H:%M:%S");

        write!(writer, "{level:>5} [{timestamp}]: ")?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Install a global subscriber for the reporting layer's diagnostics,
/// filtered by `RUNREPORT_LOG` (defaults to `info`). Intended for embedders
/// that pair a [`TracingSink`](crate::sink::TracingSink) with nothing else
/// consuming `tracing`.
pub fn init_diagnostics() -> Result<(), TryInitError> {
    let filter =
        EnvFilter::try_from_env("RUNREPORT_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().event_format(LineFormatter))
        .try_init()
}
