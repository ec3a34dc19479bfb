// Reporting layer for test-execution runners: consumes a stream of test
// lifecycle events and renders them through a selectable reporting profile.

pub mod dispatch;
pub mod environment;
pub mod error;
pub mod event;
pub mod logging;
pub mod profile;
pub mod sink;
pub mod transform;

pub use environment::Environment;
pub use error::ReportError;
pub use event::{CleanupScope, Event, EventKind, FailureInfo, MethodDisplay};
pub use profile::{Handler, Profile, auto_enabled, find, registry};
pub use sink::{BufferSink, ConsoleSink, FileSink, LineSink, Severity, Sink, TracingSink};
