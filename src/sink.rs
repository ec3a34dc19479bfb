// Logger sink contract and the bundled sink implementations

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

/// Severity of one rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Message,
    Important,
    Warning,
    Error,
}

/// Write handle held inside an exclusive scope. Writes go straight to the
/// destination without re-acquiring the sink's lock, so a multi-line render
/// cannot deadlock on itself.
pub trait LineSink {
    fn log(&mut self, severity: Severity, line: &str) -> io::Result<()>;

    fn log_message(&mut self, line: &str) -> io::Result<()> {
        self.log(Severity::Message, line)
    }

    fn log_important(&mut self, line: &str) -> io::Result<()> {
        self.log(Severity::Important, line)
    }

    fn log_warning(&mut self, line: &str) -> io::Result<()> {
        self.log(Severity::Warning, line)
    }

    fn log_error(&mut self, line: &str) -> io::Result<()> {
        self.log(Severity::Error, line)
    }
}

/// Minimal capability the reporting layer requires from an output destination.
///
/// `log` writes one line. `exclusive` runs `block` while holding the sink's
/// lock so that every line the block writes lands contiguously in the output,
/// even when other threads are logging through the same sink. Write failures
/// propagate unmodified; the reporting layer never retries or swallows them.
pub trait Sink: Send + Sync {
    fn log(&self, severity: Severity, line: &str) -> io::Result<()>;

    fn exclusive(
        &self,
        block: &mut dyn FnMut(&mut dyn LineSink) -> io::Result<()>,
    ) -> io::Result<()>;

    fn log_message(&self, line: &str) -> io::Result<()> {
        self.log(Severity::Message, line)
    }

    fn log_important(&self, line: &str) -> io::Result<()> {
        self.log(Severity::Important, line)
    }

    fn log_warning(&self, line: &str) -> io::Result<()> {
        self.log(Severity::Warning, line)
    }

    fn log_error(&self, line: &str) -> io::Result<()> {
        self.log(Severity::Error, line)
    }
}

/// In-memory sink capturing every line with its severity. Used by the crate's
/// own tests and by embedders that post-process output.
#[derive(Debug, Default)]
pub struct BufferSink {
    lines: Mutex<Vec<(Severity, String)>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything captured so far.
    pub fn lines(&self) -> Vec<(Severity, String)> {
        self.lines.lock().unwrap().clone()
    }

    /// Captured text only, one entry per line.
    pub fn rendered(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .map(|(_, line)| line.clone())
            .collect()
    }
}

struct BufferGuard<'a>(MutexGuard<'a, Vec<(Severity, String)>>);

impl LineSink for BufferGuard<'_> {
    fn log(&mut self, severity: Severity, line: &str) -> io::Result<()> {
        self.0.push((severity, line.to_string()));
        Ok(())
    }
}

impl Sink for BufferSink {
    fn log(&self, severity: Severity, line: &str) -> io::Result<()> {
        self.lines.lock().unwrap().push((severity, line.to_string()));
        Ok(())
    }

    fn exclusive(
        &self,
        block: &mut dyn FnMut(&mut dyn LineSink) -> io::Result<()>,
    ) -> io::Result<()> {
        let mut guard = BufferGuard(self.lines.lock().unwrap());
        block(&mut guard)
    }
}

/// Console sink: messages to stdout, warnings and errors to stderr, flushed
/// per line so interleaved runs stay readable.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    lock: Mutex<()>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }
}

struct ConsoleGuard;

impl LineSink for ConsoleGuard {
    fn log(&mut self, severity: Severity, line: &str) -> io::Result<()> {
        match severity {
            Severity::Message | Severity::Important => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{line}")?;
                stdout.flush()
            }
            Severity::Warning | Severity::Error => {
                let mut stderr = io::stderr().lock();
                writeln!(stderr, "{line}")?;
                stderr.flush()
            }
        }
    }
}

impl Sink for ConsoleSink {
    fn log(&self, severity: Severity, line: &str) -> io::Result<()> {
        let _guard = self.lock.lock().unwrap();
        ConsoleGuard.log(severity, line)
    }

    fn exclusive(
        &self,
        block: &mut dyn FnMut(&mut dyn LineSink) -> io::Result<()>,
    ) -> io::Result<()> {
        let _guard = self.lock.lock().unwrap();
        block(&mut ConsoleGuard)
    }
}

/// File sink: plain lines appended to a log file.
#[derive(Debug)]
pub struct FileSink {
    file: Mutex<File>,
}

impl FileSink {
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        Ok(Self {
            file: Mutex::new(File::create(path)?),
        })
    }
}

struct FileGuard<'a>(MutexGuard<'a, File>);

impl LineSink for FileGuard<'_> {
    fn log(&mut self, _severity: Severity, line: &str) -> io::Result<()> {
        writeln!(self.0, "{line}")
    }
}

impl Sink for FileSink {
    fn log(&self, severity: Severity, line: &str) -> io::Result<()> {
        FileGuard(self.file.lock().unwrap()).log(severity, line)
    }

    fn exclusive(
        &self,
        block: &mut dyn FnMut(&mut dyn LineSink) -> io::Result<()>,
    ) -> io::Result<()> {
        let mut guard = FileGuard(self.file.lock().unwrap());
        block(&mut guard)
    }
}

/// Sink forwarding every line to `tracing` events. `tracing` has no grouping
/// primitive, so exclusivity is enforced with an internal lock; subscribers
/// that buffer per-event still see lines in emission order.
#[derive(Debug, Default)]
pub struct TracingSink {
    lock: Mutex<()>,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

struct TracingGuard;

impl LineSink for TracingGuard {
    fn log(&mut self, severity: Severity, line: &str) -> io::Result<()> {
        match severity {
            Severity::Message => tracing::info!(target: "runreport", "{line}"),
            Severity::Important => tracing::info!(target: "runreport", important = true, "{line}"),
            Severity::Warning => tracing::warn!(target: "runreport", "{line}"),
            Severity::Error => tracing::error!(target: "runreport", "{line}"),
        }
        Ok(())
    }
}

impl Sink for TracingSink {
    fn log(&self, severity: Severity, line: &str) -> io::Result<()> {
        let _guard = self.lock.lock().unwrap();
        TracingGuard.log(severity, line)
    }

    fn exclusive(
        &self,
        block: &mut dyn FnMut(&mut dyn LineSink) -> io::Result<()>,
    ) -> io::Result<()> {
        let _guard = self.lock.lock().unwrap();
        block(&mut TracingGuard)
    }
}
