// Test lifecycle event model

use serde::Serialize;
use std::fmt;

/// Sentinel rendered when a failure event arrives with no exception types.
pub const UNKNOWN_EXCEPTION_TYPE: &str = "(Unknown Exception Type)";

/// Ordered exception chain attached to a failure event.
///
/// The three vectors are indexed in parallel: position `i` across all of them
/// describes the i-th exception in the chain, in exactly the order the
/// execution engine produced it. Empty stack traces are legal and preserved.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureInfo {
    pub exception_types: Vec<String>,
    pub messages: Vec<String>,
    pub stack_traces: Vec<String>,
}

impl FailureInfo {
    pub fn new(
        exception_types: Vec<String>,
        messages: Vec<String>,
        stack_traces: Vec<String>,
    ) -> Self {
        Self {
            exception_types,
            messages,
            stack_traces,
        }
    }

    /// First exception type in the chain, or the documented sentinel when the
    /// engine supplied none.
    pub fn first_exception_type(&self) -> &str {
        self.exception_types
            .first()
            .map(String::as_str)
            .unwrap_or(UNKNOWN_EXCEPTION_TYPE)
    }
}

/// How the execution engine formats test method names during discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MethodDisplay {
    ClassAndMethod,
    Method,
}

impl fmt::Display for MethodDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClassAndMethod => write!(f, "classAndMethod"),
            Self::Method => write!(f, "method"),
        }
    }
}

/// Scope in which a cleanup failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CleanupScope {
    Assembly,
    TestCase,
    TestClass,
    TestCollection,
    Test,
    TestMethod,
}

impl CleanupScope {
    /// Failure-kind label with the scope's identifying label embedded verbatim.
    pub fn failure_label(&self, scope_label: &str) -> String {
        let kind = match self {
            Self::Assembly => "Test Assembly",
            Self::TestCase => "Test Case",
            Self::TestClass => "Test Class",
            Self::TestCollection => "Test Collection",
            Self::Test => "Test",
            Self::TestMethod => "Test Method",
        };
        format!("{kind} Cleanup Failure ({scope_label})")
    }
}

/// One immutable record describing a single occurrence in a test run's
/// lifecycle. Events from different assemblies may interleave under parallel
/// execution; events from one assembly arrive as a strict sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
#[non_exhaustive]
pub enum Event {
    DiscoveryStarting {
        assembly_display_path: String,
        diagnostics_enabled: bool,
        method_display_mode: MethodDisplay,
        parallel_enabled: bool,
        /// 0 means unlimited.
        max_threads: usize,
    },
    DiscoveryFinished {
        assembly_display_path: String,
        diagnostics_enabled: bool,
        cases_discovered: usize,
        cases_to_run: usize,
    },
    AssemblyStarting {
        assembly_display_path: String,
    },
    AssemblyFinished {
        assembly_display_path: String,
    },
    TestStarting {
        test_display_name: String,
    },
    TestPassed {
        test_display_name: String,
    },
    TestFailed {
        test_display_name: String,
        failure: FailureInfo,
    },
    TestSkipped {
        test_display_name: String,
        reason: String,
    },
    ErrorMessage {
        failure: FailureInfo,
    },
    CleanupFailure {
        scope: CleanupScope,
        scope_label: String,
        failure: FailureInfo,
    },
    DiagnosticMessage {
        message: String,
    },
}

/// Variant tag used as the dispatch key. New tags may appear as the event
/// model evolves; tables without an entry for a tag simply pass it through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum EventKind {
    DiscoveryStarting,
    DiscoveryFinished,
    AssemblyStarting,
    AssemblyFinished,
    TestStarting,
    TestPassed,
    TestFailed,
    TestSkipped,
    ErrorMessage,
    CleanupFailure,
    DiagnosticMessage,
}

impl EventKind {
    /// Every tag known to this build of the event model.
    pub fn all() -> &'static [EventKind] {
        &[
            Self::DiscoveryStarting,
            Self::DiscoveryFinished,
            Self::AssemblyStarting,
            Self::AssemblyFinished,
            Self::TestStarting,
            Self::TestPassed,
            Self::TestFailed,
            Self::TestSkipped,
            Self::ErrorMessage,
            Self::CleanupFailure,
            Self::DiagnosticMessage,
        ]
    }
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::DiscoveryStarting { .. } => EventKind::DiscoveryStarting,
            Self::DiscoveryFinished { .. } => EventKind::DiscoveryFinished,
            Self::AssemblyStarting { .. } => EventKind::AssemblyStarting,
            Self::AssemblyFinished { .. } => EventKind::AssemblyFinished,
            Self::TestStarting { .. } => EventKind::TestStarting,
            Self::TestPassed { .. } => EventKind::TestPassed,
            Self::TestFailed { .. } => EventKind::TestFailed,
            Self::TestSkipped { .. } => EventKind::TestSkipped,
            Self::ErrorMessage { .. } => EventKind::ErrorMessage,
            Self::CleanupFailure { .. } => EventKind::CleanupFailure,
            Self::DiagnosticMessage { .. } => EventKind::DiagnosticMessage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_exception_type_sentinel() {
        let failure = FailureInfo::default();
        assert_eq!(failure.first_exception_type(), "(Unknown Exception Type)");
    }

    #[test]
    fn test_first_exception_type_present() {
        let failure = FailureInfo::new(
            vec!["System.Exception".into(), "System.IO.IOException".into()],
            vec!["outer".into(), "inner".into()],
            vec![String::new(), String::new()],
        );
        assert_eq!(failure.first_exception_type(), "System.Exception");
    }

    #[test]
    fn test_cleanup_scope_labels() {
        assert_eq!(
            CleanupScope::Assembly.failure_label("/a/b.dll"),
            "Test Assembly Cleanup Failure (/a/b.dll)"
        );
        assert_eq!(
            CleanupScope::TestCase.failure_label("MyCase"),
            "Test Case Cleanup Failure (MyCase)"
        );
        assert_eq!(
            CleanupScope::TestClass.failure_label("MyClass"),
            "Test Class Cleanup Failure (MyClass)"
        );
        assert_eq!(
            CleanupScope::TestCollection.failure_label("Coll"),
            "Test Collection Cleanup Failure (Coll)"
        );
        assert_eq!(
            CleanupScope::Test.failure_label("t"),
            "Test Cleanup Failure (t)"
        );
        assert_eq!(
            CleanupScope::TestMethod.failure_label("M"),
            "Test Method Cleanup Failure (M)"
        );
    }

    #[test]
    fn test_event_kind_mapping() {
        let event = Event::TestPassed {
            test_display_name: "x".into(),
        };
        assert_eq!(event.kind(), EventKind::TestPassed);

        let event = Event::CleanupFailure {
            scope: CleanupScope::Test,
            scope_label: "t".into(),
            failure: FailureInfo::default(),
        };
        assert_eq!(event.kind(), EventKind::CleanupFailure);
    }

    #[test]
    fn test_method_display_rendering() {
        assert_eq!(MethodDisplay::ClassAndMethod.to_string(), "classAndMethod");
        assert_eq!(MethodDisplay::Method.to_string(), "method");
    }

    #[test]
    fn test_event_kind_all_covers_every_variant() {
        assert_eq!(EventKind::all().len(), 11);
    }
}
