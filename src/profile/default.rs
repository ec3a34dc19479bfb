// Baseline rendering for every event variant

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{Handler, Profile};
use crate::dispatch::{HandlerContext, HandlerTable};
use crate::error::ReportError;
use crate::event::{Event, EventKind, FailureInfo};
use crate::sink::{LineSink, Severity, Sink};
use crate::transform;

/// The profile every run gets unless another is selected. Renders discovery,
/// assembly, failure, skip, and error events; test starts and passes are
/// opt-in via the verbose profile.
pub struct DefaultProfile;

impl Profile for DefaultProfile {
    fn selector(&self) -> &'static str {
        "default"
    }

    fn description(&self) -> &'static str {
        "baseline output: failures, skips, and run progress"
    }

    fn handler(&self, sink: Arc<dyn Sink>, base_directory: Option<PathBuf>) -> Handler {
        Handler::new(table(), sink, base_directory)
    }
}

/// The baseline handler table. Derived profiles start here and layer their
/// own entries on top.
pub fn table() -> HandlerTable {
    let mut table = HandlerTable::new();
    table.insert(EventKind::DiscoveryStarting, on_discovery_starting);
    table.insert(EventKind::DiscoveryFinished, on_discovery_finished);
    table.insert(EventKind::AssemblyStarting, on_assembly_starting);
    table.insert(EventKind::AssemblyFinished, on_assembly_finished);
    table.insert(EventKind::TestFailed, on_test_failed);
    table.insert(EventKind::TestSkipped, on_test_skipped);
    table.insert(EventKind::ErrorMessage, on_error_message);
    table.insert(EventKind::CleanupFailure, on_cleanup_failure);
    table
}

fn on_discovery_starting(ctx: &HandlerContext, event: &Event) -> Result<bool, ReportError> {
    let Event::DiscoveryStarting {
        assembly_display_path,
        diagnostics_enabled,
        method_display_mode,
        parallel_enabled,
        max_threads,
    } = event
    else {
        return Ok(true);
    };

    if *diagnostics_enabled {
        let parallel = if *parallel_enabled { "on" } else { "off" };
        let threads = match max_threads {
            0 => "unlimited".to_string(),
            n => n.to_string(),
        };
        ctx.sink.log_message(&format!(
            "  Discovering: {assembly_display_path} (method display = {method_display_mode}, parallel = {parallel}, max threads = {threads})"
        ))?;
    } else {
        ctx.sink
            .log_message(&format!("  Discovering: {assembly_display_path}"))?;
    }
    Ok(true)
}

fn on_discovery_finished(ctx: &HandlerContext, event: &Event) -> Result<bool, ReportError> {
    let Event::DiscoveryFinished {
        assembly_display_path,
        diagnostics_enabled,
        cases_discovered,
        cases_to_run,
    } = event
    else {
        return Ok(true);
    };

    if *diagnostics_enabled {
        ctx.sink.log_message(&format!(
            "  Discovered:  {assembly_display_path} (running {cases_to_run} of {cases_discovered} test cases)"
        ))?;
    } else {
        ctx.sink
            .log_message(&format!("  Discovered:  {assembly_display_path}"))?;
    }
    Ok(true)
}

fn on_assembly_starting(ctx: &HandlerContext, event: &Event) -> Result<bool, ReportError> {
    let Event::AssemblyStarting {
        assembly_display_path,
    } = event
    else {
        return Ok(true);
    };
    ctx.sink
        .log_message(&format!("  Starting:    {assembly_display_path}"))?;
    Ok(true)
}

fn on_assembly_finished(ctx: &HandlerContext, event: &Event) -> Result<bool, ReportError> {
    let Event::AssemblyFinished {
        assembly_display_path,
    } = event
    else {
        return Ok(true);
    };
    ctx.sink
        .log_message(&format!("  Finished:    {assembly_display_path}"))?;
    Ok(true)
}

fn on_test_failed(ctx: &HandlerContext, event: &Event) -> Result<bool, ReportError> {
    let Event::TestFailed {
        test_display_name,
        failure,
    } = event
    else {
        return Ok(true);
    };

    let base = ctx.base_directory.as_deref();
    ctx.sink.exclusive(&mut |out| {
        out.log_error(&format!(
            "    {} [FAIL]",
            transform::escape(test_display_name)
        ))?;
        out.log_important(&format!("      {}", transform::combine_messages(failure)))?;
        log_stack_trace(out, failure, base)
    })?;
    Ok(true)
}

fn on_test_skipped(ctx: &HandlerContext, event: &Event) -> Result<bool, ReportError> {
    let Event::TestSkipped {
        test_display_name,
        reason,
    } = event
    else {
        return Ok(true);
    };

    ctx.sink.exclusive(&mut |out| {
        out.log_warning(&format!(
            "    {} [SKIP]",
            transform::escape(test_display_name)
        ))?;
        out.log_warning(&format!("      {}", transform::escape(reason)))
    })?;
    Ok(true)
}

fn on_error_message(ctx: &HandlerContext, event: &Event) -> Result<bool, ReportError> {
    let Event::ErrorMessage { failure } = event else {
        return Ok(true);
    };
    log_failure(ctx, "FATAL ERROR", failure)
}

fn on_cleanup_failure(ctx: &HandlerContext, event: &Event) -> Result<bool, ReportError> {
    let Event::CleanupFailure {
        scope,
        scope_label,
        failure,
    } = event
    else {
        return Ok(true);
    };
    log_failure(ctx, &scope.failure_label(scope_label), failure)
}

/// Shared render routine for error messages and every cleanup-failure scope:
/// error header with the failure-kind label, combined messages, stack trace.
fn log_failure(
    ctx: &HandlerContext,
    label: &str,
    failure: &FailureInfo,
) -> Result<bool, ReportError> {
    let base = ctx.base_directory.as_deref();
    ctx.sink.exclusive(&mut |out| {
        out.log_error(&format!(
            "    [{label}] {}",
            transform::escape(failure.first_exception_type())
        ))?;
        out.log_important(&format!("      {}", transform::combine_messages(failure)))?;
        log_stack_trace(out, failure, base)
    })?;
    Ok(true)
}

/// Header plus one line per frame, each relativized against the base
/// directory captured at handler construction. Nothing when the combined
/// trace is empty.
fn log_stack_trace(
    out: &mut dyn LineSink,
    failure: &FailureInfo,
    base_directory: Option<&Path>,
) -> std::io::Result<()> {
    let trace = transform::combine_stack_traces(failure);
    if trace.is_empty() {
        return Ok(());
    }

    out.log(Severity::Important, "      Stack Trace:")?;
    for frame in trace.lines() {
        out.log(
            Severity::Important,
            &format!(
                "        {}",
                transform::relativize_stack_frame(frame, base_directory)
            ),
        )?;
    }
    Ok(())
}
