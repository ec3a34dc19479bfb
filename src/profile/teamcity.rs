// TeamCity profile: service messages for TeamCity build logs

use std::path::PathBuf;
use std::sync::Arc;

use super::{Handler, Profile};
use crate::dispatch::{HandlerContext, HandlerTable};
use crate::environment::Environment;
use crate::error::ReportError;
use crate::event::{Event, EventKind};
use crate::sink::{Severity, Sink};
use crate::transform;

/// Emits `##teamcity[...]` service messages. Auto-enabled when the run is
/// inside a TeamCity build agent.
pub struct TeamCityProfile;

impl Profile for TeamCityProfile {
    fn selector(&self) -> &'static str {
        "teamcity"
    }

    fn description(&self) -> &'static str {
        "TeamCity service messages"
    }

    fn environmentally_enabled(&self, env: &Environment) -> bool {
        env.contains("TEAMCITY_PROJECT_NAME")
    }

    fn handler(&self, sink: Arc<dyn Sink>, base_directory: Option<PathBuf>) -> Handler {
        let mut table = HandlerTable::new();
        table.insert(EventKind::AssemblyStarting, on_assembly_starting);
        table.insert(EventKind::AssemblyFinished, on_assembly_finished);
        table.insert(EventKind::TestStarting, on_test_starting);
        table.insert(EventKind::TestPassed, on_test_passed);
        table.insert(EventKind::TestFailed, on_test_failed);
        table.insert(EventKind::TestSkipped, on_test_skipped);
        table.insert(EventKind::ErrorMessage, on_error_message);
        table.insert(EventKind::CleanupFailure, on_cleanup_failure);
        Handler::new(table, sink, base_directory)
    }
}

/// TeamCity service-message value escaping.
fn tc_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '|' => out.push_str("||"),
            '\'' => out.push_str("|'"),
            '\n' => out.push_str("|n"),
            '\r' => out.push_str("|r"),
            '[' => out.push_str("|["),
            ']' => out.push_str("|]"),
            other => out.push(other),
        }
    }
    out
}

fn on_assembly_starting(ctx: &HandlerContext, event: &Event) -> Result<bool, ReportError> {
    let Event::AssemblyStarting {
        assembly_display_path,
    } = event
    else {
        return Ok(true);
    };
    ctx.sink.log_message(&format!(
        "##teamcity[testSuiteStarted name='{}']",
        tc_escape(assembly_display_path)
    ))?;
    Ok(true)
}

fn on_assembly_finished(ctx: &HandlerContext, event: &Event) -> Result<bool, ReportError> {
    let Event::AssemblyFinished {
        assembly_display_path,
    } = event
    else {
        return Ok(true);
    };
    ctx.sink.log_message(&format!(
        "##teamcity[testSuiteFinished name='{}']",
        tc_escape(assembly_display_path)
    ))?;
    Ok(true)
}

fn on_test_starting(ctx: &HandlerContext, event: &Event) -> Result<bool, ReportError> {
    let Event::TestStarting { test_display_name } = event else {
        return Ok(true);
    };
    ctx.sink.log_message(&format!(
        "##teamcity[testStarted name='{}']",
        tc_escape(test_display_name)
    ))?;
    Ok(true)
}

fn on_test_passed(ctx: &HandlerContext, event: &Event) -> Result<bool, ReportError> {
    let Event::TestPassed { test_display_name } = event else {
        return Ok(true);
    };
    ctx.sink.log_message(&format!(
        "##teamcity[testFinished name='{}']",
        tc_escape(test_display_name)
    ))?;
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

    let name = tc_escape(test_display_name);
    let message = tc_escape(&transform::combine_messages(failure));
    let details = tc_escape(&transform::combine_stack_traces(failure));
    ctx.sink.exclusive(&mut |out| {
        out.log(
            Severity::Message,
            &format!("##teamcity[testFailed name='{name}' message='{message}' details='{details}']"),
        )?;
        out.log(
            Severity::Message,
            &format!("##teamcity[testFinished name='{name}']"),
        )
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

    let name = tc_escape(test_display_name);
    ctx.sink.exclusive(&mut |out| {
        out.log(
            Severity::Message,
            &format!(
                "##teamcity[testIgnored name='{name}' message='{}']",
                tc_escape(reason)
            ),
        )?;
        out.log(
            Severity::Message,
            &format!("##teamcity[testFinished name='{name}']"),
        )
    })?;
    Ok(true)
}

fn on_error_message(ctx: &HandlerContext, event: &Event) -> Result<bool, ReportError> {
    let Event::ErrorMessage { failure } = event else {
        return Ok(true);
    };
    log_build_problem(ctx, "FATAL ERROR", failure)
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
    log_build_problem(ctx, &scope.failure_label(scope_label), failure)
}

fn log_build_problem(
    ctx: &HandlerContext,
    label: &str,
    failure: &crate::event::FailureInfo,
) -> Result<bool, ReportError> {
    ctx.sink.log_message(&format!(
        "##teamcity[message text='|[{}|] {}' errorDetails='{}' status='ERROR']",
        tc_escape(label),
        tc_escape(&transform::combine_messages(failure)),
        tc_escape(&transform::combine_stack_traces(failure)),
    ))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tc_escape_table() {
        assert_eq!(tc_escape("a|b'c\nd\re[f]g"), "a||b|'c|nd|re|[f|]g");
    }

    #[test]
    fn test_tc_escape_plain_text() {
        assert_eq!(tc_escape("MyTests.Should_Pass"), "MyTests.Should_Pass");
    }
}
