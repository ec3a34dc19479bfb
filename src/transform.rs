// Pure text transforms shared by every reporting profile

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::event::FailureInfo;

/// Marker line inserted between chain levels by [`combine_stack_traces`].
/// Downstream log consumers parse this literal; treat it as frozen.
pub const INNER_STACK_TRACE_MARKER: &str = "----- Inner Stack Trace -----";

/// Indentation applied per chain level by [`combine_messages`]. Matches the
/// continuation column the default profile renders messages at.
const MESSAGE_INDENT: &str = "      ";

static STACK_FRAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<lead>\s*at .+ in )(?P<path>.+):line (?P<line>\d+)$")
        .expect("invalid stack frame regex")
});

/// Replace CR, LF, TAB, and NUL with visible two-character escapes.
///
/// Deliberately not idempotent: an already-escaped `\n` becomes `\\n` when
/// escaped again. Callers apply this exactly once per render.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\r' => out.push_str("\\r"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            other => out.push(other),
        }
    }
    out
}

/// [`escape`] for optional text; absent input renders as the empty string.
pub fn escape_opt(text: Option<&str>) -> String {
    text.map(escape).unwrap_or_default()
}

/// Join the message chain into one string: message 0 unindented, each deeper
/// message on its own line indented six spaces per chain level. Each message
/// is control-character escaped, so the level separators are the only real
/// line breaks in the result.
pub fn combine_messages(failure: &FailureInfo) -> String {
    let mut out = String::new();
    for (depth, message) in failure.messages.iter().enumerate() {
        if depth > 0 {
            out.push('\n');
            for _ in 0..depth {
                out.push_str(MESSAGE_INDENT);
            }
        }
        out.push_str(&escape(message));
    }
    out
}

/// Join the stack-trace chain in order, separating chain levels with a blank
/// line followed by the inner-stack-trace marker. Empty entries pass through
/// unchanged.
pub fn combine_stack_traces(failure: &FailureInfo) -> String {
    failure
        .stack_traces
        .join(&format!("\n\n{INNER_STACK_TRACE_MARKER}\n"))
}

/// Rewrite the file path in an `at <symbol> in <path>:line <n>` stack frame
/// to be relative to `base_directory`. Frames that do not match the pattern,
/// paths outside the base directory, and an absent base directory all leave
/// the line unchanged.
pub fn relativize_stack_frame(frame: &str, base_directory: Option<&Path>) -> String {
    let Some(base) = base_directory else {
        return frame.to_string();
    };
    let Some(caps) = STACK_FRAME_REGEX.captures(frame) else {
        return frame.to_string();
    };
    let path = Path::new(&caps["path"]);
    match path.strip_prefix(base) {
        Ok(relative) => format!("{}{}:line {}", &caps["lead"], relative.display(), &caps["line"]),
        Err(_) => frame.to_string(),
    }
}
