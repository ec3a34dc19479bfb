// Reporting profiles and the process-wide profile registry

pub mod default;
pub mod json;
pub mod quiet;
pub mod silent;
pub mod teamcity;
pub mod verbose;

pub use default::DefaultProfile;
pub use json::JsonProfile;
pub use quiet::QuietProfile;
pub use silent::SilentProfile;
pub use teamcity::TeamCityProfile;
pub use verbose::VerboseProfile;

use once_cell::sync::Lazy;
use std::path::PathBuf;
use std::sync::Arc;

use crate::dispatch::{HandlerContext, HandlerTable, dispatch};
use crate::environment::Environment;
use crate::error::ReportError;
use crate::event::Event;
use crate::sink::Sink;

/// A named, composable set of event-render behaviors. Profiles are stateless
/// templates; per-run state lives in the [`Handler`] they construct.
pub trait Profile: Send + Sync {
    /// Unique selector string the external selection logic matches against.
    fn selector(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Whether this profile should be picked automatically for the given
    /// environment snapshot. Explicit selection always wins.
    fn environmentally_enabled(&self, _env: &Environment) -> bool {
        false
    }

    /// Bind a sink and base-directory snapshot into a handler for one run.
    fn handler(&self, sink: Arc<dyn Sink>, base_directory: Option<PathBuf>) -> Handler;
}

/// A profile bound to a sink for one run. Feed it the run's event stream;
/// it is safe to share across the engine's worker threads.
pub struct Handler {
    ctx: HandlerContext,
    table: HandlerTable,
}

impl Handler {
    pub fn new(table: HandlerTable, sink: Arc<dyn Sink>, base_directory: Option<PathBuf>) -> Self {
        Self {
            ctx: HandlerContext {
                sink,
                base_directory,
            },
            table,
        }
    }

    /// Visit entry point: render one event. `Ok(true)` means keep feeding
    /// events; `Ok(false)` means this event's rendering was suppressed.
    pub fn on_event(&self, event: &Event) -> Result<bool, ReportError> {
        dispatch(&self.ctx, &self.table, event)
    }
}

static REGISTRY: Lazy<Vec<&'static dyn Profile>> = Lazy::new(|| {
    vec![
        &DefaultProfile,
        &VerboseProfile,
        &QuietProfile,
        &SilentProfile,
        &JsonProfile,
        &TeamCityProfile,
    ]
});

/// Every bundled profile, in selection-precedence order.
pub fn registry() -> &'static [&'static dyn Profile] {
    &REGISTRY
}

/// Look up a profile by its selector string.
pub fn find(selector: &str) -> Result<&'static dyn Profile, ReportError> {
    registry()
        .iter()
        .copied()
        .find(|profile| profile.selector() == selector)
        .ok_or_else(|| ReportError::UnknownProfile(selector.to_string()))
}

/// First profile whose auto-enable predicate matches the environment.
pub fn auto_enabled(env: &Environment) -> Option<&'static dyn Profile> {
    registry()
        .iter()
        .copied()
        .find(|profile| profile.environmentally_enabled(env))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectors_are_unique() {
        let mut selectors: Vec<_> = registry().iter().map(|p| p.selector()).collect();
        selectors.sort_unstable();
        selectors.dedup();
        assert_eq!(selectors.len(), registry().len());
    }

    #[test]
    fn test_find_known_selector() {
        assert_eq!(find("quiet").unwrap().selector(), "quiet");
    }

    #[test]
    fn test_find_unknown_selector() {
        assert!(matches!(
            find("nope"),
            Err(ReportError::UnknownProfile(_))
        ));
    }

    #[test]
    fn test_only_teamcity_auto_enables() {
        let empty = Environment::empty();
        assert!(auto_enabled(&empty).is_none());

        let tc: Environment = [("TEAMCITY_PROJECT_NAME".to_string(), "p".to_string())]
            .into_iter()
            .collect();
        assert_eq!(auto_enabled(&tc).unwrap().selector(), "teamcity");
    }
}
