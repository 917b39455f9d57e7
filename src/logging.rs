use crate::config::LOG_ENV;
use std::{env, sync::Once};
use tracing_subscriber::EnvFilter;

pub const DEFAULT_DIRECTIVE: &str = "info";

static INIT: Once = Once::new();

/// Picks the filter directive: an explicit level, then `GASH_LOG`, then
/// `RUST_LOG`, then [`DEFAULT_DIRECTIVE`]. Blank values are skipped.
pub fn resolve_directive(level: Option<&str>) -> String {
    level
        .map(str::to_string)
        .into_iter()
        .chain(env::var(LOG_ENV).ok())
        .chain(env::var(EnvFilter::DEFAULT_ENV).ok())
        .map(|directive| directive.trim().to_string())
        .find(|directive| !directive.is_empty())
        .unwrap_or_else(|| DEFAULT_DIRECTIVE.to_string())
}

/// Parses `directive`, falling back to [`DEFAULT_DIRECTIVE`] with a warning on
/// stderr when it is not a valid `EnvFilter`.
pub fn filter_for(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|err| {
        eprintln!("gash: ignoring log filter '{directive}' ({err}), using '{DEFAULT_DIRECTIVE}'");
        EnvFilter::new(DEFAULT_DIRECTIVE)
    })
}

/// Installs the process-wide subscriber on the first call. Returns whether
/// this call installed it; later calls and an already-set dispatcher are
/// left alone.
pub fn init_with_level(level: Option<&str>) -> bool {
    let mut installed = false;
    INIT.call_once(|| {
        if tracing::dispatcher::has_been_set() {
            return;
        }
        let filter = filter_for(&resolve_directive(level));
        installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    });
    installed
}
