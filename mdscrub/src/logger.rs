// mdscrub/src/logger.rs
//! Logger initialisation for the `mdscrub` binary and its tests.
//!
//! `RUST_LOG` is honoured when no explicit level is given; the default filter
//! is `warn`, so a normal run prints only the console summary.

use env_logger::{Builder, Env};
use log::LevelFilter;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes `env_logger` once per process. Later calls are ignored.
///
/// `level` overrides `RUST_LOG` when set.
pub fn init_logger(level: Option<LevelFilter>) {
    INIT.call_once(|| {
        let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
        if let Some(level) = level {
            builder.filter_level(level);
        }
        builder.format_timestamp(None).format_target(false);
        // A logger may already be installed by a test harness.
        let _ = builder.try_init();
    });
}

/// Maps the CLI verbosity flags to a level override.
pub fn level_for(verbose: bool, quiet: bool) -> Option<LevelFilter> {
    match (verbose, quiet) {
        (_, true) => Some(LevelFilter::Error),
        (true, false) => Some(LevelFilter::Debug),
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_wins_over_verbose() {
        assert_eq!(level_for(true, true), Some(LevelFilter::Error));
        assert_eq!(level_for(true, false), Some(LevelFilter::Debug));
        assert_eq!(level_for(false, false), None);
    }
}
