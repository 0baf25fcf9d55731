//! Log subscriber setup for the CLI.
//!
//! Logs always go to stderr so stdout carries only the report.

use tracing_subscriber::filter::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `osim_core=debug`.
pub const LOG_ENV_VAR: &str = "OSIM_LOG";

/// Default directive for a verbosity count (`-v` flags).
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Build the filter: `OSIM_LOG` wins when set and valid, otherwise the
/// verbosity level applies.
pub fn build_filter(verbose: u8) -> EnvFilter {
    let fallback = level_for_verbosity(verbose);
    match std::env::var(LOG_ENV_VAR) {
        Ok(directive) if !directive.trim().is_empty() => EnvFilter::try_new(&directive)
            .unwrap_or_else(|e| {
                eprintln!("invalid {LOG_ENV_VAR} directive {directive:?}: {e}; using {fallback}");
                EnvFilter::new(fallback)
            }),
        _ => EnvFilter::new(fallback),
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging(verbose: u8, json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(true);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("failed to init logger: {e}");
    }
}
