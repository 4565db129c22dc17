//! Log initialization.
//!
//! Logs go to stderr so stdout stays valid JSON. The filter is taken from
//! `--log-level`, then `-v`, then `RUST_LOG`, and defaults to `warn`.

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "warn";

/// Install the global subscriber. A second call is a no-op.
pub fn init(verbosity: u8, log_level: Option<&str>) {
    let env_filter = match directive(verbosity, log_level) {
        Some(directive) => EnvFilter::try_new(&directive)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

/// Explicit filter requested on the command line, if any.
fn directive(verbosity: u8, log_level: Option<&str>) -> Option<String> {
    if let Some(level) = log_level.map(str::trim).filter(|level| !level.is_empty()) {
        return Some(level.to_string());
    }
    match verbosity {
        0 => None,
        1 => Some(String::from("debug")),
        _ => Some(String::from("trace")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_wins_over_verbosity() {
        assert_eq!(directive(2, Some("ndq_core=info")).as_deref(), Some("ndq_core=info"));
    }

    #[test]
    fn verbosity_steps_up_to_trace() {
        assert_eq!(directive(0, None), None);
        assert_eq!(directive(1, None).as_deref(), Some("debug"));
        assert_eq!(directive(3, None).as_deref(), Some("trace"));
    }

    #[test]
    fn blank_log_level_is_ignored() {
        assert_eq!(directive(0, Some("  ")), None);
    }
}
