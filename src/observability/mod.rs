//! Diagnostic logging.
//!
//! The report goes to stdout, so every log line is written to stderr.
//!
//! Verbosity levels:
//! - 0 (default): WARN only
//! - 1 (-v): INFO (documents loaded, sections omitted)
//! - 2 (-vv): DEBUG (per-document details)
//! - 3+ (-vvv): TRACE
//!
//! `RUST_LOG` overrides the level derived from `-v`.

use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directive for a verbosity count.
pub fn filter_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "warn,purity_report=info",
        2 => "info,purity_report=debug",
        _ => "debug,purity_report=trace",
    }
}

/// Install the stderr subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init_logging(verbosity: u8) {
    let base_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| filter_directive(verbosity).to_string());
    let filter = EnvFilter::try_new(&base_filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(verbosity >= 2)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive_levels() {
        assert_eq!(filter_directive(0), "warn");
        assert!(filter_directive(1).contains("purity_report=info"));
        assert!(filter_directive(2).contains("purity_report=debug"));
        assert_eq!(filter_directive(3), filter_directive(9));
    }

    #[test]
    fn test_directives_parse() {
        for verbosity in 0..4 {
            assert!(EnvFilter::try_new(filter_directive(verbosity)).is_ok());
        }
    }
}
