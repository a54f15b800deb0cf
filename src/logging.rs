//! Logging initialization for the CLI.
//!
//! Log events go to stderr so they never mix with the console report on stdout.

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber.
///
/// `verbosity`: 0 = WARN (or whatever `RUST_LOG` says), 1 = DEBUG, 2+ = TRACE.
/// A second call is a no-op.
pub fn init(verbosity: u8) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if let Some(level) = level_for(verbosity) {
        if let Ok(directive) = format!("lnpm={level}").parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}

/// Level forced by `-v`; `None` leaves the filter to `RUST_LOG`
fn level_for(verbosity: u8) -> Option<Level> {
    match verbosity {
        0 => None,
        1 => Some(Level::DEBUG),
        _ => Some(Level::TRACE),
    }
}
