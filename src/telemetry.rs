//! Telemetry initialization.
//!
//! Controlled by `MODBOOK_LOG`:
//! - unset or empty → no subscriber (tracing disabled, zero overhead)
//! - `"stderr"` → JSON events to stderr at `info` (or `RUST_LOG` if set)
//! - anything else → used as an [`EnvFilter`] directive with the
//!   human-readable formatter on stderr, e.g. `MODBOOK_LOG=modbook=debug`

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// Environment variable selecting the log sink.
pub const LOG_ENV: &str = "MODBOOK_LOG";

/// Where log events go, as selected by [`LOG_ENV`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogSink {
    /// No subscriber.
    Off,
    /// JSON lines on stderr.
    JsonStderr,
    /// Human-readable lines on stderr, filtered by the given directive.
    Filtered(String),
}

impl LogSink {
    /// Interpret the raw value of [`LOG_ENV`].
    #[must_use]
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            None | Some("") => Self::Off,
            Some("stderr") => Self::JsonStderr,
            Some(directive) => Self::Filtered(directive.to_owned()),
        }
    }
}

/// Opaque guard held in `main()` until exit. Dropping it logs the end of
/// the session when a subscriber is installed.
pub struct TelemetryGuard {
    active: bool,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if self.active {
            tracing::debug!("telemetry shutdown");
        }
    }
}

/// Initialize telemetry based on `MODBOOK_LOG`.
///
/// Returns a guard that must be held until the program exits.
#[must_use]
pub fn init() -> TelemetryGuard {
    let value = std::env::var(LOG_ENV).ok();
    match LogSink::from_env_value(value.as_deref()) {
        LogSink::Off => TelemetryGuard { active: false },
        LogSink::JsonStderr => init_json(),
        LogSink::Filtered(directive) => init_filtered(&directive),
    }
}

/// JSON events to stderr via tracing-subscriber's JSON formatter.
fn init_json() -> TelemetryGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE),
        )
        .try_init()
        .is_ok();

    TelemetryGuard { active: installed }
}

/// Human-readable events to stderr filtered by `directive`.
fn init_filtered(directive: &str) -> TelemetryGuard {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|e| {
        eprintln!("warning: invalid {LOG_ENV} directive {directive:?}: {e}");
        EnvFilter::new("info")
    });

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .try_init()
        .is_ok();

    TelemetryGuard { active: installed }
}
