//! Process-wide logging setup.
//!
//! Responsibilities:
//! - Install the global `tracing` subscriber exactly once per process.
//! - Format plain lines as `<timestamp> - <LEVEL> - <message>`.
//!
//! Does NOT handle:
//! - Choosing what to log (callers use `tracing` macros directly).
//!
//! Invariants:
//! - Repeated initialization is a no-op, whatever format it asks for.
//! - A subscriber installed by the host is left in place, never replaced.
//! - The filter defaults to `info`; `REELBOT_LOG` overrides it.

use std::fmt;
use std::sync::OnceLock;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_FILTER_VAR, LOG_TIMESTAMP_FORMAT};

/// Line format of the logging sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// `<timestamp> - <LEVEL> - <message>`
    #[default]
    Plain,
    /// One JSON object per event.
    Json,
}

/// Outcome of an initialization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggingInit {
    /// This call installed the subscriber.
    Installed,
    /// An earlier call already ran.
    AlreadyConfigured,
    /// Another global subscriber was set before the first call; it was kept.
    ForeignSubscriber,
}

static LOGGING: OnceLock<LoggingInit> = OnceLock::new();

/// Install the plain-format subscriber if no earlier call did.
pub fn init_logging() -> LoggingInit {
    init_logging_with(LogFormat::Plain)
}

/// Install a subscriber with `format` if no earlier call did.
pub fn init_logging_with(format: LogFormat) -> LoggingInit {
    let mut ran = false;
    let outcome = *LOGGING.get_or_init(|| {
        ran = true;
        install(format)
    });
    if ran {
        outcome
    } else {
        LoggingInit::AlreadyConfigured
    }
}

fn install(format: LogFormat) -> LoggingInit {
    let env_filter =
        EnvFilter::try_from_env(LOG_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let result = match format {
        LogFormat::Plain => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(DashFormat)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    match result {
        Ok(()) => LoggingInit::Installed,
        Err(_) => LoggingInit::ForeignSubscriber,
    }
}

/// Event formatter producing `<timestamp> - <LEVEL> - <message>`.
///
/// Timestamps are local time with millisecond precision,
/// e.g. `2024-05-01 12:30:00,125`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashFormat;

impl<S, N> FormatEvent<S, N> for DashFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let now = chrono::Local::now();
        write!(
            writer,
            "{} - {} - ",
            now.format(LOG_TIMESTAMP_FORMAT),
            level_name(*event.metadata().level())
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Level label used in plain lines.
pub fn level_name(level: Level) -> &'static str {
    match level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARNING",
        Level::INFO => "INFO",
        Level::DEBUG => "DEBUG",
        _ => "TRACE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture_lines<F: FnOnce()>(f: F) -> Vec<String> {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .event_format(DashFormat)
            .with_max_level(Level::INFO)
            .with_writer(captured.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        captured.contents().lines().map(str::to_string).collect()
    }

    fn assert_timestamp_shape(ts: &str) {
        // 2024-05-01 12:30:00,125
        assert_eq!(ts.len(), 23, "timestamp: {ts:?}");
        let bytes = ts.as_bytes();
        for (idx, sep) in [(4, b'-'), (7, b'-'), (10, b' '), (13, b':'), (16, b':'), (19, b',')] {
            assert_eq!(bytes[idx], sep, "timestamp: {ts:?}");
        }
        assert!(
            ts.chars()
                .enumerate()
                .filter(|(i, _)| ![4, 7, 10, 13, 16, 19].contains(i))
                .all(|(_, c)| c.is_ascii_digit()),
            "timestamp: {ts:?}"
        );
    }

    #[test]
    fn test_dash_format_writes_timestamp_level_message() {
        let lines = capture_lines(|| tracing::info!("TMDB_API_KEY loaded"));

        assert_eq!(lines.len(), 1);
        let parts: Vec<&str> = lines[0].splitn(3, " - ").collect();
        assert_eq!(parts.len(), 3, "line: {:?}", lines[0]);
        assert_timestamp_shape(parts[0]);
        assert_eq!(parts[1], "INFO");
        assert_eq!(parts[2], "TMDB_API_KEY loaded");
    }

    #[test]
    fn test_dash_format_labels_warnings_and_drops_debug() {
        let lines = capture_lines(|| {
            tracing::debug!("hidden");
            tracing::warn!("TMDB_API_KEY is not set");
        });

        assert_eq!(lines.len(), 1);
        assert!(
            lines[0].ends_with(" - WARNING - TMDB_API_KEY is not set"),
            "line: {:?}",
            lines[0]
        );
    }

    #[test]
    fn test_level_names() {
        assert_eq!(level_name(Level::ERROR), "ERROR");
        assert_eq!(level_name(Level::WARN), "WARNING");
        assert_eq!(level_name(Level::INFO), "INFO");
        assert_eq!(level_name(Level::DEBUG), "DEBUG");
        assert_eq!(level_name(Level::TRACE), "TRACE");
    }

    #[test]
    fn test_init_logging_installs_once() {
        let first = init_logging();
        let second = init_logging_with(LogFormat::Json);

        assert_ne!(first, LoggingInit::AlreadyConfigured);
        assert_eq!(second, LoggingInit::AlreadyConfigured);
    }
}
