//! Structured log capture for assertions on what the service reported.
//!
//! Capture is scoped to a closure with [`capture_logs`], so tests running in
//! parallel never see each other's events.

use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing::field::{Field, Visit};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::Context;
use tracing_subscriber::prelude::*;

use crate::kits::UserId;

/// A captured log event.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

impl LogEntry {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Shared buffer filled by [`CaptureLayer`].
#[derive(Debug, Clone, Default)]
pub struct CapturedLogs {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl CapturedLogs {
    #[must_use]
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn contains_message(&self, message: &str) -> bool {
        self.entries().iter().any(|e| e.message.contains(message))
    }

    #[must_use]
    pub fn filter_by_level(&self, level: Level) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .collect()
    }

    /// Events tagged with `user_id = user`.
    #[must_use]
    pub fn for_user(&self, user: UserId) -> Vec<LogEntry> {
        let wanted = user.to_string();
        self.entries()
            .into_iter()
            .filter(|e| e.field("user_id") == Some(wanted.as_str()))
            .collect()
    }

    fn push(&self, entry: LogEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry);
        }
    }
}

/// Layer that records every event it sees into a [`CapturedLogs`].
pub struct CaptureLayer {
    logs: CapturedLogs,
}

impl CaptureLayer {
    #[must_use]
    pub const fn new(logs: CapturedLogs) -> Self {
        Self { logs }
    }
}

struct EntryVisitor<'a> {
    message: &'a mut String,
    fields: &'a mut Vec<(String, String)>,
}

impl Visit for EntryVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            *self.message = value.to_string();
        } else {
            self.fields.push((field.name().to_string(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let value = format!("{value:?}");
        if field.name() == "message" {
            *self.message = value;
        } else {
            self.fields.push((field.name().to_string(), value));
        }
    }
}

impl<S> tracing_subscriber::Layer<S> for CaptureLayer
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut message = String::new();
        let mut fields = Vec::new();
        event.record(&mut EntryVisitor {
            message: &mut message,
            fields: &mut fields,
        });

        self.logs.push(LogEntry {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            message,
            fields,
        });
    }
}

/// Run `f` with a capturing subscriber installed for the current thread.
///
/// `filter` uses `EnvFilter` syntax, e.g. `"autokit=debug"`.
pub fn capture_logs<R, F>(filter: &str, f: F) -> (R, CapturedLogs)
where
    F: FnOnce() -> R,
{
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(CaptureLayer::new(logs.clone()));
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs)
}

/// Format captured entries for a failure message.
#[must_use]
pub fn format_logs_for_display(entries: &[LogEntry]) -> String {
    if entries.is_empty() {
        return String::from("No logs captured");
    }

    let mut output = format!("Captured {} log entries:\n", entries.len());
    for entry in entries {
        output.push_str(&format!(
            "[{}] {}: {}\n",
            entry.level, entry.target, entry.message
        ));
        for (key, value) in &entry.fields {
            output.push_str(&format!("    {key} = {value}\n"));
        }
    }
    output
}

/// Assert that `logs` holds an entry with the given level and message text.
#[macro_export]
macro_rules! assert_log_contains {
    ($logs:expr, $level:expr, $message:expr) => {{
        let entries = $logs.entries();
        let found = entries
            .iter()
            .any(|e| e.level == $level && e.message.contains($message));
        assert!(
            found,
            "Expected log with level {} containing '{}'\n{}",
            $level,
            $message,
            $crate::test_utils::logging::format_logs_for_display(&entries)
        );
    }};
}
