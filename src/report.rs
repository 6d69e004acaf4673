//! Progress and error reporting seams.
//!
//! Diagnostics never live in process-wide state: the pipeline is handed an
//! [`ErrorReporter`] and a [`ProgressSink`] by the caller. [`MemoryReporter`]
//! is the bundled reporter for embedding hosts that show a recent-errors
//! panel.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// One diagnostic entry: which component failed doing what, plus free-form
/// context for the log panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Milliseconds since the Unix epoch.
    pub unix_time_ms: u64,
    pub component: String,
    pub action: String,
    pub message: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

impl ErrorRecord {
    pub fn new(component: &str, action: &str, message: String) -> Self {
        Self {
            unix_time_ms: now_ms(),
            component: component.to_string(),
            action: action.to_string(),
            message,
            metadata: serde_json::Value::Null,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Caller-supplied error sink.
pub trait ErrorReporter {
    fn report(&self, record: ErrorRecord);
}

/// Reporter that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl ErrorReporter for NullReporter {
    fn report(&self, _record: ErrorRecord) {}
}

const MAX_STORED_ERRORS: usize = 50;

/// Bounded in-memory error log, most recent first.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    errors: Mutex<VecDeque<ErrorRecord>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> Vec<ErrorRecord> {
        self.errors.lock().map(|e| e.iter().cloned().collect()).unwrap_or_default()
    }

    pub fn errors_for_component(&self, component: &str) -> Vec<ErrorRecord> {
        self.errors
            .lock()
            .map(|e| {
                e.iter()
                    .filter(|r| r.component == component)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn export_json(&self) -> String {
        serde_json::to_string_pretty(&self.errors()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn clear(&self) {
        if let Ok(mut errors) = self.errors.lock() {
            errors.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.errors.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ErrorReporter for MemoryReporter {
    fn report(&self, record: ErrorRecord) {
        log::error!(
            "[{}:{}] {} {}",
            record.component,
            record.action,
            record.message,
            record.metadata
        );
        if let Ok(mut errors) = self.errors.lock() {
            errors.push_front(record);
            while errors.len() > MAX_STORED_ERRORS {
                errors.pop_back();
            }
        }
    }
}

/// Receives integer percent updates 0-100, non-decreasing within one run.
pub trait ProgressSink {
    fn update(&self, percent: u8);
}

impl<F: Fn(u8)> ProgressSink for F {
    fn update(&self, percent: u8) {
        self(percent)
    }
}

/// Sink that ignores progress.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgress;

impl ProgressSink for NullProgress {
    fn update(&self, _percent: u8) {}
}

/// Cooperative cancellation flag shared between the caller and an in-flight
/// extraction. Once cancelled the pipeline stops issuing seeks.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_reporter_newest_first() {
        let reporter = MemoryReporter::new();
        reporter.report(ErrorRecord::new("pipeline", "seek", "first".into()));
        reporter.report(ErrorRecord::new("pipeline", "seek", "second".into()));

        let errors = reporter.errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].message, "second");
        assert_eq!(errors[1].message, "first");
    }

    #[test]
    fn test_memory_reporter_caps_history() {
        let reporter = MemoryReporter::new();
        for i in 0..60 {
            reporter.report(ErrorRecord::new("pipeline", "seek", format!("e{i}")));
        }
        assert_eq!(reporter.len(), MAX_STORED_ERRORS);
        // oldest entries evicted
        assert_eq!(reporter.errors()[0].message, "e59");
        assert_eq!(reporter.errors()[MAX_STORED_ERRORS - 1].message, "e10");
    }

    #[test]
    fn test_filter_by_component() {
        let reporter = MemoryReporter::new();
        reporter.report(ErrorRecord::new("pipeline", "seek", "a".into()));
        reporter.report(ErrorRecord::new("detector", "render", "b".into()));

        let detector_errors = reporter.errors_for_component("detector");
        assert_eq!(detector_errors.len(), 1);
        assert_eq!(detector_errors[0].message, "b");
    }

    #[test]
    fn test_export_json_round_trips() {
        let reporter = MemoryReporter::new();
        reporter.report(
            ErrorRecord::new("pipeline", "seek", "lost keyframe".into())
                .with_metadata(serde_json::json!({ "timestamp": 4.0 })),
        );

        let json = reporter.export_json();
        let parsed: Vec<ErrorRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].metadata["timestamp"], 4.0);
    }

    #[test]
    fn test_cancel_token() {
        let token = CancelToken::new();
        let observer = token.clone();
        assert!(!observer.is_cancelled());
        token.cancel();
        assert!(observer.is_cancelled());
    }

    #[test]
    fn test_closure_progress_sink() {
        let seen = Mutex::new(Vec::new());
        let sink = |p: u8| seen.lock().unwrap().push(p);
        sink.update(40);
        sink.update(100);
        assert_eq!(*seen.lock().unwrap(), vec![40, 100]);
    }
}
