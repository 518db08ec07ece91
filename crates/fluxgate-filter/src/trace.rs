//! Trace emission for compiled filters.
//!
//! Every predicate evaluation emits exactly one line to its trace sink:
//! the success label when the predicate returned true, the failure label
//! otherwise. Both labels are formatted once at build time so the hot path
//! only hands a `&str` to the sink.

use std::sync::{Arc, Mutex};

use serde_json::Value;

/// A sink accepting one trace line per predicate evaluation.
///
/// The sink is the only shared mutable collaborator of a compiled filter
/// and may be called concurrently from many worker threads.
pub trait TraceSink: Send + Sync {
    fn emit(&self, line: &str);
}

impl<F> TraceSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn emit(&self, line: &str) {
        self(line)
    }
}

/// Shared handle to a trace sink, captured by each compiled filter.
pub type Tracer = Arc<dyn TraceSink>;

/// The pair of pre-formatted labels a predicate can emit.
///
/// Labels render the original one-entry spec mapping as compact JSON:
/// `{"user.name":"+s_eq/root"} Condition Success`. The template has no
/// trailing period.
#[derive(Debug, Clone)]
pub struct TraceLabels {
    pub success: String,
    pub failure: String,
}

impl TraceLabels {
    /// Build both labels from the original spec document.
    pub fn for_spec(spec: &Value) -> Self {
        // `Value`'s Display is compact JSON and cannot fail.
        TraceLabels {
            success: format!("{spec} Condition Success"),
            failure: format!("{spec} Condition Failure"),
        }
    }
}

/// Trace sink that forwards every line to the `log` facade at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl TraceSink for LogSink {
    fn emit(&self, line: &str) {
        log::debug!("{}", line);
    }
}

/// Append-only trace sink capturing lines in memory.
///
/// Useful in tests and for hosts that post-process traces per batch.
#[derive(Debug, Default)]
pub struct Recorder {
    lines: Mutex<Vec<String>>,
}

impl Recorder {
    /// Snapshot of all lines emitted so far, in emission order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    /// Drain the captured lines, leaving the recorder empty.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock().unwrap())
    }
}

impl TraceSink for Recorder {
    fn emit(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}
