// ---------------------------------------------------------------------------
// Diagnostic logger — structured records for every resolution decision
// ---------------------------------------------------------------------------

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::error::FsError;

// ---------------------------------------------------------------------------
// Records and sinks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
	pub op: String,
	pub msg: String,
	pub path: String,
	pub error: Option<String>,
}

impl fmt::Display for LogRecord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"|{:<10}|{:<30}|{:<20}|{}",
			self.op,
			self.msg,
			self.error.as_deref().unwrap_or("<nil>"),
			self.path
		)
	}
}

/// Destination for diagnostic records.
pub trait LogSink: Send + Sync {
	fn record(&self, record: &LogRecord);
}

/// Forwards records to `tracing` at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
	fn record(&self, record: &LogRecord) {
		tracing::debug!(
			target: "fsmock",
			op = %record.op,
			path = %record.path,
			error = record.error.as_deref(),
			"{}",
			record.msg
		);
	}
}

/// Keeps records in memory so tests can assert on them.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
	records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemorySink {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn records(&self) -> Vec<LogRecord> {
		self.records
			.lock()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
			.clone()
	}

	/// Records for a single operation, in emission order.
	pub fn for_op(&self, op: &str) -> Vec<LogRecord> {
		self.records().into_iter().filter(|r| r.op == op).collect()
	}

	pub fn clear(&self) {
		self.records
			.lock()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
			.clear();
	}
}

impl LogSink for MemorySink {
	fn record(&self, record: &LogRecord) {
		self.records
			.lock()
			.unwrap_or_else(|poisoned| poisoned.into_inner())
			.push(record.clone());
	}
}

// ---------------------------------------------------------------------------
// Logger
// ---------------------------------------------------------------------------

/// Logger handle owned by a path table. Disabled loggers drop every record.
#[derive(Clone)]
pub struct Logger {
	enabled: bool,
	sink: Arc<dyn LogSink>,
}

impl Default for Logger {
	fn default() -> Self {
		Self::disabled()
	}
}

impl fmt::Debug for Logger {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Logger")
			.field("enabled", &self.enabled)
			.finish_non_exhaustive()
	}
}

impl Logger {
	pub fn disabled() -> Self {
		Self {
			enabled: false,
			sink: Arc::new(TracingSink),
		}
	}

	/// An enabled logger delivering to `sink`.
	pub fn with_sink(sink: impl LogSink + 'static) -> Self {
		Self {
			enabled: true,
			sink: Arc::new(sink),
		}
	}

	pub fn is_enabled(&self) -> bool {
		self.enabled
	}

	pub fn set_enabled(&mut self, enabled: bool) {
		self.enabled = enabled;
	}

	/// Start a record. Nothing is emitted until [`RecordBuilder::done`].
	pub fn log(&self, msg: impl Into<String>) -> RecordBuilder<'_> {
		RecordBuilder {
			logger: self,
			record: LogRecord {
				op: String::new(),
				msg: msg.into(),
				path: String::new(),
				error: None,
			},
		}
	}
}

#[must_use = "records are only emitted by `done()`"]
pub struct RecordBuilder<'a> {
	logger: &'a Logger,
	record: LogRecord,
}

impl RecordBuilder<'_> {
	pub fn op(mut self, op: &str) -> Self {
		self.record.op = op.to_string();
		self
	}

	pub fn path(mut self, path: &str) -> Self {
		self.record.path = path.to_string();
		self
	}

	pub fn error(mut self, err: &FsError) -> Self {
		self.record.error = Some(err.to_string());
		self
	}

	pub fn done(self) {
		if self.logger.enabled {
			self.logger.sink.record(&self.record);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn disabled_logger_drops_records() {
		let sink = MemorySink::new();
		let mut logger = Logger::with_sink(sink.clone());
		logger.set_enabled(false);
		logger.log("ignored").op("stat").done();
		assert!(sink.records().is_empty());
	}

	#[test]
	fn enabled_logger_delivers_structured_record() {
		let sink = MemorySink::new();
		let logger = Logger::with_sink(sink.clone());
		logger
			.log("return pre-configured error")
			.op("stat")
			.path("/a")
			.error(&FsError::Injected("boom".to_string()))
			.done();

		let records = sink.for_op("stat");
		assert_eq!(records.len(), 1);
		assert_eq!(records[0].path, "/a");
		assert_eq!(records[0].error.as_deref(), Some("boom"));
	}

	#[test]
	fn record_display_is_column_aligned() {
		let r = LogRecord {
			op: "read_dir".to_string(),
			msg: "listing".to_string(),
			path: "/x".to_string(),
			error: None,
		};
		let line = r.to_string();
		assert!(line.starts_with("|read_dir  |listing"));
		assert!(line.ends_with("|<nil>               |/x"));
	}

	#[test]
	fn clear_empties_sink() {
		let sink = MemorySink::new();
		sink.record(&LogRecord {
			op: "walk".to_string(),
			msg: String::new(),
			path: String::new(),
			error: None,
		});
		sink.clear();
		assert!(sink.records().is_empty());
	}
}
