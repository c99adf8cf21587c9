use serde::{Deserialize, Serialize};

use fsmock_engine::{FsError, LogSink, Logger};

// ── Options ─────────────────────────────────────────────────────────────────

/// Settings applied to a [`crate::Stub`] at construction or later through
/// [`crate::Stub::options`].
#[derive(Debug, Clone, Default)]
pub struct StubOptions {
    pub(crate) logging: Option<bool>,
    pub(crate) sink: Option<Logger>,
    pub(crate) abs_prefix: Option<String>,
    pub(crate) abs_error: Option<String>,
}

impl StubOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn diagnostic logging on or off. Records go to `tracing` unless a
    /// sink is set.
    pub fn logging(mut self, enabled: bool) -> Self {
        self.logging = Some(enabled);
        self
    }

    /// Deliver diagnostic records to `sink`. Enables logging unless
    /// [`StubOptions::logging`] says otherwise.
    pub fn sink(mut self, sink: impl LogSink + 'static) -> Self {
        self.sink = Some(Logger::with_sink(sink));
        self
    }

    /// Prefix used when resolving absolute paths.
    pub fn abs_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.abs_prefix = Some(prefix.into());
        self
    }

    /// Make every absolute-path resolution fail with `message`.
    pub fn abs_error(mut self, message: impl Into<String>) -> Self {
        self.abs_error = Some(message.into());
        self
    }
}

// ── Fixture config ──────────────────────────────────────────────────────────

/// Serializable description of a whole stub, e.g.
///
/// ```json
/// { "specs": ["/home/john[file1(data=test)]"], "logging": true, "absPrefix": "/work" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StubConfig {
    #[serde(default)]
    pub specs: Vec<String>,
    #[serde(default)]
    pub logging: bool,
    pub abs_prefix: Option<String>,
    pub abs_error: Option<String>,
}

impl StubConfig {
    pub fn from_json(json: &str) -> Result<Self, FsError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FsError> {
        if let Some(i) = self.specs.iter().position(|s| s.trim().is_empty()) {
            return Err(FsError::Config(format!("spec {} is empty", i)));
        }
        Ok(())
    }

    /// Split into the spec list and the equivalent [`StubOptions`].
    pub fn into_parts(self) -> (Vec<String>, StubOptions) {
        let mut options = StubOptions::new().logging(self.logging);
        if let Some(prefix) = self.abs_prefix {
            options = options.abs_prefix(prefix);
        }
        if let Some(message) = self.abs_error {
            options = options.abs_error(message);
        }
        (self.specs, options)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
