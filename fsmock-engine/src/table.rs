// ---------------------------------------------------------------------------
// Path table — flat path-keyed entry map answering filesystem queries
// ---------------------------------------------------------------------------

use std::collections::{BTreeMap, HashSet};
use std::ops::Bound;

use crate::entry::Entry;
use crate::error::FsError;
use crate::logger::Logger;
use crate::parser::parse;
use crate::path::{child_name, is_within, ROOT};

// ---------------------------------------------------------------------------
// PathTable
// ---------------------------------------------------------------------------

/// Map from absolute path to [`Entry`].
///
/// Directory structure is never stored: listings and walks are derived from
/// path prefixes at query time. The root entry `/` always exists.
#[derive(Debug, Clone)]
pub struct PathTable {
	entries: BTreeMap<String, Entry>,
	abs_prefix: String,
	abs_error: Option<String>,
	logger: Logger,
}

impl Default for PathTable {
	fn default() -> Self {
		Self::new()
	}
}

impl PartialEq for PathTable {
	fn eq(&self, other: &Self) -> bool {
		self.entries == other.entries
			&& self.abs_prefix == other.abs_prefix
			&& self.abs_error == other.abs_error
	}
}

impl PathTable {
	// -- Constructor ------------------------------------------------------

	pub fn new() -> Self {
		let mut entries = BTreeMap::new();
		entries.insert(ROOT.to_string(), Entry::root());
		Self {
			entries,
			abs_prefix: String::new(),
			abs_error: None,
			logger: Logger::disabled(),
		}
	}

	pub fn with_logger(logger: Logger) -> Self {
		Self {
			logger,
			..Self::new()
		}
	}

	// -- Setup ------------------------------------------------------------

	/// Insert an entry, replacing any entry already stored at its path.
	/// Entries for the root (or with no path) are skipped and `false` is
	/// returned.
	pub fn insert(&mut self, entry: Entry) -> bool {
		if entry.path.is_empty() || entry.path == ROOT {
			return false;
		}
		self.entries.insert(entry.path.clone(), entry);
		true
	}

	pub fn extend<I: IntoIterator<Item = Entry>>(&mut self, entries: I) {
		for entry in entries {
			self.insert(entry);
		}
	}

	/// Parse `spec` and insert its entries.
	pub fn add_spec(&mut self, spec: &str) {
		self.extend(parse(spec));
	}

	pub fn logger(&self) -> &Logger {
		&self.logger
	}

	pub fn set_logger(&mut self, logger: Logger) {
		self.logger = logger;
	}

	pub fn set_logging(&mut self, enabled: bool) {
		self.logger.set_enabled(enabled);
	}

	pub fn abs_prefix(&self) -> &str {
		&self.abs_prefix
	}

	pub fn set_abs_prefix(&mut self, prefix: impl Into<String>) {
		self.abs_prefix = prefix.into();
	}

	pub fn abs_error(&self) -> Option<&str> {
		self.abs_error.as_deref()
	}

	pub fn set_abs_error(&mut self, message: Option<String>) {
		self.abs_error = message;
	}

	// -- Introspection ----------------------------------------------------

	pub fn get(&self, path: &str) -> Option<&Entry> {
		self.entries.get(path)
	}

	pub fn contains(&self, path: &str) -> bool {
		self.entries.contains_key(path)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Always false: the root entry cannot be removed.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// All stored paths in lexicographic order.
	pub fn paths(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	pub fn entries(&self) -> impl Iterator<Item = &Entry> {
		self.entries.values()
	}

	pub fn to_json(&self) -> Result<String, FsError> {
		let entries: Vec<&Entry> = self.entries.values().collect();
		Ok(serde_json::to_string_pretty(&entries)?)
	}

	// -- Helpers (private) ------------------------------------------------

	/// Exact lookup honouring the entry's injected error.
	fn lookup<'a>(&'a self, path: &str, op: &str) -> Result<&'a Entry, FsError> {
		let Some(entry) = self.entries.get(path) else {
			let err = FsError::NotFound(path.to_string());
			self.logger.log("return not found").op(op).path(path).error(&err).done();
			return Err(err);
		};
		if let Some(err) = entry.injected_error() {
			self.logger
				.log("return pre-configured error")
				.op(op)
				.path(path)
				.error(&err)
				.done();
			return Err(err);
		}
		Ok(entry)
	}

	fn require_dir<'a>(&'a self, path: &str, op: &str) -> Result<&'a Entry, FsError> {
		let entry = self.lookup(path, op)?;
		if !entry.is_dir {
			let err = FsError::NotADirectory(path.to_string());
			self.logger
				.log("return not a directory")
				.op(op)
				.path(path)
				.error(&err)
				.done();
			return Err(err);
		}
		Ok(entry)
	}

	/// Keys equal to or underneath `root`, in lexicographic order.
	fn subtree<'a>(&'a self, root: &'a str) -> impl Iterator<Item = &'a String> + 'a {
		self.entries
			.range::<str, _>((Bound::Included(root), Bound::Unbounded))
			.map(|(k, _)| k)
			.take_while(move |k| k.starts_with(root))
			.filter(move |k| is_within(k, root))
	}

	// -- Queries ----------------------------------------------------------

	pub fn stat(&self, path: &str) -> Result<&Entry, FsError> {
		self.lookup(path, "stat")
	}

	/// Return the entry's content, empty when none is configured.
	///
	/// Directories are not rejected: reading one yields its (usually empty)
	/// content, unlike a real filesystem.
	pub fn read_file(&self, path: &str) -> Result<Vec<u8>, FsError> {
		let entry = self.lookup(path, "read_file")?;
		Ok(entry.content.clone().unwrap_or_default())
	}

	/// List the immediate children of a directory, sorted by name.
	///
	/// Fails as a whole if any child carries an injected error.
	pub fn read_dir(&self, path: &str) -> Result<Vec<&Entry>, FsError> {
		self.require_dir(path, "read_dir")?;

		let mut seen: HashSet<&str> = HashSet::new();
		let mut children = Vec::new();
		for (key, entry) in self.entries.iter() {
			let Some(name) = child_name(key, path) else {
				continue;
			};
			if !seen.insert(name) {
				continue;
			}
			if let Some(err) = entry.injected_error() {
				self.logger
					.log("return pre-configured error")
					.op("read_dir")
					.path(key)
					.error(&err)
					.done();
				return Err(err);
			}
			children.push(entry);
		}

		self.logger.log("return entries").op("read_dir").path(path).done();
		Ok(children)
	}

	/// Visit `root` and every path underneath it in lexicographic order.
	///
	/// Scope is per path component: walking `/home/john` never visits
	/// `/home/johnny`.
	///
	/// `root` must be a directory. Entries with an injected error are passed
	/// to `visit` as `Err`. Whatever `visit` returns is ignored and every
	/// path is visited; see [`PathTable::walk_until`] for early exit.
	pub fn walk<F, R>(&self, root: &str, mut visit: F) -> Result<(), FsError>
	where
		F: FnMut(&str, Result<&Entry, &FsError>) -> R,
	{
		self.require_dir(root, "walk")?;

		for key in self.subtree(root) {
			let outcome = self.lookup(key, "walk");
			self.logger.log("calling visitor").op("walk").path(key).done();
			let _ = visit(key.as_str(), outcome.as_ref().map(|e| *e));
		}
		Ok(())
	}

	/// Like [`PathTable::walk`], but stops at the first `Err` returned by
	/// `visit` and returns it.
	pub fn walk_until<F>(&self, root: &str, mut visit: F) -> Result<(), FsError>
	where
		F: FnMut(&str, Result<&Entry, &FsError>) -> Result<(), FsError>,
	{
		self.require_dir(root, "walk")?;

		for key in self.subtree(root) {
			let outcome = self.lookup(key, "walk");
			self.logger.log("calling visitor").op("walk").path(key).done();
			if let Err(err) = visit(key.as_str(), outcome.as_ref().map(|e| *e)) {
				self.logger
					.log("visitor stopped walk")
					.op("walk")
					.path(key)
					.error(&err)
					.done();
				return Err(err);
			}
		}
		Ok(())
	}

	/// Resolve `path` against the configured prefix.
	pub fn abs(&self, path: &str) -> Result<String, FsError> {
		if let Some(message) = &self.abs_error {
			let err = FsError::AbsPath(message.clone());
			self.logger
				.log("return pre-configured error")
				.op("abs")
				.path(path)
				.error(&err)
				.done();
			return Err(err);
		}
		Ok(format!(
			"{}/{}",
			self.abs_prefix.trim_end_matches('/'),
			path.trim_start_matches('/')
		))
	}

	/// Accepted and ignored; the table is read-only for queries.
	pub fn write_file(&self, path: &str, data: &[u8], mode: u32) -> Result<(), FsError> {
		self.logger
			.log(format!("ignore write of {} bytes (mode {:o})", data.len(), mode))
			.op("write_file")
			.path(path)
			.done();
		Ok(())
	}

	// -- Configuration ----------------------------------------------------

	/// Mutable access to a stored entry's configurable fields, `None` if
	/// nothing is stored at `path`.
	pub fn config(&mut self, path: &str) -> Option<EntryConfig<'_>> {
		self.entries.get_mut(path).map(|entry| EntryConfig { entry })
	}
}

// ---------------------------------------------------------------------------
// EntryConfig
// ---------------------------------------------------------------------------

/// Getters and setters for the fields tests may change after construction.
pub struct EntryConfig<'a> {
	entry: &'a mut Entry,
}

impl EntryConfig<'_> {
	pub fn entry(&self) -> &Entry {
		self.entry
	}

	pub fn content(&self) -> Option<&[u8]> {
		self.entry.content.as_deref()
	}

	pub fn set_content(&mut self, content: impl Into<Vec<u8>>) -> &[u8] {
		self.entry.content.insert(content.into())
	}

	pub fn error(&self) -> Option<&str> {
		self.entry.error.as_deref()
	}

	pub fn set_error(&mut self, message: impl Into<String>) -> &str {
		self.entry.error.insert(message.into())
	}

	/// Remove the injected error, returning it.
	pub fn clear_error(&mut self) -> Option<String> {
		self.entry.error.take()
	}

	pub fn mode(&self) -> u32 {
		self.entry.mode
	}

	pub fn set_mode(&mut self, mode: u32) -> u32 {
		self.entry.mode = mode;
		self.entry.mode
	}
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
