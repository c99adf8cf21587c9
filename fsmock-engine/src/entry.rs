use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FsError;
use crate::path::{base_name, normalize_path, ROOT};

/// One node of the virtual filesystem.
///
/// Entries are plain data. The path table keys them by [`Entry::path`] and
/// never mutates them itself; test setup may change `content`, `error` and
/// `mode` afterwards through [`crate::table::EntryConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
	pub name: String,
	pub path: String,
	#[serde(rename = "isDir")]
	pub is_dir: bool,
	pub size: u64,
	pub mode: u32,
	#[serde(rename = "modTime")]
	pub mod_time: DateTime<Utc>,
	pub error: Option<String>,
	pub content: Option<Vec<u8>>,
}

impl Entry {
	/// A file entry with zero size, mode and modification time. The path is
	/// left empty until [`Entry::at`] places it.
	pub fn file(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			path: String::new(),
			is_dir: false,
			size: 0,
			mode: 0,
			mod_time: DateTime::default(),
			error: None,
			content: None,
		}
	}

	pub fn dir(name: impl Into<String>) -> Self {
		Self {
			is_dir: true,
			..Self::file(name)
		}
	}

	pub fn root() -> Self {
		Self::dir(ROOT).at(ROOT)
	}

	/// Place the entry at `path`. The name is kept unless it is empty, in
	/// which case it is taken from the last path segment.
	pub fn at(mut self, path: &str) -> Self {
		self.path = normalize_path(path);
		if self.name.is_empty() {
			self.name = base_name(&self.path).to_string();
		}
		self
	}

	pub fn with_size(mut self, size: u64) -> Self {
		self.size = size;
		self
	}

	pub fn with_mode(mut self, mode: u32) -> Self {
		self.mode = mode;
		self
	}

	pub fn with_mod_time(mut self, mod_time: DateTime<Utc>) -> Self {
		self.mod_time = mod_time;
		self
	}

	pub fn with_content(mut self, content: impl Into<Vec<u8>>) -> Self {
		self.content = Some(content.into());
		self
	}

	pub fn with_error(mut self, message: impl Into<String>) -> Self {
		self.error = Some(message.into());
		self
	}

	pub fn is_file(&self) -> bool {
		!self.is_dir
	}

	pub fn is_root(&self) -> bool {
		self.path == ROOT
	}

	/// The configured error as an [`FsError`], if any.
	pub fn injected_error(&self) -> Option<FsError> {
		self.error.clone().map(FsError::Injected)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn file_defaults_are_zero() {
		let e = Entry::file("notes.txt");
		assert!(e.is_file());
		assert_eq!(e.size, 0);
		assert_eq!(e.mode, 0);
		assert_eq!(e.mod_time.timestamp(), 0);
		assert!(e.content.is_none());
		assert!(e.error.is_none());
	}

	#[test]
	fn dir_builder() {
		let e = Entry::dir("john").at("/home/john").with_mode(0o750);
		assert!(e.is_dir);
		assert_eq!(e.path, "/home/john");
		assert_eq!(e.mode, 0o750);
	}

	#[test]
	fn at_fills_missing_name() {
		let e = Entry::file("").at("home//john/");
		assert_eq!(e.path, "/home/john");
		assert_eq!(e.name, "john");
	}

	#[test]
	fn root_entry() {
		let r = Entry::root();
		assert!(r.is_root());
		assert!(r.is_dir);
		assert_eq!(r.name, "/");
	}

	#[test]
	fn injected_error_is_verbatim() {
		let e = Entry::file("f").with_error("boom");
		assert_eq!(e.injected_error().unwrap().to_string(), "boom");
	}

	#[test]
	fn serializes_with_camel_case_keys() {
		let e = Entry::file("f").at("/f").with_content("hi");
		let v = serde_json::to_value(&e).unwrap();
		assert_eq!(v["isDir"], false);
		assert_eq!(v["path"], "/f");
		assert!(v.get("modTime").is_some());
	}
}
