use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
	#[error("Not found: {0}")]
	NotFound(String),
	#[error("Not a directory: {0}")]
	NotADirectory(String),
	/// Error configured on an entry; the message is returned verbatim.
	#[error("{0}")]
	Injected(String),
	/// Error configured for absolute-path resolution.
	#[error("{0}")]
	AbsPath(String),
	#[error("Invalid stub config: {0}")]
	Config(String),
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	NotFound,
	NotADirectory,
	Injected,
	AbsPath,
	Config,
	Json,
}

impl FsError {
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::NotFound(_) => ErrorKind::NotFound,
			Self::NotADirectory(_) => ErrorKind::NotADirectory,
			Self::Injected(_) => ErrorKind::Injected,
			Self::AbsPath(_) => ErrorKind::AbsPath,
			Self::Config(_) => ErrorKind::Config,
			Self::Json(_) => ErrorKind::Json,
		}
	}

	pub fn code(&self) -> &str {
		match self {
			Self::NotFound(_) => "FS_NOT_FOUND",
			Self::NotADirectory(_) => "FS_NOT_DIRECTORY",
			Self::Injected(_) => "FS_INJECTED",
			Self::AbsPath(_) => "FS_ABS_PATH",
			Self::Config(_) => "FS_CONFIG",
			Self::Json(_) => "FS_JSON_ERROR",
		}
	}

	pub fn is_not_found(&self) -> bool {
		self.kind() == ErrorKind::NotFound
	}

	pub fn to_json(&self) -> serde_json::Value {
		serde_json::json!({
			"fsCode": self.code(),
			"message": self.to_string(),
		})
	}
}

// Injected errors are compared by message so tables built from the same
// spec compare equal.
impl PartialEq for FsError {
	fn eq(&self, other: &Self) -> bool {
		self.code() == other.code() && self.to_string() == other.to_string()
	}
}
