use fsmock_engine::{Entry, EntryConfig, FsError, PathTable};

use crate::config::{StubConfig, StubOptions};

// ── Boundary trait ──────────────────────────────────────────────────────────

/// The filesystem operations code under test depends on.
///
/// [`Stub`] is the only implementation shipped here; production code can
/// implement the same trait over the real filesystem.
pub trait FileSystem {
    fn stat(&self, path: &str) -> Result<Entry, FsError>;

    fn read_file(&self, path: &str) -> Result<Vec<u8>, FsError>;

    /// Immediate children of `path`. Callers must not rely on order.
    fn read_dir(&self, path: &str) -> Result<Vec<Entry>, FsError>;

    /// Visit `root` and everything below it. The visitor's return value is
    /// ignored.
    fn walk<F, R>(&self, root: &str, visit: F) -> Result<(), FsError>
    where
        F: FnMut(&str, Result<&Entry, &FsError>) -> R;

    /// Visit like [`FileSystem::walk`], stopping at the first visitor error.
    fn walk_until<F>(&self, root: &str, visit: F) -> Result<(), FsError>
    where
        F: FnMut(&str, Result<&Entry, &FsError>) -> Result<(), FsError>;

    fn write_file(&self, path: &str, data: &[u8], mode: u32) -> Result<(), FsError>;

    fn abs(&self, path: &str) -> Result<String, FsError>;
}

// ── Stub ────────────────────────────────────────────────────────────────────

/// Filesystem test double built from path specs.
#[derive(Debug, Clone, PartialEq)]
pub struct Stub {
    table: PathTable,
}

impl Default for Stub {
    fn default() -> Self {
        Self {
            table: PathTable::new(),
        }
    }
}

impl Stub {
    /// Build a stub from specs, later specs replacing entries at the same path.
    pub fn new<S: AsRef<str>>(specs: &[S]) -> Self {
        Self::with_options(specs, StubOptions::default())
    }

    pub fn with_options<S: AsRef<str>>(specs: &[S], options: StubOptions) -> Self {
        let mut stub = Self::default();
        stub.options(options);
        stub.add_specs(specs);
        tracing::debug!(
            target: "fsmock",
            specs = specs.len(),
            entries = stub.table.len(),
            "stub ready"
        );
        stub
    }

    pub fn from_config(config: StubConfig) -> Self {
        let (specs, options) = config.into_parts();
        Self::with_options(&specs, options)
    }

    pub fn from_json(json: &str) -> Result<Self, FsError> {
        Ok(Self::from_config(StubConfig::from_json(json)?))
    }

    /// Apply options to an existing stub. Unset options keep their value.
    pub fn options(&mut self, options: StubOptions) {
        if let Some(logger) = options.sink {
            self.table.set_logger(logger);
        }
        if let Some(enabled) = options.logging {
            self.table.set_logging(enabled);
        }
        if let Some(prefix) = options.abs_prefix {
            self.table.set_abs_prefix(prefix);
        }
        if let Some(message) = options.abs_error {
            self.table.set_abs_error(Some(message));
        }
    }

    pub fn add_specs<S: AsRef<str>>(&mut self, specs: &[S]) {
        for spec in specs {
            self.table.add_spec(spec.as_ref());
        }
    }

    /// Change an entry's content, error or mode after construction.
    /// `None` when nothing is stored at `path`.
    pub fn config(&mut self, path: &str) -> Option<EntryConfig<'_>> {
        self.table.config(path)
    }

    pub fn table(&self) -> &PathTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut PathTable {
        &mut self.table
    }
}

impl FileSystem for Stub {
    fn stat(&self, path: &str) -> Result<Entry, FsError> {
        self.table.stat(path).cloned()
    }

    fn read_file(&self, path: &str) -> Result<Vec<u8>, FsError> {
        self.table.read_file(path)
    }

    fn read_dir(&self, path: &str) -> Result<Vec<Entry>, FsError> {
        Ok(self.table.read_dir(path)?.into_iter().cloned().collect())
    }

    fn walk<F, R>(&self, root: &str, visit: F) -> Result<(), FsError>
    where
        F: FnMut(&str, Result<&Entry, &FsError>) -> R,
    {
        self.table.walk(root, visit)
    }

    fn walk_until<F>(&self, root: &str, visit: F) -> Result<(), FsError>
    where
        F: FnMut(&str, Result<&Entry, &FsError>) -> Result<(), FsError>,
    {
        self.table.walk_until(root, visit)
    }

    fn write_file(&self, path: &str, data: &[u8], mode: u32) -> Result<(), FsError> {
        self.table.write_file(path, data, mode)
    }

    fn abs(&self, path: &str) -> Result<String, FsError> {
        self.table.abs(path)
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stub_contains_every_spec() {
        let stub = Stub::new(&["/folder1[file1]", "/folder2/subfolder"]);
        let paths: Vec<&str> = stub.table().paths().collect();
        assert_eq!(
            paths,
            vec!["/", "/folder1", "/folder1/file1", "/folder2", "/folder2/subfolder"]
        );
    }

    #[test]
    fn empty_stub_has_only_root() {
        let stub = Stub::new::<&str>(&[]);
        assert_eq!(stub.table().len(), 1);
        assert!(stub.stat("/").unwrap().is_dir);
    }

    #[test]
    fn stubs_from_same_specs_are_equal() {
        assert_eq!(Stub::new(&["/folder1[file1]"]), Stub::new(&["/folder1[file1]"]));
    }

    #[test]
    fn options_after_construction() {
        let mut stub = Stub::new(&["/a"]);
        stub.options(StubOptions::new().abs_prefix("/work"));
        assert_eq!(stub.abs("a").unwrap(), "/work/a");
        stub.options(StubOptions::new().abs_error("denied"));
        assert_eq!(stub.abs("a").unwrap_err().to_string(), "denied");
        assert_eq!(stub.table().abs_prefix(), "/work");
    }

    #[test]
    fn add_specs_extends_table() {
        let mut stub = Stub::new(&["/a"]);
        stub.add_specs(&["/a[b]"]);
        assert_eq!(stub.read_dir("/a").unwrap().len(), 1);
    }

    #[test]
    fn config_forwards_to_table() {
        let mut stub = Stub::new(&["/a[b]"]);
        stub.config("/a/b").unwrap().set_content("hello");
        assert_eq!(stub.read_file("/a/b").unwrap(), b"hello");
        assert!(stub.config("/nope").is_none());
    }

    #[test]
    fn from_json_builds_stub() {
        let stub =
            Stub::from_json(r#"{"specs": ["/home/john[file1(data=test)]"], "absError": "x"}"#)
                .unwrap();
        assert_eq!(stub.read_file("/home/john/file1").unwrap(), b"test");
        assert!(stub.abs("p").is_err());
    }
}
