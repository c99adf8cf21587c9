//! Filesystem test double driven by a compact path-spec language.
//!
//! Each spec describes one subtree. Segments are directories unless tagged
//! `isdir=false`; bracketed names are files; `data=` sets file content and
//! `err=` makes every lookup of that path fail with the given message.
//!
//! ```
//! use fsmock::{FileSystem, Stub};
//!
//! let stub = Stub::new(&["/home/john[file1(data=test)]", "/home/baddir(err=baderror)"]);
//!
//! assert_eq!(stub.read_file("/home/john/file1").unwrap(), b"test");
//! assert!(stub.stat("/home/john").unwrap().is_dir);
//! assert_eq!(stub.stat("/home/baddir").unwrap_err().to_string(), "baderror");
//! ```

mod config;
pub mod logging;
mod stub;

pub use config::{StubConfig, StubOptions};
pub use stub::{FileSystem, Stub};

pub use fsmock_engine::{
    parse, parse_all, Entry, EntryConfig, ErrorKind, FsError, LogRecord, LogSink, Logger,
    MemorySink, PathTable, TracingSink,
};
