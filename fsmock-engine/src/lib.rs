//! Engine behind the `fsmock` filesystem test double.
//!
//! A spec string such as `"/home/john[notes.txt(data=hi), locked(err=EACCES)]"`
//! is compiled by [`parser::parse`] into a flat list of [`Entry`] values, which
//! a [`PathTable`] answers `stat`, `read_file`, `read_dir` and `walk` queries
//! against.

pub mod entry;
pub mod error;
pub mod logger;
pub mod parser;
pub mod path;
pub mod table;

pub use entry::Entry;
pub use error::{ErrorKind, FsError};
pub use logger::{LogRecord, LogSink, Logger, MemorySink, TracingSink};
pub use parser::{parse, parse_all};
pub use table::{EntryConfig, PathTable};
