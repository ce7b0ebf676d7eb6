//! Error types for the piece-table text buffer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while operating on an [`crate::Editor`](crate::editor::Editor).
#[derive(Debug, Error)]
pub enum EditorError {
	/// A position argument was outside `[0, size()]`, or a delete range
	/// extended past the end of the document.
	#[error("position {pos} out of range (document size is {size})")]
	OutOfRange { pos: usize, size: usize },

	/// The buffer pool could not reserve space for inserted bytes.
	#[error("failed to reserve {requested} bytes for insertion: {source}")]
	Reserve {
		requested: usize,
		#[source]
		source: std::collections::TryReserveError,
	},

	/// `open` was given a path that is not a regular file.
	#[error("{path:?} is not a regular file")]
	NotARegularFile { path: PathBuf },

	/// `open` failed to stat or read the file.
	#[error("failed to open {path:?}: {source}")]
	Open {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// `open` failed to memory-map the file.
	#[error("failed to map {path:?}: {source}")]
	Mmap {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// `save` failed to create a temporary file next to the target.
	#[error("failed to create a temp file next to {path:?}: {source}")]
	CreateTemp {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// `save` failed to size the temporary file to the document length.
	#[error("failed to resize temp file for {path:?} to {size} bytes: {source}")]
	ResizeTemp {
		path: PathBuf,
		size: u64,
		#[source]
		source: io::Error,
	},

	/// `save` failed to map the temporary file for writing.
	#[error("failed to map temp file for {path:?}: {source}")]
	MmapTemp {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// `save` failed to rename the temporary file onto the target path.
	#[error("failed to persist temp file onto {path:?}: {source}")]
	Persist {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}

/// Result type for editor operations.
pub type Result<T> = std::result::Result<T, EditorError>;
