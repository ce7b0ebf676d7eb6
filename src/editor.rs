//! The top-level `Editor`: the piece-table document plus its history, tying
//! together the buffer pool, piece graph, and original-file mapping behind
//! the programmatic contract a front-end consumes.

use std::path::Path;

use memmap2::Mmap;

use crate::buffer::BufferPool;
use crate::edit;
use crate::error::Result;
use crate::history::History;
use crate::io;
use crate::iter::iterate;
use crate::piece::PieceGraph;

/// An in-memory piece-table document with unbounded undo/redo.
///
/// There is no explicit `close`: dropping an `Editor` releases its buffer
/// pool slabs, its piece arena, and its mapping of the original file, all
/// via ordinary `Drop`.
pub struct Editor {
	graph: PieceGraph,
	pool: BufferPool,
	history: History,
	mapping: Option<Mmap>,
	size: usize,
}

impl Editor {
	/// Opens `path` (mapping it read-only) or, if `path` is `None`, creates
	/// an empty, unbacked document.
	pub fn open(path: Option<&Path>) -> Result<Self> {
		let loaded = io::load(path)?;
		match path {
			Some(p) => tracing::debug!(path = ?p, size = loaded.size, "opened document"),
			None => tracing::debug!("opened scratch document"),
		}
		Ok(Editor {
			graph: loaded.graph,
			pool: BufferPool::new(),
			history: History::new(),
			mapping: loaded.mapping,
			size: loaded.size,
		})
	}

	/// Creates an empty, unbacked document with no file behind it.
	pub fn scratch() -> Self {
		Editor::open(None).expect("opening with no path cannot fail")
	}

	/// Inserts `bytes` at `pos`. `pos` must be `<= size()`.
	pub fn insert(&mut self, pos: usize, bytes: &[u8]) -> Result<()> {
		tracing::trace!(pos, len = bytes.len(), "insert");
		let result = edit::insert(&mut self.graph, &mut self.pool, &mut self.history, &mut self.size, pos, bytes);
		if let Err(ref e) = result {
			tracing::warn!(pos, error = %e, "insert failed");
		}
		result
	}

	/// Deletes `len` bytes starting at `pos`.
	pub fn delete(&mut self, pos: usize, len: usize) -> Result<()> {
		tracing::trace!(pos, len, "delete");
		let result = edit::delete(&mut self.graph, &mut self.history, &mut self.size, pos, len);
		if let Err(ref e) = result {
			tracing::warn!(pos, len, error = %e, "delete failed");
		}
		result
	}

	/// Deletes `bytes.len()` bytes at `pos`, then inserts `bytes` at `pos`,
	/// as one undoable action.
	pub fn replace(&mut self, pos: usize, bytes: &[u8]) -> Result<()> {
		tracing::trace!(pos, len = bytes.len(), "replace");
		let result = edit::replace(&mut self.graph, &mut self.pool, &mut self.history, &mut self.size, pos, bytes);
		if let Err(ref e) = result {
			tracing::warn!(pos, error = %e, "replace failed");
		}
		result
	}

	/// Reverses the most recent action. Returns `false` if there was nothing
	/// to undo.
	pub fn undo(&mut self) -> bool {
		match self.history.undo(&mut self.graph) {
			Some(delta) => {
				self.size = (self.size as isize + delta) as usize;
				true
			}
			None => false,
		}
	}

	/// Re-applies the most recently undone action. Returns `false` if there
	/// was nothing to redo.
	pub fn redo(&mut self) -> bool {
		match self.history.redo(&mut self.graph) {
			Some(delta) => {
				self.size = (self.size as isize + delta) as usize;
				true
			}
			None => false,
		}
	}

	/// Closes the current undo group: the next edit starts a new action
	/// instead of merging into whatever is currently open.
	pub fn snapshot(&mut self) {
		self.history.snapshot();
	}

	/// Whether the document has changed since the last successful `save`
	/// (or since it was opened, if never saved).
	pub fn modified(&self) -> bool {
		self.history.modified()
	}

	/// The document's current size in bytes.
	pub fn size(&self) -> usize {
		self.size
	}

	/// Walks the chain from `start_pos`, calling `callback(pos, bytes)` for
	/// each contiguous run until it returns `false` or the chain ends.
	pub fn iterate<F: FnMut(usize, &[u8]) -> bool>(&self, start_pos: usize, callback: F) {
		iterate(&self.graph, &self.pool, self.mapping.as_deref(), start_pos, callback);
	}

	/// Atomically writes the current document to `path`, then marks the
	/// document unmodified and closes the current undo group.
	pub fn save(&mut self, path: &Path) -> Result<()> {
		let result = io::save(path, &self.graph, &self.pool, self.mapping.as_deref(), self.size);
		match &result {
			Ok(()) => {
				tracing::debug!(path = ?path, size = self.size, "saved document");
				self.history.mark_saved();
			}
			Err(e) => tracing::warn!(path = ?path, error = %e, "save failed"),
		}
		result
	}
}
