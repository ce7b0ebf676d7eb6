//! Loading the original file (read-only mmap) and atomic saving.
//!
//! Save writes to a `NamedTempFile` in the target's own directory (same
//! filesystem, so the final rename is atomic), maps it writable, copies the
//! iterated document into it, then persists it onto the target path. Any
//! failure along the way leaves the target untouched — `tempfile`'s drop
//! guard removes the unused temp file.

use std::fs::File;
use std::path::Path;

use memmap2::{Mmap, MmapMut};
use tempfile::NamedTempFile;

use crate::buffer::BufferPool;
use crate::error::{EditorError, Result};
use crate::iter::iterate;
use crate::piece::{Content, PieceGraph, Span};

/// The state `load` hands back to the editor: a freshly built chain, the
/// read-only mapping backing it (if any), and the resulting document size.
pub struct Loaded {
	pub mapping: Option<Mmap>,
	pub graph: PieceGraph,
	pub size: usize,
}

/// Opens and maps `path` read-only, installing one piece spanning the whole
/// file. A zero-length file yields an empty document with no mapping
/// (mapping a zero-length file is itself invalid). `path = None` yields a
/// fresh, empty, unbacked editor.
pub fn load(path: Option<&Path>) -> Result<Loaded> {
	let mut graph = PieceGraph::new();
	let Some(path) = path else {
		return Ok(Loaded { mapping: None, graph, size: 0 });
	};

	let file = File::open(path).map_err(|source| EditorError::Open { path: path.to_path_buf(), source })?;
	let meta = file.metadata().map_err(|source| EditorError::Open { path: path.to_path_buf(), source })?;
	if !meta.is_file() {
		return Err(EditorError::NotARegularFile { path: path.to_path_buf() });
	}

	let size = meta.len() as usize;
	if size == 0 {
		return Ok(Loaded { mapping: None, graph, size: 0 });
	}

	// SAFETY: `file` is open for the duration of the mapping and this
	// editor never truncates or writes through it; external mutation of the
	// backing file while mapped is documented as undefined behavior (see
	// the crate's external-interfaces notes), same caveat any mmap-backed
	// reader carries.
	let mapping = unsafe { Mmap::map(&file) }.map_err(|source| EditorError::Mmap { path: path.to_path_buf(), source })?;

	let p = graph.alloc(Content::Original { offset: 0 }, size);
	graph.get_mut(p).prev = graph.begin;
	graph.get_mut(p).next = graph.end;
	graph.span_swap(Span::EMPTY, Span { start: Some(p), end: Some(p), len: size });

	Ok(Loaded { mapping: Some(mapping), graph, size })
}

/// Atomically writes the document's current content to `path`.
pub fn save(path: &Path, graph: &PieceGraph, pool: &BufferPool, original: Option<&[u8]>, size: usize) -> Result<()> {
	let parent = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
	let tmp = NamedTempFile::new_in(parent).map_err(|source| EditorError::CreateTemp { path: path.to_path_buf(), source })?;
	tmp.as_file()
		.set_len(size as u64)
		.map_err(|source| EditorError::ResizeTemp { path: path.to_path_buf(), size: size as u64, source })?;

	if size > 0 {
		// SAFETY: the temp file was just sized to `size` bytes and is
		// exclusively owned by this call; no other process can observe it
		// before `persist` renames it into place.
		let mut mmap = unsafe { MmapMut::map_mut(tmp.as_file()) }.map_err(|source| EditorError::MmapTemp { path: path.to_path_buf(), source })?;
		let mut pos = 0usize;
		iterate(graph, pool, original, 0, |_, bytes| {
			mmap[pos..pos + bytes.len()].copy_from_slice(bytes);
			pos += bytes.len();
			true
		});
		mmap.flush().map_err(|source| EditorError::MmapTemp { path: path.to_path_buf(), source })?;
	}

	tmp.persist(path).map_err(|e| EditorError::Persist { path: path.to_path_buf(), source: e.error })?;
	Ok(())
}
