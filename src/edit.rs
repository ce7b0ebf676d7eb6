//! Insert, delete, and replace: the three document-mutating operations.
//!
//! Each builds one or more new pieces describing the post-edit neighborhood,
//! records the splice as a [`Change`](crate::history::Change) in the current
//! history action, and applies it with [`PieceGraph::span_swap`].

use crate::buffer::BufferPool;
use crate::error::{EditorError, Result};
use crate::history::History;
use crate::location::locate;
use crate::piece::{PieceGraph, Span};

/// Inserts `bytes` at `pos`. `pos` must be `<= size`; violating this is a
/// caller bug and is only checked in debug builds, mirroring `delete`'s
/// explicit range check, which is checkable without walking the chain and so
/// is returned as an `Err` instead.
pub fn insert(graph: &mut PieceGraph, pool: &mut BufferPool, history: &mut History, size: &mut usize, pos: usize, bytes: &[u8]) -> Result<()> {
	if bytes.is_empty() {
		return Ok(());
	}
	debug_assert!(pos <= *size, "insert position {pos} is past the end of the document ({size})");

	let loc = pool.store(bytes)?;

	if graph.is_empty_chain() {
		let p = graph.alloc(loc.into(), bytes.len());
		graph.get_mut(p).prev = graph.begin;
		graph.get_mut(p).next = graph.end;
		let new = Span { start: Some(p), end: Some(p), len: bytes.len() };
		let delta = graph.span_swap(Span::EMPTY, new);
		history.record(Span::EMPTY, new);
		*size = (*size as isize + delta) as usize;
		return Ok(());
	}

	let (p, off) = locate(graph, pos);
	let piece = *graph.get(p);

	if off == piece.len {
		// Right edge of `p`: splice the new piece in between `p` and `p.next`.
		let n = graph.alloc(loc.into(), bytes.len());
		graph.get_mut(n).prev = p;
		graph.get_mut(n).next = piece.next;
		let new = Span { start: Some(n), end: Some(n), len: bytes.len() };
		let delta = graph.span_swap(Span::EMPTY, new);
		history.record(Span::EMPTY, new);
		*size = (*size as isize + delta) as usize;
		return Ok(());
	}

	if off == 0 {
		// Left edge of `p` (only possible when `pos == 0`, since `locate`
		// always resolves an interior boundary to the right edge of the
		// preceding piece): splice in between `p.prev` and `p` without
		// splitting — splitting here would allocate a zero-length piece.
		let n = graph.alloc(loc.into(), bytes.len());
		graph.get_mut(n).prev = piece.prev;
		graph.get_mut(n).next = p;
		let new = Span { start: Some(n), end: Some(n), len: bytes.len() };
		let delta = graph.span_swap(Span::EMPTY, new);
		history.record(Span::EMPTY, new);
		*size = (*size as isize + delta) as usize;
		return Ok(());
	}

	// Strictly midway through `p` (`0 < off < p.len`): split it into
	// `before`, the new piece, and `after`.
	let before = graph.alloc(piece.content, off);
	let mid = graph.alloc(loc.into(), bytes.len());
	let after = graph.alloc(piece.content.advance(off), piece.len - off);

	graph.get_mut(before).prev = piece.prev;
	graph.get_mut(before).next = mid;
	graph.get_mut(mid).prev = before;
	graph.get_mut(mid).next = after;
	graph.get_mut(after).prev = mid;
	graph.get_mut(after).next = piece.next;

	let old = Span { start: Some(p), end: Some(p), len: piece.len };
	let new = Span { start: Some(before), end: Some(after), len: piece.len + bytes.len() };
	let delta = graph.span_swap(old, new);
	history.record(old, new);
	*size = (*size as isize + delta) as usize;
	Ok(())
}

/// Deletes `len` bytes starting at `pos`. A `len` of zero is a no-op.
///
/// Resolves both endpoints with [`locate`], which always reports a position
/// sitting exactly on a piece boundary as the right edge of the preceding
/// piece (never the left edge of the following one, since pieces are never
/// zero-length) — so the piece found for `pos + len` is always wholly or
/// partially inside the deleted span, never excluded from it.
pub fn delete(graph: &mut PieceGraph, history: &mut History, size: &mut usize, pos: usize, len: usize) -> Result<()> {
	if len == 0 {
		return Ok(());
	}
	if pos + len > *size {
		return Err(EditorError::OutOfRange { pos: pos + len, size: *size });
	}

	let (p0, off0) = locate(graph, pos);
	let (p1, off1) = locate(graph, pos + len);
	let piece0 = *graph.get(p0);
	let piece1 = *graph.get(p1);

	let old_start = if off0 == piece0.len { piece0.next } else { p0 };
	let old_end = p1;

	// Only allocate a trimming piece when the boundary falls strictly inside
	// the piece — `off == 0` or `off == piece.len` means the piece is
	// wholly excluded or wholly included, and a trimming piece there would
	// have zero length, which no piece may have.
	let before = (0 < off0 && off0 < piece0.len).then(|| graph.alloc(piece0.content, off0));
	let after = (0 < off1 && off1 < piece1.len).then(|| graph.alloc(piece1.content.advance(off1), piece1.len - off1));

	let old_start_prev = graph.get(old_start).prev;
	let old_end_next = graph.get(old_end).next;

	if let Some(b) = before {
		graph.get_mut(b).prev = old_start_prev;
	}
	if let Some(a) = after {
		graph.get_mut(a).next = old_end_next;
	}
	match (before, after) {
		(Some(b), Some(a)) => {
			graph.get_mut(b).next = a;
			graph.get_mut(a).prev = b;
		}
		(Some(b), None) => graph.get_mut(b).next = old_end_next,
		(None, Some(a)) => graph.get_mut(a).prev = old_start_prev,
		(None, None) => {}
	}

	let new = match (before, after) {
		(Some(b), Some(a)) => Span { start: Some(b), end: Some(a), len: off0 + (piece1.len - off1) },
		(Some(b), None) => Span { start: Some(b), end: Some(b), len: off0 },
		(None, Some(a)) => Span { start: Some(a), end: Some(a), len: piece1.len - off1 },
		(None, None) => Span::EMPTY,
	};

	let old = Span { start: Some(old_start), end: Some(old_end), len: graph.span_init(old_start, old_end).len };
	let delta = graph.span_swap(old, new);
	history.record(old, new);
	*size = (*size as isize + delta) as usize;
	Ok(())
}

/// Deletes `bytes.len()` bytes at `pos`, then inserts `bytes` at `pos`.
///
/// The delete length intentionally tracks the *replacement*'s length, not
/// any independently tracked "span being replaced" — this mirrors the
/// original editor's behavior and some callers rely on it.
pub fn replace(graph: &mut PieceGraph, pool: &mut BufferPool, history: &mut History, size: &mut usize, pos: usize, bytes: &[u8]) -> Result<()> {
	delete(graph, history, size, pos, bytes.len())?;
	insert(graph, pool, history, size, pos, bytes)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::iter::collect;

	fn new_state() -> (PieceGraph, BufferPool, History, usize) {
		(PieceGraph::new(), BufferPool::new(), History::new(), 0)
	}

	#[test]
	fn insert_into_empty_document() {
		let (mut g, mut pool, mut h, mut size) = new_state();
		insert(&mut g, &mut pool, &mut h, &mut size, 0, b"hello").unwrap();
		assert_eq!(size, 5);
		assert_eq!(collect(&g, &pool, None, 0), b"hello");
	}

	#[test]
	fn insert_at_piece_boundary_does_not_split() {
		let (mut g, mut pool, mut h, mut size) = new_state();
		insert(&mut g, &mut pool, &mut h, &mut size, 0, b"ab").unwrap();
		insert(&mut g, &mut pool, &mut h, &mut size, 2, b"cd").unwrap();
		assert_eq!(collect(&g, &pool, None, 0), b"abcd");
	}

	#[test]
	fn insert_midway_splits_piece() {
		let (mut g, mut pool, mut h, mut size) = new_state();
		insert(&mut g, &mut pool, &mut h, &mut size, 0, b"abcd").unwrap();
		insert(&mut g, &mut pool, &mut h, &mut size, 2, b"XY").unwrap();
		assert_eq!(collect(&g, &pool, None, 0), b"abXYcd");
		assert_eq!(size, 6);
	}

	#[test]
	fn insert_at_start_and_end() {
		let (mut g, mut pool, mut h, mut size) = new_state();
		insert(&mut g, &mut pool, &mut h, &mut size, 0, b"bcd").unwrap();
		insert(&mut g, &mut pool, &mut h, &mut size, 0, b"a").unwrap();
		insert(&mut g, &mut pool, &mut h, &mut size, 4, b"e").unwrap();
		assert_eq!(collect(&g, &pool, None, 0), b"abcde");
	}

	#[test]
	fn delete_whole_piece() {
		let (mut g, mut pool, mut h, mut size) = new_state();
		insert(&mut g, &mut pool, &mut h, &mut size, 0, b"abc").unwrap();
		insert(&mut g, &mut pool, &mut h, &mut size, 3, b"def").unwrap();
		delete(&mut g, &mut h, &mut size, 3, 3).unwrap();
		assert_eq!(collect(&g, &pool, None, 0), b"abc");
	}

	#[test]
	fn delete_whole_prefix_and_suffix() {
		let (mut g, mut pool, mut h, mut size) = new_state();
		insert(&mut g, &mut pool, &mut h, &mut size, 0, b"abcdef").unwrap();
		delete(&mut g, &mut h, &mut size, 0, 2).unwrap();
		assert_eq!(collect(&g, &pool, None, 0), b"cdef");
		let len = collect(&g, &pool, None, 0).len();
		delete(&mut g, &mut h, &mut size, len - 2, 2).unwrap();
		assert_eq!(collect(&g, &pool, None, 0), b"cd");
	}

	#[test]
	fn delete_spanning_multiple_pieces_midway_both_ends() {
		let (mut g, mut pool, mut h, mut size) = new_state();
		insert(&mut g, &mut pool, &mut h, &mut size, 0, b"abc").unwrap();
		insert(&mut g, &mut pool, &mut h, &mut size, 3, b"def").unwrap();
		insert(&mut g, &mut pool, &mut h, &mut size, 6, b"ghi").unwrap();
		delete(&mut g, &mut h, &mut size, 2, 5).unwrap();
		assert_eq!(collect(&g, &pool, None, 0), b"abhi");
	}

	#[test]
	fn delete_entire_document_then_insert() {
		let (mut g, mut pool, mut h, mut size) = new_state();
		insert(&mut g, &mut pool, &mut h, &mut size, 0, b"abcdef").unwrap();
		delete(&mut g, &mut h, &mut size, 0, 6).unwrap();
		assert_eq!(size, 0);
		insert(&mut g, &mut pool, &mut h, &mut size, 0, b"xyz").unwrap();
		assert_eq!(collect(&g, &pool, None, 0), b"xyz");
	}

	#[test]
	fn delete_rejects_out_of_range() {
		let (mut g, mut pool, mut h, mut size) = new_state();
		insert(&mut g, &mut pool, &mut h, &mut size, 0, b"abc").unwrap();
		assert!(delete(&mut g, &mut h, &mut size, 1, 10).is_err());
		assert_eq!(collect(&g, &pool, None, 0), b"abc", "a rejected delete must not mutate the chain");
	}

	#[test]
	fn replace_deletes_replacement_length_not_a_semantic_span() {
		let (mut g, mut pool, mut h, mut size) = new_state();
		insert(&mut g, &mut pool, &mut h, &mut size, 0, b"abcdef").unwrap();
		replace(&mut g, &mut pool, &mut h, &mut size, 1, b"XYZ").unwrap();
		assert_eq!(collect(&g, &pool, None, 0), b"aXYZef");
	}
}
