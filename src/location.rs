//! Maps a byte offset in the logical document to a `(piece, in-piece offset)` pair.

use crate::piece::{PieceGraph, PieceId};

/// Resolves `pos` to the piece containing it.
///
/// Returns `(piece, off)` where `off` is the offset within `piece`'s byte
/// range. `off == piece.len` is a valid result meaning "the right edge of
/// `piece`", used to represent an insertion point between two pieces.
///
/// # Panics
///
/// Panics (via a failed chain walk reaching the `end` sentinel) if `pos` is
/// greater than the document size, or if called on an empty chain — callers
/// must validate `pos <= size()` and special-case the empty document before
/// calling this, exactly as `insert` does.
pub fn locate(graph: &PieceGraph, pos: usize) -> (PieceId, usize) {
	debug_assert!(!graph.is_empty_chain(), "locate called on an empty chain");
	let mut cur = 0usize;
	let mut p = graph.get(graph.begin).next;
	loop {
		assert_ne!(p, graph.end, "locate: pos {pos} is past the end of the document");
		let len = graph.get(p).len;
		if pos <= cur + len {
			return (p, pos - cur);
		}
		cur += len;
		p = graph.get(p).next;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::piece::{Content, Span};

	fn chain_abc(g: &mut PieceGraph) -> (PieceId, PieceId) {
		let a = g.alloc(Content::Added { slab: 0, offset: 0 }, 1);
		let b = g.alloc(Content::Added { slab: 0, offset: 1 }, 1);
		let c = g.alloc(Content::Added { slab: 0, offset: 2 }, 1);
		g.get_mut(a).prev = g.begin;
		g.get_mut(a).next = b;
		g.get_mut(b).prev = a;
		g.get_mut(b).next = c;
		g.get_mut(c).prev = b;
		g.get_mut(c).next = g.end;
		g.span_swap(Span::EMPTY, Span { start: Some(a), end: Some(c), len: 3 });
		(a, c)
	}

	#[test]
	fn locate_start_and_middle_and_end() {
		let mut g = PieceGraph::new();
		let (a, c) = chain_abc(&mut g);
		assert_eq!(locate(&g, 0), (a, 0));
		assert_eq!(locate(&g, 1).1, 0);
		assert_eq!(locate(&g, 3), (c, 1));
	}
}
