//! Undo/redo history: grouped, reversible changes to the piece chain.
//!
//! Mirrors the two-stack shape of a transactional undo store — an undo
//! stack and a redo stack of grouped [`Action`]s — but grouped changes here
//! are span-for-span splices rather than rope transactions, and history is
//! unbounded: nothing is ever evicted.

use crate::piece::{PieceGraph, Span};

/// One reversible splice: `new` replaced `old` at the same chain location.
#[derive(Debug, Clone, Copy)]
pub struct Change {
	pub old: Span,
	pub new: Span,
}

/// A group of [`Change`]s undone or redone as a single unit.
///
/// Changes are stored most-recent-first (new changes are inserted at the
/// front), matching the order both undo and redo walk the list in.
#[derive(Debug, Default)]
pub struct Action {
	changes: Vec<Change>,
	seq: u64,
}

/// Grouped, unbounded undo/redo history over a [`PieceGraph`].
#[derive(Default)]
pub struct History {
	undo_stack: Vec<Action>,
	redo_stack: Vec<Action>,
	/// Whether the top of `undo_stack` is still accepting new changes.
	open: bool,
	next_seq: u64,
	saved_seq: Option<u64>,
}

impl History {
	pub fn new() -> Self {
		History::default()
	}

	/// Records one splice as part of the current action, starting a new
	/// action (and discarding the redo stack) if none is open.
	pub fn record(&mut self, old: Span, new: Span) {
		if !self.open {
			self.redo_stack.clear();
			let seq = self.next_seq;
			self.next_seq += 1;
			self.undo_stack.push(Action { changes: Vec::new(), seq });
			self.open = true;
		}
		self.undo_stack.last_mut().expect("just pushed").changes.insert(0, Change { old, new });
	}

	/// Closes the current action. The next [`History::record`] call starts a
	/// fresh one rather than appending to this one.
	pub fn snapshot(&mut self) {
		self.open = false;
	}

	/// Reverses the most recent action, applying `span_swap(new, old)` for
	/// each of its changes in list order. Returns the signed size delta, or
	/// `None` if the undo stack is empty.
	pub fn undo(&mut self, graph: &mut PieceGraph) -> Option<isize> {
		let action = self.undo_stack.pop()?;
		self.open = false;
		let delta = action.changes.iter().map(|c| graph.span_swap(c.new, c.old)).sum();
		self.redo_stack.push(action);
		Some(delta)
	}

	/// Re-applies the most recently undone action, applying
	/// `span_swap(old, new)` for each of its changes in list order. Returns
	/// the signed size delta, or `None` if the redo stack is empty.
	pub fn redo(&mut self, graph: &mut PieceGraph) -> Option<isize> {
		let action = self.redo_stack.pop()?;
		let delta = action.changes.iter().map(|c| graph.span_swap(c.old, c.new)).sum();
		self.undo_stack.push(action);
		self.open = false;
		Some(delta)
	}

	/// Marks the current undo-stack top as the last-saved state and closes
	/// the current action, as `save` requires.
	pub fn mark_saved(&mut self) {
		self.saved_seq = self.undo_stack.last().map(|a| a.seq);
		self.open = false;
	}

	/// Whether the document has changed since the last [`History::mark_saved`].
	pub fn modified(&self) -> bool {
		self.saved_seq != self.undo_stack.last().map(|a| a.seq)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::piece::{Content, PieceId};

	fn dummy_span(g: &mut PieceGraph, len: usize) -> Span {
		let id: PieceId = g.alloc(Content::Added { slab: 0, offset: 0 }, len);
		Span { start: Some(id), end: Some(id), len }
	}

	#[test]
	fn fresh_history_is_not_modified() {
		let h = History::new();
		assert!(!h.modified());
	}

	#[test]
	fn record_opens_modified_and_mark_saved_clears_it() {
		let mut g = PieceGraph::new();
		let mut h = History::new();
		let s = dummy_span(&mut g, 3);
		h.record(Span::EMPTY, s);
		assert!(h.modified());
		h.mark_saved();
		assert!(!h.modified());
	}

	#[test]
	fn snapshot_starts_a_new_action() {
		let mut g = PieceGraph::new();
		let mut h = History::new();
		let a = dummy_span(&mut g, 1);
		h.record(Span::EMPTY, a);
		h.snapshot();
		let b = dummy_span(&mut g, 1);
		h.record(Span::EMPTY, b);

		// one undo should only reverse the second record, not both.
		h.undo(&mut g);
		assert_eq!(h.undo_stack.len(), 1, "first action must still be on the stack");
	}

	#[test]
	fn undo_then_redo_restores_modified_state() {
		let mut g = PieceGraph::new();
		let mut h = History::new();
		let s = dummy_span(&mut g, 5);
		h.record(Span::EMPTY, s);
		h.mark_saved();
		assert!(!h.modified());

		h.undo(&mut g);
		// undo_stack is now empty, saved_seq still points at the action that
		// was popped, so comparing against "no current top" reports modified.
		assert!(h.modified());

		h.redo(&mut g);
		assert!(!h.modified());
	}
}
