//! An in-memory piece-table text buffer.
//!
//! A document is a chain of pieces, each a view into either a read-only
//! memory-mapped original file or an append-only insertion buffer. Edits
//! splice pieces in and out of the chain rather than copying or moving
//! document bytes, so insert/delete/replace cost is proportional to the
//! number of pieces touched, not document size. Undo and redo replay those
//! splices in reverse and forward order; save writes the current chain to a
//! temp file and renames it into place.
//!
//! The [`Editor`] type is the entry point; everything else is internal
//! plumbing it composes.

pub mod buffer;
pub mod edit;
pub mod editor;
pub mod error;
pub mod history;
pub mod io;
pub mod iter;
pub mod location;
pub mod piece;

pub use editor::Editor;
pub use error::{EditorError, Result};
