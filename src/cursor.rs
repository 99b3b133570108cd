//! Navigation cursor over the collection.
//!
//! ```text
//!            next                 next (at last)
//!   0 ──────────────▶ 1 ─ … ─▶ N-1 ──────────────▶ 0      wraps
//!   0 ◀────────────── 1
//!          previous
//!   0 ──previous──▶ 0                                      clamps
//! ```
//!
//! `next` wraps to the start, `previous` stops at the start. The asymmetry is
//! long-standing viewer behavior and is kept as is.
//!
//! Every operation takes the current collection length and returns the index
//! to display, or `None` when there is nothing loaded.

/// The single index identifying the image on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The index if it points at a loaded image.
    pub fn current(&self, len: usize) -> Option<usize> {
        (self.index < len).then_some(self.index)
    }

    pub fn first(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        self.index = 0;
        Some(0)
    }

    pub fn next(&mut self, len: usize) -> Option<usize> {
        if self.index + 1 < len {
            self.index += 1;
            Some(self.index)
        } else {
            self.first(len)
        }
    }

    pub fn previous(&mut self, len: usize) -> Option<usize> {
        if self.index > 0 {
            self.index -= 1;
            Some(self.index)
        } else {
            self.first(len)
        }
    }
}
