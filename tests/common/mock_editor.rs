//! Mock Editor for Testing
//!
//! Simulates the user clearing the selection while a request is in flight.

use codetrans::editor::{Editor, TextBuffer};
use codetrans::TransResult;
use std::cell::Cell;
use std::ops::Range;

/// Editor whose selection reads as empty once its text has been taken
pub struct VanishingSelection {
    pub buffer: TextBuffer,
    taken: Cell<bool>,
}

impl VanishingSelection {
    pub fn new(buffer: TextBuffer) -> Self {
        Self {
            buffer,
            taken: Cell::new(false),
        }
    }
}

impl Editor for VanishingSelection {
    fn selection(&self) -> Range<usize> {
        self.buffer.selection()
    }

    fn selected_text(&self) -> String {
        self.taken.set(true);
        self.buffer.selected_text()
    }

    fn replace_range(&mut self, range: Range<usize>, text: &str) -> TransResult<()> {
        self.buffer.replace_range(range, text)
    }

    fn selection_is_empty(&self) -> bool {
        self.taken.get()
    }
}
