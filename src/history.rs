//! Snapshot undo/redo history.
//!
//! `present` is the live value; the store reads and writes through it.
//! Every recorded change pushes the previous present onto `past` and clears
//! `future`. `past` is trimmed from the oldest end once it exceeds `limit`
//! (a limit of zero keeps everything).

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

pub const DEFAULT_LIMIT: usize = 200;

#[derive(Clone, Debug)]
pub struct History<T> {
    past: Vec<T>,
    present: T,
    future: Vec<T>,
    limit: usize,
}

impl<T: Clone> History<T> {
    pub fn new(present: T, limit: usize) -> Self {
        Self {
            past: Vec::new(),
            present,
            future: Vec::new(),
            limit,
        }
    }

    pub fn present(&self) -> &T {
        &self.present
    }

    /// Replace the present with `next`, making the old present undoable.
    pub fn record(&mut self, next: T) {
        let previous = std::mem::replace(&mut self.present, next);
        self.past.push(previous);
        if self.limit > 0 && self.past.len() > self.limit {
            let overflow = self.past.len() - self.limit;
            self.past.drain(0..overflow);
        }
        self.future.clear();
    }

    /// Step back one entry. Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(prev) = self.past.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, prev);
        self.future.push(current);
        true
    }

    /// Step forward one entry. Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.past.push(current);
        true
    }

    /// Drop all history and start over from `present`.
    pub fn reset(&mut self, present: T) {
        self.past.clear();
        self.future.clear();
        self.present = present;
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.past.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.future.len()
    }
}
