//! Card cursor over a row-major grid.

use crate::types::CardId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCursor {
    index: CardId,
    columns: usize,
    len: usize,
}

impl GridCursor {
    pub fn new(columns: usize, len: usize) -> Self {
        Self {
            index: 0,
            columns: columns.max(1),
            len,
        }
    }

    pub fn index(&self) -> CardId {
        self.index
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Move one cell, wrapping within the current row or column.
    ///
    /// A short last row is handled by skipping positions past `len`.
    pub fn step(&mut self, dir: Direction) {
        if self.len == 0 {
            return;
        }
        let rows = self.len.div_ceil(self.columns);
        let (mut row, mut col) = (self.index / self.columns, self.index % self.columns);

        loop {
            match dir {
                Direction::Left => col = (col + self.columns - 1) % self.columns,
                Direction::Right => col = (col + 1) % self.columns,
                Direction::Up => row = (row + rows - 1) % rows,
                Direction::Down => row = (row + 1) % rows,
            }
            let candidate = row * self.columns + col;
            if candidate < self.len {
                self.index = candidate;
                return;
            }
        }
    }

    /// Re-fit after the deck changed size.
    pub fn resize(&mut self, len: usize) {
        self.len = len;
        if self.index >= len {
            self.index = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moves_and_wraps() {
        let mut c = GridCursor::new(4, 16);
        c.step(Direction::Left);
        assert_eq!(c.index(), 3);
        c.step(Direction::Right);
        assert_eq!(c.index(), 0);
        c.step(Direction::Up);
        assert_eq!(c.index(), 12);
        c.step(Direction::Down);
        assert_eq!(c.index(), 0);
        c.step(Direction::Down);
        c.step(Direction::Right);
        assert_eq!(c.index(), 5);
    }

    #[test]
    fn test_short_last_row_is_skipped() {
        // 6 cards in 4 columns: row 1 has ids 4 and 5 only.
        let mut c = GridCursor::new(4, 6);
        for _ in 0..3 {
            c.step(Direction::Right);
        }
        assert_eq!(c.index(), 3);
        c.step(Direction::Down);
        // Column 3 has no second-row card; wraps back to row 0.
        assert_eq!(c.index(), 3);

        let mut c = GridCursor::new(4, 6);
        c.step(Direction::Down);
        assert_eq!(c.index(), 4);
        c.step(Direction::Right);
        c.step(Direction::Right);
        assert_eq!(c.index(), 4);
    }

    #[test]
    fn test_resize_clamps() {
        let mut c = GridCursor::new(4, 16);
        c.step(Direction::Up);
        c.resize(6);
        assert_eq!(c.index(), 0);
    }
}
