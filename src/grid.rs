//! Grid: fixed width, grows upward. Row 0 is the floor.

use std::fmt;

/// Single cell: empty or occupied by part of a placed block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Occupied,
}

/// Stack of rows. `rows[0]` is the floor; new rows are appended on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    /// rows[y][x] = cell.
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// One empty row, `width` cells wide.
    pub fn new(width: usize) -> Self {
        Self {
            width,
            rows: vec![Self::empty_row(width)],
        }
    }

    fn empty_row(width: usize) -> Vec<Cell> {
        vec![Cell::Empty; width]
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    #[inline]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        matches!(self.get(row, col), Some(Cell::Occupied))
    }

    /// Rows from the floor up.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Append empty rows on top until the grid is `height` rows tall. Returns rows added.
    pub fn grow_to(&mut self, height: usize) -> usize {
        let added = height.saturating_sub(self.rows.len());
        let width = self.width;
        self.rows
            .extend(std::iter::repeat_with(|| Self::empty_row(width)).take(added));
        added
    }

    /// Mark a cell occupied. Callers stay inside the grid; release builds ignore cells
    /// outside it.
    pub fn occupy(&mut self, row: usize, col: usize) {
        debug_assert!(
            row < self.height() && col < self.width,
            "cell ({row}, {col}) is outside the {}x{} grid",
            self.width,
            self.height()
        );
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = Cell::Occupied;
        }
    }

    /// Remove every row with no empty cell; rows above drop down to fill the gap.
    /// The grid never ends up zero rows tall. Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| row.contains(&Cell::Empty));
        let removed = before - self.rows.len();
        if self.rows.is_empty() {
            self.rows.push(Self::empty_row(self.width));
        }
        removed
    }

    /// Index of the highest occupied cell in `col`, plus one. 0 for an empty column.
    pub fn column_height(&self, col: usize) -> usize {
        self.rows
            .iter()
            .rposition(|row| row.get(col) == Some(&Cell::Occupied))
            .map_or(0, |y| y + 1)
    }

    pub fn occupied_count(&self) -> usize {
        self.rows
            .iter()
            .flatten()
            .filter(|&&cell| cell == Cell::Occupied)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied_count() == 0
    }
}

/// Top row first, `#` for occupied and `.` for empty.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().rev().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let c = match cell {
                    Cell::Empty => '.',
                    Cell::Occupied => '#',
                };
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}
