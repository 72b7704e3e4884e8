//! Block shapes: the seven fixed forms (Q, J, L, Z, S, I, T) and their occupancy matrices.

use std::fmt;

/// Block kinds, named by the letter used in block tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Q,
    J,
    L,
    Z,
    S,
    I,
    T,
}

impl ShapeKind {
    pub const ALL: [Self; 7] = [Self::Q, Self::J, Self::L, Self::Z, Self::S, Self::I, Self::T];

    /// Map a token letter to a kind. Letters are case-sensitive.
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'Q' => Some(Self::Q),
            'J' => Some(Self::J),
            'L' => Some(Self::L),
            'Z' => Some(Self::Z),
            'S' => Some(Self::S),
            'I' => Some(Self::I),
            'T' => Some(Self::T),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            Self::Q => 'Q',
            Self::J => 'J',
            Self::L => 'L',
            Self::Z => 'Z',
            Self::S => 'S',
            Self::I => 'I',
            Self::T => 'T',
        }
    }

    /// Occupancy matrix for this kind. Shapes never rotate.
    pub fn shape(self) -> &'static Shape {
        match self {
            Self::Q => &SHAPE_Q,
            Self::J => &SHAPE_J,
            Self::L => &SHAPE_L,
            Self::Z => &SHAPE_Z,
            Self::S => &SHAPE_S,
            Self::I => &SHAPE_I,
            Self::T => &SHAPE_T,
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Rectangular occupancy matrix. `rows[0]` is the top row, as the shape is drawn.
#[derive(Debug, PartialEq, Eq)]
pub struct Shape {
    rows: &'static [&'static [u8]],
}

static SHAPE_Q: Shape = Shape {
    rows: &[
        &[1, 1],
        &[1, 1],
    ],
};

static SHAPE_J: Shape = Shape {
    rows: &[
        &[0, 1],
        &[0, 1],
        &[1, 1],
    ],
};

static SHAPE_L: Shape = Shape {
    rows: &[
        &[1, 0],
        &[1, 0],
        &[1, 1],
    ],
};

static SHAPE_Z: Shape = Shape {
    rows: &[
        &[1, 1, 0],
        &[0, 1, 1],
    ],
};

static SHAPE_S: Shape = Shape {
    rows: &[
        &[0, 1, 1],
        &[1, 1, 0],
    ],
};

static SHAPE_I: Shape = Shape {
    rows: &[&[1, 1, 1, 1]],
};

static SHAPE_T: Shape = Shape {
    rows: &[
        &[1, 1, 1],
        &[0, 1, 0],
    ],
};

impl Shape {
    #[inline]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// True if the local cell is filled. `row` counts up from the shape's bottom edge.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        let height = self.height();
        if row >= height {
            return false;
        }
        self.rows[height - 1 - row].get(col).is_some_and(|&bit| bit != 0)
    }

    /// Filled cells as `(row, col)`, bottom row first so ground contact is tested first.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height()).flat_map(move |row| {
            (0..self.width())
                .filter(move |&col| self.is_filled(row, col))
                .map(move |col| (row, col))
        })
    }

    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    /// Local column of the rightmost filled cell.
    pub fn rightmost_filled_col(&self) -> usize {
        self.cells().map(|(_, col)| col).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_roundtrip() {
        for kind in ShapeKind::ALL {
            assert_eq!(ShapeKind::from_code(kind.code()), Some(kind));
        }
        assert_eq!(ShapeKind::from_code('q'), None);
        assert_eq!(ShapeKind::from_code('O'), None);
    }

    #[test]
    fn test_every_shape_has_four_cells_and_a_tight_box() {
        for kind in ShapeKind::ALL {
            let shape = kind.shape();
            assert_eq!(shape.cell_count(), 4, "{kind}");
            assert_eq!(shape.rightmost_filled_col(), shape.width() - 1, "{kind}");
            assert!(shape.cells().any(|(_, col)| col == 0), "{kind}");
            assert!(shape.cells().any(|(row, _)| row == 0), "{kind}");
            assert!(shape.cells().any(|(row, _)| row == shape.height() - 1), "{kind}");
        }
    }

    #[test]
    fn test_cells_are_bottom_row_first() {
        // L is drawn as 10 / 10 / 11.
        let cells: Vec<_> = ShapeKind::L.shape().cells().collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0), (2, 0)]);
    }

    #[test]
    fn test_t_overhangs_its_stem() {
        let t = ShapeKind::T.shape();
        assert!(t.is_filled(0, 1));
        assert!(!t.is_filled(0, 0));
        assert!(!t.is_filled(0, 2));
        assert!((0..3).all(|col| t.is_filled(1, col)));
    }

    #[test]
    fn test_out_of_range_is_empty() {
        let i = ShapeKind::I.shape();
        assert_eq!((i.width(), i.height()), (4, 1));
        assert!(!i.is_filled(1, 0));
        assert!(!i.is_filled(0, 4));
    }
}
