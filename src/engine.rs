//! Placement engine: drop search, grid growth, full-row removal.

use crate::grid::Grid;
use crate::input::PlacementRequest;
use crate::shape::ShapeKind;
use crate::EngineConfig;
use thiserror::Error;
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("block {kind} at column {column} does not fit in a grid {width} columns wide")]
    ColumnOutOfBounds {
        kind: ShapeKind,
        column: usize,
        width: usize,
    },
    #[error("block {kind} at column {column} has no legal resting row")]
    Unplaceable { kind: ShapeKind, column: usize },
}

/// A committed placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub kind: ShapeKind,
    pub column: usize,
    /// Grid row of the shape's bottom edge when it came to rest, before any rows were cleared.
    pub resting_row: usize,
    pub rows_cleared: usize,
    /// Grid height after growth and row removal.
    pub height: usize,
}

/// Result of testing the shape against the grid at one anchor.
#[derive(Debug, Default)]
struct Probe {
    overlap: bool,
    column_overflow: bool,
    /// Rows the grid must have for every cell to fit.
    required_height: usize,
    /// Absolute (row, col) cells to occupy if this anchor is accepted.
    cells: Vec<(usize, usize)>,
}

/// Owns the grid and drops blocks onto it one request at a time.
#[derive(Debug, Clone)]
pub struct PlacementEngine {
    grid: Grid,
    placements: usize,
    rows_cleared: usize,
}

impl PlacementEngine {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_width(config.width)
    }

    pub fn with_width(width: usize) -> Self {
        Self {
            grid: Grid::new(width),
            placements: 0,
            rows_cleared: 0,
        }
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of blocks placed so far.
    pub fn placements(&self) -> usize {
        self.placements
    }

    /// Total rows removed so far.
    pub fn rows_cleared(&self) -> usize {
        self.rows_cleared
    }

    pub fn place_request(&mut self, request: &PlacementRequest) -> Result<Placement, PlacementError> {
        self.place(request.kind, request.column)
    }

    /// Place every request in order. Stops at the first failure; the grid keeps the
    /// placements made before it.
    pub fn place_all(&mut self, requests: &[PlacementRequest]) -> Result<(), crate::Error> {
        for (index, request) in requests.iter().enumerate() {
            self.place_request(request)
                .map_err(|source| crate::Error::Placement {
                    index,
                    request: *request,
                    source,
                })?;
        }
        Ok(())
    }

    /// Drop `kind` with its leftmost local column at `column` and commit it at the lowest
    /// row it can reach from above. The grid is left untouched on error.
    pub fn place(&mut self, kind: ShapeKind, column: usize) -> Result<Placement, PlacementError> {
        let (resting_row, probe) = self.find_resting_row(kind, column)?;

        let added = self.grid.grow_to(probe.required_height);
        if added > 0 {
            trace!(rows = added, height = self.grid.height(), "grid grew");
        }
        for &(row, col) in &probe.cells {
            debug_assert!(!self.grid.is_occupied(row, col));
            self.grid.occupy(row, col);
        }

        let rows_cleared = self.grid.clear_full_rows();
        if rows_cleared > 0 {
            trace!(rows = rows_cleared, height = self.grid.height(), "cleared full rows");
        }
        self.placements += 1;
        self.rows_cleared += rows_cleared;

        let placement = Placement {
            kind,
            column,
            resting_row,
            rows_cleared,
            height: self.grid.height(),
        };
        debug!(
            %kind,
            column,
            resting_row,
            rows_cleared,
            height = placement.height,
            "placed block"
        );
        trace!("grid after placement:\n{}", self.grid);
        Ok(placement)
    }

    /// Lowest-legal-row search. Starts with the shape's bottom edge one row above the
    /// current top and moves it down until the next step would overlap or it reaches the
    /// floor. Returns the resting row with the accepted probe.
    fn find_resting_row(
        &self,
        kind: ShapeKind,
        column: usize,
    ) -> Result<(usize, Probe), PlacementError> {
        let width = self.grid.width();
        let rightmost = column.checked_add(kind.shape().rightmost_filled_col());
        if rightmost.is_none_or(|col| col >= width) {
            return Err(PlacementError::ColumnOutOfBounds {
                kind,
                column,
                width,
            });
        }

        let mut bottom = self.grid.height();
        let mut accepted = self.probe(kind, bottom, column);
        debug_assert!(!accepted.column_overflow);
        if accepted.overlap {
            return Err(PlacementError::Unplaceable { kind, column });
        }

        while bottom > 0 {
            let next = self.probe(kind, bottom - 1, column);
            if next.overlap {
                break;
            }
            accepted = next;
            bottom -= 1;
        }
        Ok((bottom, accepted))
    }

    /// Test the shape with its bottom edge on grid row `bottom` and its left edge on `column`.
    /// Cells above the current top never overlap; they raise `required_height` instead.
    fn probe(&self, kind: ShapeKind, bottom: usize, column: usize) -> Probe {
        let shape = kind.shape();
        let (width, height) = (self.grid.width(), self.grid.height());
        let mut probe = Probe {
            required_height: height,
            cells: Vec::with_capacity(shape.cell_count()),
            ..Probe::default()
        };

        for (local_row, local_col) in shape.cells() {
            let row = bottom + local_row;
            let col = column.saturating_add(local_col);
            if col >= width {
                probe.column_overflow = true;
                return probe;
            }
            if row >= height {
                probe.required_height = probe.required_height.max(row + 1);
            } else if self.grid.is_occupied(row, col) {
                probe.overlap = true;
                return probe;
            }
            probe.cells.push((row, col));
        }
        probe
    }
}

impl Default for PlacementEngine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_above_top_needs_growth() {
        let engine = PlacementEngine::with_width(10);
        let probe = engine.probe(ShapeKind::Q, 1, 0);
        assert!(!probe.overlap);
        assert_eq!(probe.required_height, 3);
        assert_eq!(probe.cells, vec![(1, 0), (1, 1), (2, 0), (2, 1)]);
    }

    #[test]
    fn test_probe_detects_overlap() {
        let mut engine = PlacementEngine::with_width(10);
        engine.place(ShapeKind::Q, 0).unwrap();
        assert!(engine.probe(ShapeKind::I, 1, 1).overlap);
        assert!(!engine.probe(ShapeKind::I, 2, 1).overlap);
    }

    #[test]
    fn test_probe_flags_right_edge_overflow() {
        let engine = PlacementEngine::with_width(10);
        assert!(engine.probe(ShapeKind::I, 1, 7).column_overflow);
        assert!(!engine.probe(ShapeKind::I, 1, 6).column_overflow);
    }

    #[test]
    fn test_rejected_request_leaves_grid_untouched() {
        let mut engine = PlacementEngine::with_width(10);
        engine.place(ShapeKind::T, 0).unwrap();
        let before = engine.grid().clone();
        let err = engine.place(ShapeKind::Q, 9).unwrap_err();
        assert_eq!(
            err,
            PlacementError::ColumnOutOfBounds {
                kind: ShapeKind::Q,
                column: 9,
                width: 10,
            }
        );
        assert_eq!(engine.grid(), &before);
        assert_eq!(engine.placements(), 1);
    }

    #[test]
    fn test_huge_column_is_out_of_bounds() {
        let mut engine = PlacementEngine::with_width(10);
        assert_eq!(
            engine.place(ShapeKind::J, usize::MAX),
            Err(PlacementError::ColumnOutOfBounds {
                kind: ShapeKind::J,
                column: usize::MAX,
                width: 10,
            })
        );
        assert_eq!(engine.height(), 1);
        assert!(engine.grid().is_empty());
    }

    #[test]
    fn test_first_block_uses_the_initial_row() {
        let mut engine = PlacementEngine::default();
        let placement = engine.place(ShapeKind::I, 3).unwrap();
        assert_eq!(placement.resting_row, 0);
        assert_eq!(placement.height, 1);
        assert!((3..7).all(|col| engine.grid().is_occupied(0, col)));
    }
}
