//! Blockdrop — drop Q/J/L/Z/S/I/T blocks onto a fixed-width grid and measure the stack.
//!
//! Blocks fall straight down from above the current top of the stack and stop on the
//! first cell they would overlap, or on the floor. The grid grows upward as needed and
//! loses every row that becomes completely filled.

pub mod engine;
pub mod grid;
pub mod input;
pub mod shape;

pub use engine::{Placement, PlacementEngine, PlacementError};
pub use grid::{Cell, Grid};
pub use input::{ParseError, PlacementRequest, parse_requests};
pub use shape::{Shape, ShapeKind};

use thiserror::Error;
use tracing::info;

/// Grid width when none is configured.
pub const DEFAULT_WIDTH: usize = 10;

/// Options that affect engine behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub width: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.width == 0 {
            return Err(Error::InvalidConfig("grid width must be at least 1".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("block {index} ({request}): {source}")]
    Placement {
        index: usize,
        request: PlacementRequest,
        source: PlacementError,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Parse `text` and drop every block in order. Nothing is placed unless the whole input
/// parses; any failed placement aborts the batch.
pub fn simulate(text: &str, config: &EngineConfig) -> Result<PlacementEngine, Error> {
    config.validate()?;
    let requests = parse_requests(text)?;
    info!(
        blocks = requests.len(),
        width = config.width,
        "parsed placement requests"
    );

    let mut engine = PlacementEngine::new(config);
    engine.place_all(&requests)?;
    info!(
        height = engine.height(),
        rows_cleared = engine.rows_cleared(),
        "all blocks placed"
    );
    Ok(engine)
}

/// Final grid height after dropping every block in `text`.
pub fn run_batch(text: &str, config: &EngineConfig) -> Result<usize, Error> {
    simulate(text, config).map(|engine| engine.height())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_width_is_rejected() {
        let err = run_batch("Q0", &EngineConfig { width: 0 }).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_parse_errors_abort_before_placing() {
        let err = run_batch("Q0,Q0,Y1", &EngineConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError::UnknownShapeCode { index: 2, .. })
        ));
    }

    #[test]
    fn test_placement_error_names_the_request() {
        let err = run_batch("Q0,I8", &EngineConfig::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "block 1 (I8): block I at column 8 does not fit in a grid 10 columns wide"
        );
    }
}
