//! Block tokens: `Q0,T3` text into placement requests.

use crate::shape::ShapeKind;
use std::fmt;
use thiserror::Error;

/// One block to drop: its kind and the grid column of its leftmost local column (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacementRequest {
    pub kind: ShapeKind,
    pub column: usize,
}

impl PlacementRequest {
    pub fn new(kind: ShapeKind, column: usize) -> Self {
        Self { kind, column }
    }
}

/// Same text as the token it came from, e.g. `Q0`.
impl fmt::Display for PlacementRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("token {index} ({token:?}): unknown block code {code:?}")]
    UnknownShapeCode {
        index: usize,
        token: String,
        code: char,
    },
    #[error("token {index} ({token:?}): expected a block letter followed by a column number")]
    MalformedToken { index: usize, token: String },
}

/// Parse a single token: one block letter followed by decimal digits.
/// `index` is the token's position in the input, used for error reporting.
pub fn parse_token(index: usize, token: &str) -> Result<PlacementRequest, ParseError> {
    let malformed = || ParseError::MalformedToken {
        index,
        token: token.to_string(),
    };
    let mut chars = token.chars();
    let code = chars.next().ok_or_else(malformed)?;
    let kind = ShapeKind::from_code(code).ok_or_else(|| ParseError::UnknownShapeCode {
        index,
        token: token.to_string(),
        code,
    })?;
    let digits = chars.as_str();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    // Only fails on overflow once the digits are validated.
    let column = digits.parse::<usize>().map_err(|_| malformed())?;
    Ok(PlacementRequest::new(kind, column))
}

/// Parse the whole input. Lines and commas both separate tokens; surrounding whitespace is
/// trimmed and empty tokens are skipped, so blank input yields no requests.
/// The first bad token fails the whole parse.
pub fn parse_requests(text: &str) -> Result<Vec<PlacementRequest>, ParseError> {
    text.lines()
        .flat_map(|line| line.split(','))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(index, token)| parse_token(index, token))
        .collect()
}
