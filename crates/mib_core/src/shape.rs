use crate::error::{MibError, Result};
use std::str::FromStr;

/// Logical arrangement of consecutive frames: a stack or a 2D scan grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanShape {
    Stack(usize),
    Grid(usize, usize),
}

impl Default for ScanShape {
    fn default() -> Self {
        Self::Grid(1, 1)
    }
}

impl ScanShape {
    /// Total number of frames the shape addresses.
    #[must_use]
    pub const fn frame_count(&self) -> usize {
        match self {
            Self::Stack(n) => *n,
            Self::Grid(rows, cols) => (*rows).saturating_mul(*cols),
        }
    }

    pub fn dims(&self) -> Vec<usize> {
        match self {
            Self::Stack(n) => vec![*n],
            Self::Grid(rows, cols) => vec![*rows, *cols],
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.dims().contains(&0) {
            return Err(MibError::InvalidShape(format!(
                "{self} has a zero-length axis"
            )));
        }
        Ok(())
    }
}

impl From<usize> for ScanShape {
    fn from(n: usize) -> Self {
        Self::Stack(n)
    }
}

impl From<(usize, usize)> for ScanShape {
    fn from((rows, cols): (usize, usize)) -> Self {
        Self::Grid(rows, cols)
    }
}

impl std::fmt::Display for ScanShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stack(n) => write!(f, "({n})"),
            Self::Grid(rows, cols) => write!(f, "({rows}, {cols})"),
        }
    }
}

impl FromStr for ScanShape {
    type Err = MibError;

    /// Accepts `"16"`, `"2,1"` or `"2x1"`.
    fn from_str(s: &str) -> Result<Self> {
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| MibError::InvalidShape(format!("'{s}' is not a frame count or grid")))
        };

        let parts: Vec<&str> = s.split([',', 'x']).collect();
        match parts.as_slice() {
            [n] => Ok(Self::Stack(parse(n)?)),
            [rows, cols] => Ok(Self::Grid(parse(rows)?, parse(cols)?)),
            _ => Err(MibError::InvalidShape(format!(
                "'{s}' has more than two axes"
            ))),
        }
    }
}
