//! Printable statistics for a decoded frame.

use ndarray::Array2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub min: u32,
    pub max: u32,
    pub sum: u64,
    pub mean: f64,
}

impl FrameStats {
    pub fn from_frame(frame: &Array2<u32>) -> Option<Self> {
        let min = frame.iter().copied().min()?;
        let max = frame.iter().copied().max()?;
        let sum: u64 = frame.iter().map(|&v| u64::from(v)).sum();
        let mean = sum as f64 / frame.len() as f64;
        Some(Self { min, max, sum, mean })
    }
}

impl std::fmt::Display for FrameStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "min {} | max {} | sum {} | mean {:.3}",
            self.min, self.max, self.sum, self.mean
        )
    }
}
