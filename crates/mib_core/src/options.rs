//! Load options

use crate::shape::ScanShape;

/// Options for one load call
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Logical arrangement of the frames to read
    pub shape: ScanShape,
    /// Byte offset of the first record in the source
    pub byte_offset: u64,
}

impl LoadOptions {
    /// Creates options reading `shape` from the start of the source
    pub fn new(shape: impl Into<ScanShape>) -> Self {
        Self {
            shape: shape.into(),
            ..Default::default()
        }
    }

    /// Sets the scan shape
    pub fn with_shape(mut self, shape: impl Into<ScanShape>) -> Self {
        self.shape = shape.into();
        self
    }

    /// Skips `offset` bytes before the first record, e.g. a stream prefix
    pub fn with_byte_offset(mut self, offset: u64) -> Self {
        self.byte_offset = offset;
        self
    }
}
