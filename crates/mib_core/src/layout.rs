//! Record layout of a MIB source.
//!
//! A source is a run of identical records, each a header block followed by
//! one frame of pixels. `FrameLayout` turns a descriptor, the source length
//! and the caller's options into the numbers needed to view the pixels in
//! place: how many records fit, where the pixel data starts and how far apart
//! consecutive frames are.

use crate::error::{MibError, Result};
use crate::header::FormatDescriptor;
use crate::options::LoadOptions;
use crate::shape::ScanShape;
use crate::types::PixelType;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameLayout {
    descriptor: FormatDescriptor,
    pixel_type: PixelType,
    shape: ScanShape,
    byte_offset: u64,
    source_size: u64,
    record_size: usize,
    frames_available: usize,
}

impl FrameLayout {
    /// Validates `options` against a source of `source_size` bytes.
    ///
    /// Raw encodings are refused before anything else, then an empty source,
    /// then a shape asking for more frames than the source holds.
    pub fn plan(
        descriptor: FormatDescriptor,
        source_size: u64,
        options: &LoadOptions,
    ) -> Result<Self> {
        let pixel_type = descriptor
            .pixel_type()
            .ok_or(MibError::UnsupportedEncoding)?;
        options.shape.validate()?;

        let record_size = descriptor.record_size()?;
        let frames_available = count_records(source_size, options.byte_offset, record_size);
        if frames_available == 0 {
            return Err(MibError::SourceTooShort {
                size: source_size,
                record_size: record_size as u64,
            });
        }

        let requested = options.shape.frame_count();
        if requested > frames_available {
            return Err(MibError::ShapeMismatch {
                requested,
                available: frames_available,
            });
        }

        debug!(
            record_size,
            frames_available,
            requested,
            offset = options.byte_offset,
            "Planned MIB frame layout"
        );

        Ok(Self {
            descriptor,
            pixel_type,
            shape: options.shape,
            byte_offset: options.byte_offset,
            source_size,
            record_size,
            frames_available,
        })
    }

    #[inline]
    pub const fn descriptor(&self) -> &FormatDescriptor {
        &self.descriptor
    }

    #[inline]
    pub const fn pixel_type(&self) -> PixelType {
        self.pixel_type
    }

    #[inline]
    pub const fn shape(&self) -> ScanShape {
        self.shape
    }

    #[inline]
    pub const fn byte_offset(&self) -> u64 {
        self.byte_offset
    }

    #[inline]
    pub const fn source_size(&self) -> u64 {
        self.source_size
    }

    /// Bytes of one `[header, pixels]` record.
    #[inline]
    pub const fn record_size(&self) -> usize {
        self.record_size
    }

    /// Whole records between the byte offset and the end of the source.
    #[inline]
    pub const fn frames_available(&self) -> usize {
        self.frames_available
    }

    /// Number of frames the view will expose.
    #[inline]
    pub const fn frame_count(&self) -> usize {
        self.shape.frame_count()
    }

    /// Shape of the resulting array: scan axes then `(height, width)`.
    pub fn array_shape(&self) -> Vec<usize> {
        let mut dims = self.shape.dims();
        dims.push(self.descriptor.frame_height);
        dims.push(self.descriptor.frame_width);
        dims
    }

    /// Element strides matching `array_shape`, in pixels.
    ///
    /// Header and pixel block sizes are multiples of every pixel width, so the
    /// record stride is always a whole number of pixels.
    pub fn array_strides(&self) -> Vec<usize> {
        let record = self.record_size / self.pixel_type.byte_width();
        let width = self.descriptor.frame_width;
        match self.shape {
            ScanShape::Stack(_) => vec![record, width, 1],
            ScanShape::Grid(_, cols) => vec![cols * record, record, width, 1],
        }
    }

    /// Offset of the first pixel of the first frame.
    #[inline]
    pub fn data_start(&self) -> u64 {
        self.byte_offset + self.descriptor.header_byte_size() as u64
    }

    /// Bytes from `data_start` through the last pixel of the last frame.
    pub fn data_len(&self) -> usize {
        let frame_bytes = self.record_size - self.descriptor.header_byte_size();
        (self.frame_count() - 1) * self.record_size + frame_bytes
    }
}

/// Whole records of `record_size` bytes that fit after `offset`.
pub fn count_records(source_size: u64, offset: u64, record_size: usize) -> usize {
    if record_size == 0 {
        return 0;
    }
    (source_size.saturating_sub(offset) / record_size as u64) as usize
}
