//! MIB header decoding.
//!
//! Every frame in a MIB source starts with an ASCII, comma-separated header.
//! Only the first one is read; the rest are assumed identical and skipped
//! when frames are mapped.

use crate::error::{MibError, Result};
use crate::traits::ByteSource;
use crate::types::{
    DetectorGeometry, Encoding, HeaderKind, PixelType, QUAD_HEADER_SIZE, SINGLE_HEADER_SIZE,
};
use tracing::debug;

const FIELD_HEADER_SIZE: usize = 2;
const FIELD_WIDTH: usize = 4;
const FIELD_HEIGHT: usize = 5;
const FIELD_ENCODING: usize = 6;
const FIELD_GEOMETRY: usize = 7;
const MIN_FIELDS: usize = FIELD_GEOMETRY + 1;

/// Frame layout described by a MIB header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatDescriptor {
    pub frame_width: usize,
    pub frame_height: usize,
    pub header_kind: HeaderKind,
    pub geometry: DetectorGeometry,
    pub encoding: Encoding,
}

impl FormatDescriptor {
    pub fn from_fields(fields: &[&str]) -> Result<Self> {
        if fields.len() < MIN_FIELDS {
            return Err(MibError::format(format!(
                "expected at least {MIN_FIELDS} fields, found {}",
                fields.len()
            )));
        }

        Ok(Self {
            frame_width: parse_dimension(fields[FIELD_WIDTH], "width")?,
            frame_height: parse_dimension(fields[FIELD_HEIGHT], "height")?,
            header_kind: HeaderKind::from_sentinel(fields[FIELD_HEADER_SIZE])?,
            geometry: DetectorGeometry::from_field(fields[FIELD_GEOMETRY]),
            encoding: Encoding::from_code(fields[FIELD_ENCODING].trim())?,
        })
    }

    #[inline]
    pub const fn header_byte_size(&self) -> usize {
        self.header_kind.byte_size()
    }

    #[inline]
    pub const fn is_quad(&self) -> bool {
        matches!(self.header_kind, HeaderKind::Quad)
    }

    #[inline]
    pub const fn is_raw(&self) -> bool {
        self.encoding.is_raw()
    }

    #[inline]
    pub const fn pixel_type(&self) -> Option<PixelType> {
        self.encoding.pixel_type()
    }

    /// Dynamic range label of the pixel encoding, `None` for raw data.
    pub fn dyn_range(&self) -> Option<&'static str> {
        self.pixel_type().map(|p| p.dyn_range())
    }

    /// Bytes of pixel data in one frame. Raw payloads have no known size.
    pub fn frame_bytes(&self) -> Result<usize> {
        let pixel = self.pixel_type().ok_or(MibError::UnsupportedEncoding)?;
        self.frame_width
            .checked_mul(self.frame_height)
            .and_then(|n| n.checked_mul(pixel.byte_width()))
            .ok_or_else(|| MibError::format("frame size overflows usize"))
    }

    /// Bytes of one `[header, pixels]` record.
    pub fn record_size(&self) -> Result<usize> {
        self.frame_bytes()?
            .checked_add(self.header_byte_size())
            .ok_or_else(|| MibError::format("record size overflows usize"))
    }
}

impl std::fmt::Display for FormatDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_quad() {
            writeln!(f, "\tData is quad")?;
            writeln!(f, "\tDetector geometry: {}", self.geometry)?;
        } else {
            writeln!(f, "\tData is single")?;
        }
        writeln!(
            f,
            "\tData pixel size: ({}, {})",
            self.frame_width, self.frame_height
        )?;
        match self.encoding {
            Encoding::Raw => writeln!(f, "\tData is RAW")?,
            Encoding::Processed(pixel) => {
                writeln!(f, "\tData is processed")?;
                writeln!(f, "\tPixel type: {pixel}")?;
                writeln!(f, "\tDynamic range: {}", pixel.dyn_range())?;
            }
        }
        write!(f, "\tHeader size: {} bytes", self.header_byte_size())
    }
}

fn parse_dimension(field: &str, what: &str) -> Result<usize> {
    let value: usize = field
        .trim()
        .parse()
        .map_err(|_| MibError::format(format!("frame {what} '{field}' is not an integer")))?;
    if value == 0 {
        return Err(MibError::format(format!("frame {what} is zero")));
    }
    Ok(value)
}

/// Splits a header block into its comma-separated fields.
pub fn split_fields(bytes: &[u8]) -> Result<Vec<&str>> {
    if !bytes.is_ascii() {
        return Err(MibError::format("header is not ASCII text"));
    }
    let text = std::str::from_utf8(bytes).map_err(|e| MibError::format(e.to_string()))?;
    Ok(text.split(',').collect())
}

pub fn parse_header(bytes: &[u8]) -> Result<FormatDescriptor> {
    FormatDescriptor::from_fields(&split_fields(bytes)?)
}

/// Reads and decodes the header at the start of `source`.
///
/// A single header is read first. When its size sentinel announces a quad
/// acquisition, the first 768 bytes of the same source are read again and the
/// full quad header replaces the partial one. A source shorter than the header
/// block is decoded from whatever it holds; whether it can carry a whole record
/// is left to [`FrameLayout::plan`](crate::FrameLayout::plan).
pub fn read_descriptor<S: ByteSource + ?Sized>(source: &mut S) -> Result<FormatDescriptor> {
    let mut head = [0u8; QUAD_HEADER_SIZE];

    let n = source.read_full(0, &mut head[..SINGLE_HEADER_SIZE])?;
    let descriptor = parse_header(&head[..n])?;
    if !descriptor.is_quad() {
        debug!(?descriptor, "Parsed single MIB header");
        return Ok(descriptor);
    }

    debug!("Quad header announced, re-reading {QUAD_HEADER_SIZE} bytes");
    let n = source.read_full(0, &mut head)?;
    let descriptor = parse_header(&head[..n])?;
    if !descriptor.is_quad() {
        return Err(MibError::format("quad header re-read lost its size sentinel"));
    }
    debug!(?descriptor, "Parsed quad MIB header");
    Ok(descriptor)
}
