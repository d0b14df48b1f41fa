use crate::pixels::{Pixel, U16Be, U32Be};
use mib_core::{FrameLayout, MibError, PixelType, Result};
use ndarray::{Array2, ArrayD, ArrayViewD, Axis, Ix2, IxDyn, ShapeBuilder};

/// Zero-copy view of the frames of a MIB source.
///
/// Shape is the scan shape followed by `(height, width)`. Per-frame headers
/// are skipped through the outer strides.
#[derive(Debug, Clone)]
pub enum FrameView<'a> {
    U8(ArrayViewD<'a, u8>),
    U16(ArrayViewD<'a, U16Be>),
    U32(ArrayViewD<'a, U32Be>),
}

impl<'a> FrameView<'a> {
    /// Views `bytes`, which start at the first pixel of the first frame.
    pub fn new(layout: &FrameLayout, bytes: &'a [u8]) -> Result<Self> {
        let shape = layout.array_shape();
        let strides = layout.array_strides();
        Ok(match layout.pixel_type() {
            PixelType::U8 => Self::U8(typed_view(bytes, &shape, &strides)?),
            PixelType::U16Be => Self::U16(typed_view(bytes, &shape, &strides)?),
            PixelType::U32Be => Self::U32(typed_view(bytes, &shape, &strides)?),
        })
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Self::U8(v) => v.shape(),
            Self::U16(v) => v.shape(),
            Self::U32(v) => v.shape(),
        }
    }

    pub fn pixel_type(&self) -> PixelType {
        match self {
            Self::U8(_) => PixelType::U8,
            Self::U16(_) => PixelType::U16Be,
            Self::U32(_) => PixelType::U32Be,
        }
    }

    /// Number of frames, i.e. the product of the scan axes.
    pub fn frame_count(&self) -> usize {
        let shape = self.shape();
        shape[..shape.len() - 2].iter().product()
    }

    /// Decoded pixel at a full index (scan axes, row, column).
    pub fn get(&self, index: &[usize]) -> Option<u32> {
        match self {
            Self::U8(v) => v.get(index).map(|p| p.to_u32()),
            Self::U16(v) => v.get(index).map(|p| p.to_u32()),
            Self::U32(v) => v.get(index).map(|p| p.to_u32()),
        }
    }

    /// Decoded copy of the frame at a flat, row-major frame index.
    pub fn frame(&self, index: usize) -> Option<Array2<u32>> {
        match self {
            Self::U8(v) => decode_frame(v, index),
            Self::U16(v) => decode_frame(v, index),
            Self::U32(v) => decode_frame(v, index),
        }
    }

    /// Decoded copy of the whole view in native-endian `u32`.
    pub fn to_u32(&self) -> ArrayD<u32> {
        match self {
            Self::U8(v) => v.mapv(Pixel::to_u32),
            Self::U16(v) => v.mapv(Pixel::to_u32),
            Self::U32(v) => v.mapv(Pixel::to_u32),
        }
    }
}

fn typed_view<'a, P: Pixel>(
    bytes: &'a [u8],
    shape: &[usize],
    strides: &[usize],
) -> Result<ArrayViewD<'a, P>> {
    let pixels: &[P] = bytemuck::try_cast_slice(bytes)
        .map_err(|e| MibError::Format(format!("pixel data does not divide into pixels: {e:?}")))?;
    ArrayViewD::from_shape(IxDyn(shape).strides(IxDyn(strides)), pixels)
        .map_err(|e| MibError::Format(format!("frame layout does not fit the data: {e}")))
}

fn decode_frame<P: Pixel>(view: &ArrayViewD<'_, P>, index: usize) -> Option<Array2<u32>> {
    let scan_ndim = view.ndim() - 2;
    let scan = &view.shape()[..scan_ndim];
    if index >= scan.iter().product::<usize>() {
        return None;
    }

    let mut coords = vec![0; scan_ndim];
    let mut rest = index;
    for (coord, &len) in coords.iter_mut().zip(scan).rev() {
        *coord = rest % len;
        rest /= len;
    }

    let mut frame = view.view();
    for coord in coords {
        frame = frame.index_axis_move(Axis(0), coord);
    }
    frame
        .into_dimensionality::<Ix2>()
        .ok()
        .map(|f| f.mapv(Pixel::to_u32))
}
