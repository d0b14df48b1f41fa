//! Pixel element types that can be viewed in place.
//!
//! MIB stores 16 and 32-bit counters big-endian with no alignment guarantee
//! (a stream prefix can shift every record by an odd number of bytes). The
//! newtypes below wrap the raw bytes, have alignment 1 and decode on access,
//! so frames are never copied just to be read.

use bytemuck::{Pod, Zeroable};
use mib_core::PixelType;

pub trait Pixel: Pod + std::fmt::Debug {
    const PIXEL_TYPE: PixelType;

    fn to_u32(self) -> u32;
}

impl Pixel for u8 {
    const PIXEL_TYPE: PixelType = PixelType::U8;

    #[inline]
    fn to_u32(self) -> u32 {
        u32::from(self)
    }
}

#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct U16Be([u8; 2]);

impl U16Be {
    #[inline]
    pub const fn new(value: u16) -> Self {
        Self(value.to_be_bytes())
    }

    #[inline]
    pub const fn get(self) -> u16 {
        u16::from_be_bytes(self.0)
    }
}

impl std::fmt::Debug for U16Be {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl Pixel for U16Be {
    const PIXEL_TYPE: PixelType = PixelType::U16Be;

    #[inline]
    fn to_u32(self) -> u32 {
        u32::from(self.get())
    }
}

#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
pub struct U32Be([u8; 4]);

impl U32Be {
    #[inline]
    pub const fn new(value: u32) -> Self {
        Self(value.to_be_bytes())
    }

    #[inline]
    pub const fn get(self) -> u32 {
        u32::from_be_bytes(self.0)
    }
}

impl std::fmt::Debug for U32Be {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl Pixel for U32Be {
    const PIXEL_TYPE: PixelType = PixelType::U32Be;

    #[inline]
    fn to_u32(self) -> u32 {
        self.get()
    }
}
