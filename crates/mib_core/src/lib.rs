//! Header parsing and record layout for Quantum Detectors Merlin MIB files.
//!
//! This crate is I/O free: it decodes header bytes handed to it through
//! [`ByteSource`] and computes where the pixels of each frame live. Mapping
//! those bytes into arrays is done by `mib_io`.

mod error;
pub mod header;
pub mod layout;
mod options;
mod shape;
mod traits;
mod types;

pub use error::{MibError, Result};
pub use header::{read_descriptor, FormatDescriptor};
pub use layout::{count_records, FrameLayout};
pub use options::LoadOptions;
pub use shape::ScanShape;
pub use traits::ByteSource;
pub use types::{
    DetectorGeometry, Encoding, HeaderKind, PixelType, QUAD_HEADER_SIZE, SINGLE_HEADER_SIZE,
};
