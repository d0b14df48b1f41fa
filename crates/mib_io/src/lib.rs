//! Zero-copy loading of Merlin MIB frames from files and buffers.
//!
//! ```ignore
//! use mib_core::{LoadOptions, ScanShape};
//!
//! let mib = mib_io::load_file("scan.mib", &LoadOptions::new(ScanShape::Grid(256, 256)))?;
//! let frames = mib.frames()?;
//! assert_eq!(frames.shape(), &[256, 256, 256, 256]);
//! ```

mod loader;
mod mapped;
mod pixels;
mod reader;
mod source;
mod view;

pub use loader::{inspect, load, load_buffer, load_file, LoadSummary, MibData};
pub use mapped::MappedFile;
pub use pixels::{Pixel, U16Be, U32Be};
pub use reader::{BufferReader, FileReader, Reader};
pub use source::{Backing, Source};
pub use view::FrameView;
