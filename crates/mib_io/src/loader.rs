//! Loading MIB sources into frame views.
//!
//! A load reads the header through a short-lived [`Reader`](crate::Reader),
//! plans the record layout, and only then maps the file (or borrows the
//! buffer). Every check happens before any view is handed out, so callers get
//! either a complete view or a typed error.

use crate::source::{Backing, Source};
use crate::view::FrameView;
use mib_core::{
    count_records, read_descriptor, ByteSource, FormatDescriptor, FrameLayout, LoadOptions,
    MibError, Result,
};
use std::path::{Path, PathBuf};
use tracing::info;

/// A loaded MIB source. Owns the memory map for file sources and borrows the
/// caller's bytes for buffer sources.
pub struct MibData<'a> {
    layout: FrameLayout,
    backing: Backing<'a>,
    path: Option<PathBuf>,
}

impl MibData<'_> {
    pub fn layout(&self) -> &FrameLayout {
        &self.layout
    }

    pub fn descriptor(&self) -> &FormatDescriptor {
        self.layout.descriptor()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_mapped(&self) -> bool {
        self.backing.is_mapped()
    }

    /// Frames of the source, shaped `shape + (height, width)`.
    pub fn frames(&self) -> Result<FrameView<'_>> {
        let bytes = self.backing.as_bytes();
        let start = self.layout.data_start() as usize;
        let end = start + self.layout.data_len();
        let pixels = bytes.get(start..end).ok_or(MibError::SourceTooShort {
            size: bytes.len() as u64,
            record_size: self.layout.record_size() as u64,
        })?;
        FrameView::new(&self.layout, pixels)
    }

    pub fn summary(&self) -> LoadSummary {
        LoadSummary {
            path: self.path.clone(),
            descriptor: *self.layout.descriptor(),
            source_size: self.layout.source_size(),
            frames_available: Some(self.layout.frames_available()),
            frames_requested: Some(self.layout.frame_count()),
        }
    }

    /// Releases the memory map now instead of at the end of scope.
    pub fn close(self) {
        drop(self);
    }
}

/// Loads frames from a file path or an in-memory buffer.
pub fn load<'a>(source: impl Into<Source<'a>>, options: &LoadOptions) -> Result<MibData<'a>> {
    let source = source.into();

    let (descriptor, source_size) = {
        let mut reader = source.reader()?;
        (read_descriptor(&mut reader)?, reader.size())
    };

    let layout = FrameLayout::plan(descriptor, source_size, options)?;
    let path = source.path().map(Path::to_path_buf);
    let backing = source.into_backing()?;

    if let Backing::Mapped(mapped) = &backing {
        mapped.prefetch(layout.data_start(), layout.data_len());
    }

    let data = MibData {
        layout,
        backing,
        path,
    };
    let frames = data.frames()?;
    info!(
        shape = ?frames.shape(),
        pixel_type = %frames.pixel_type(),
        mapped = data.is_mapped(),
        "Loaded MIB frames"
    );
    drop(frames);

    Ok(data)
}

/// Memory maps `path`; the returned data owns the mapping.
pub fn load_file(path: impl AsRef<Path>, options: &LoadOptions) -> Result<MibData<'static>> {
    load(path.as_ref(), options)
}

/// Views `bytes` in place; nothing is copied.
pub fn load_buffer<'a>(bytes: &'a [u8], options: &LoadOptions) -> Result<MibData<'a>> {
    load(bytes, options)
}

/// Describes a source without mapping it. Works for raw sources too.
pub fn inspect<'a>(source: impl Into<Source<'a>>, byte_offset: u64) -> Result<LoadSummary> {
    let source = source.into();
    let mut reader = source.reader()?;
    let descriptor = read_descriptor(&mut reader)?;
    let source_size = reader.size();

    let frames_available = descriptor
        .record_size()
        .ok()
        .map(|record| count_records(source_size, byte_offset, record));

    Ok(LoadSummary {
        path: source.path().map(Path::to_path_buf),
        descriptor,
        source_size,
        frames_available,
        frames_requested: None,
    })
}

/// Human-readable description of a MIB source and what a load reads from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadSummary {
    pub path: Option<PathBuf>,
    pub descriptor: FormatDescriptor,
    pub source_size: u64,
    /// `None` when the encoding gives no record size.
    pub frames_available: Option<usize>,
    pub frames_requested: Option<usize>,
}

impl std::fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => writeln!(f, "Path: {}", path.display())?,
            None => writeln!(f, "Data is from a buffer")?,
        }
        writeln!(f, "{}", self.descriptor)?;
        match self.frames_available {
            Some(n) => write!(f, "\tNumber of frames in the file/buffer: {n}")?,
            None => write!(f, "\tNumber of frames in the file/buffer: unknown")?,
        }
        if let Some(n) = self.frames_requested {
            write!(f, "\n\tNumber of frames to be read: {n}")?;
        }
        Ok(())
    }
}
