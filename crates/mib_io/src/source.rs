use crate::mapped::MappedFile;
use crate::reader::{BufferReader, FileReader, Reader};
use mib_core::Result;
use std::path::{Path, PathBuf};

/// Where the MIB bytes come from.
#[derive(Debug, Clone)]
pub enum Source<'a> {
    File(PathBuf),
    Buffer(&'a [u8]),
}

impl<'a> Source<'a> {
    /// Opens a reader for the header. File handles close when it is dropped.
    pub fn reader(&self) -> Result<Reader<'a>> {
        match self {
            Source::File(path) => Ok(Reader::File(FileReader::open(path)?)),
            Source::Buffer(bytes) => Ok(Reader::Buffer(BufferReader::new(*bytes))),
        }
    }

    /// Maps a file or borrows the buffer, without copying either.
    pub fn into_backing(self) -> Result<Backing<'a>> {
        match self {
            Source::File(path) => Ok(Backing::Mapped(MappedFile::open(path)?)),
            Source::Buffer(bytes) => Ok(Backing::Borrowed(bytes)),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Source::File(path) => Some(path),
            Source::Buffer(_) => None,
        }
    }
}

impl From<PathBuf> for Source<'_> {
    fn from(path: PathBuf) -> Self {
        Source::File(path)
    }
}

impl From<&Path> for Source<'_> {
    fn from(path: &Path) -> Self {
        Source::File(path.to_path_buf())
    }
}

impl From<&str> for Source<'_> {
    fn from(path: &str) -> Self {
        Source::File(PathBuf::from(path))
    }
}

impl<'a> From<&'a [u8]> for Source<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Source::Buffer(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for Source<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        Source::Buffer(bytes.as_slice())
    }
}

/// Bytes backing a loaded view: an owned memory map or a borrowed buffer.
pub enum Backing<'a> {
    Mapped(MappedFile),
    Borrowed(&'a [u8]),
}

impl Backing<'_> {
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Backing::Mapped(m) => m.as_bytes(),
            Backing::Borrowed(b) => b,
        }
    }

    #[inline]
    pub fn is_mapped(&self) -> bool {
        matches!(self, Backing::Mapped(_))
    }
}
