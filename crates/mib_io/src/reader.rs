//! Header readers for file and in-memory MIB sources.

use mib_core::{ByteSource, Result};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

/// A read-only byte source over a MIB file on disk.
///
/// Only used for the header read; the handle is closed when the reader is
/// dropped, before the file is mapped.
pub struct FileReader {
    file: File,
    size: u64,
}

impl FileReader {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut file = OpenOptions::new()
            .read(true)
            .write(false)
            .open(path.as_ref())?;
        let size = file.seek(SeekFrom::End(0))?;
        file.seek(SeekFrom::Start(0))?;

        Ok(Self { file, size })
    }
}

impl ByteSource for FileReader {
    fn read_chunk(&mut self, offset: u64, buffer: &mut [u8]) -> Result<usize> {
        self.file.seek(SeekFrom::Start(offset))?;
        Ok(self.file.read(buffer)?)
    }

    #[inline]
    fn size(&self) -> u64 {
        self.size
    }
}

/// A byte source over a caller-owned buffer.
pub struct BufferReader<'a> {
    data: &'a [u8],
}

impl<'a> BufferReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }
}

impl ByteSource for BufferReader<'_> {
    fn read_chunk(&mut self, offset: u64, buffer: &mut [u8]) -> Result<usize> {
        let start = offset.min(self.data.len() as u64) as usize;
        let end = start.saturating_add(buffer.len()).min(self.data.len());
        let len = end - start;
        buffer[..len].copy_from_slice(&self.data[start..end]);
        Ok(len)
    }

    #[inline]
    fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

pub enum Reader<'a> {
    File(FileReader),
    Buffer(BufferReader<'a>),
}

impl ByteSource for Reader<'_> {
    fn read_chunk(&mut self, offset: u64, buffer: &mut [u8]) -> Result<usize> {
        match self {
            Reader::File(r) => r.read_chunk(offset, buffer),
            Reader::Buffer(r) => r.read_chunk(offset, buffer),
        }
    }

    #[inline]
    fn size(&self) -> u64 {
        match self {
            Reader::File(r) => r.size(),
            Reader::Buffer(r) => r.size(),
        }
    }
}
