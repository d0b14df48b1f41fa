use memmap2::Mmap;
use mib_core::{MibError, Result};
use std::fs::File;
use std::io::{self, Seek, SeekFrom};
use std::path::Path;

/// Read-only memory map of a whole MIB file.
///
/// The file handle is closed once the mapping exists; dropping the
/// `MappedFile` unmaps it.
pub struct MappedFile {
    mmap: Mmap,
}

impl MappedFile {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut file = File::open(path.as_ref())?;
        let size = file.seek(SeekFrom::End(0))?;

        if size == 0 {
            return Err(MibError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "cannot map an empty file",
            )));
        }

        // The mapping is read-only; the file must not be truncated while it is alive.
        let mmap = unsafe { Mmap::map(&file) }?;

        #[cfg(target_os = "linux")]
        {
            if let Err(e) = mmap.advise(memmap2::Advice::Sequential) {
                tracing::warn!("madvise(SEQUENTIAL) failed: {e}");
            }
        }

        Ok(Self { mmap })
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.mmap
    }

    #[cfg(target_os = "linux")]
    pub fn prefetch(&self, offset: u64, len: usize) {
        let start = offset as usize;
        if start >= self.mmap.len() {
            return;
        }
        let end = start.saturating_add(len).min(self.mmap.len());
        if let Err(e) = self
            .mmap
            .advise_range(memmap2::Advice::WillNeed, start, end - start)
        {
            tracing::warn!("madvise(WILLNEED) failed: {e}");
        }
    }

    #[cfg(not(target_os = "linux"))]
    pub fn prefetch(&self, _offset: u64, _len: usize) {}
}
