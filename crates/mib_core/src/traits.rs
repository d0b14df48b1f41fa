//! The read interface shared by every MIB byte source.
//!
//! Header parsing only needs positioned reads and the total length, so file
//! and in-memory sources both implement this one trait and the parser never
//! inspects which kind it was given.

use crate::error::Result;

/// A random-access source of MIB bytes, typically a file or a borrowed buffer.
///
/// # Example
///
/// ```ignore
/// struct Stream { /* ... */ }
///
/// impl ByteSource for Stream {
///     fn read_chunk(&mut self, offset: u64, buffer: &mut [u8]) -> Result<usize> {
///         // Copy up to buffer.len() bytes starting at offset
///     }
///
///     fn size(&self) -> u64 {
///         // Total length in bytes
///     }
/// }
/// ```
pub trait ByteSource {
    /// Reads a chunk of data from the source at the specified offset.
    ///
    /// Returns the number of bytes actually read, which may be less than
    /// `buffer.len()` if the end of the source is reached.
    fn read_chunk(&mut self, offset: u64, buffer: &mut [u8]) -> Result<usize>;

    /// Returns the total size of the source in bytes.
    fn size(&self) -> u64;

    /// Fills `buffer` from `offset`, looping over short reads.
    ///
    /// Returns how many bytes were filled; anything below `buffer.len()` means
    /// the source ended first.
    fn read_full(&mut self, offset: u64, buffer: &mut [u8]) -> Result<usize> {
        let mut filled = 0;
        while filled < buffer.len() {
            let n = self.read_chunk(offset + filled as u64, &mut buffer[filled..])?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        Ok(filled)
    }
}
