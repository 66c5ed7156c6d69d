//! Chunk-scoped stream contract shared by the read and write paths.
//!
//! Every chunk on disk is an 8-byte little-endian header followed by its body:
//!
//! ```text
//! +--------------+-----------------------------------+----------------+
//! | type: u32    | size_and_flag: u32                | body ...       |
//! |              | bit 31 = container, 0..30 = size  | (size bytes)   |
//! +--------------+-----------------------------------+----------------+
//! ```
//!
//! A container's body is the concatenation of its children's full encodings.

use crate::chunk_id::ChunkId;
use crate::error::Result;

/// Size of a chunk header in bytes.
pub const HEADER_SIZE: usize = 8;

/// Most significant bit of `size_and_flag`: body holds nested chunks.
pub const CONTAINER_FLAG: u32 = 0x8000_0000;

/// Largest body length the 31-bit size field can carry.
pub const MAX_CHUNK_LENGTH: u32 = !CONTAINER_FLAG;

/// Decoded chunk header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub id: ChunkId,
    /// Body length in bytes, not counting the header.
    pub length: u32,
    pub container: bool,
}

impl ChunkHeader {
    /// Split a raw `size_and_flag` word into length and container flag.
    pub fn from_raw(id: ChunkId, size_and_flag: u32) -> Self {
        Self {
            id,
            length: size_and_flag & MAX_CHUNK_LENGTH,
            container: size_and_flag & CONTAINER_FLAG != 0,
        }
    }

    /// The `size_and_flag` word as stored on disk.
    pub fn to_raw_size(&self) -> u32 {
        let flag = if self.container { CONTAINER_FLAG } else { 0 };
        (self.length & MAX_CHUNK_LENGTH) | flag
    }
}

/// Cursor-style reader that walks nested chunk scopes.
pub trait ChunkRead {
    /// Enter the next chunk at the current scope.
    ///
    /// Returns `Ok(false)` when the scope holds no more siblings.
    fn open_chunk(&mut self) -> Result<bool>;

    /// Leave the current chunk, skipping whatever part of its body was not read.
    fn close_chunk(&mut self) -> Result<()>;

    /// Header of the innermost open chunk.
    fn header(&self) -> Option<ChunkHeader>;

    /// Read into `buf`, bounded to the current chunk's remaining body.
    ///
    /// Returns the number of bytes copied; fewer than `buf.len()` means the
    /// chunk (or the underlying source) ran out.
    fn read(&mut self, buf: &mut [u8]) -> usize;

    /// Absolute byte position, for diagnostics.
    fn position(&self) -> usize;

    fn current_id(&self) -> Option<ChunkId> {
        self.header().map(|h| h.id)
    }

    fn current_length(&self) -> u32 {
        self.header().map_or(0, |h| h.length)
    }

    fn is_container(&self) -> bool {
        self.header().is_some_and(|h| h.container)
    }
}

/// Writer that brackets chunk bodies and fixes up their length headers.
pub trait ChunkWrite {
    /// Start a chunk. Its length is filled in by the matching [`end_chunk`].
    ///
    /// [`end_chunk`]: ChunkWrite::end_chunk
    fn begin_chunk(&mut self, id: ChunkId, container: bool) -> Result<()>;

    /// Finish the innermost chunk, recording the number of body bytes written.
    fn end_chunk(&mut self) -> Result<()>;

    /// Append body bytes to the innermost leaf chunk.
    fn write(&mut self, buf: &[u8]) -> Result<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn container_flag_round_trips() {
        let header = ChunkHeader::from_raw(ChunkId::MESH, 0x8000_0010);
        assert!(header.container);
        assert_eq!(header.length, 0x10);
        assert_eq!(header.to_raw_size(), 0x8000_0010);
    }

    #[test]
    fn leaf_header_has_no_flag() {
        let header = ChunkHeader::from_raw(ChunkId::VERTICES, 36);
        assert!(!header.container);
        assert_eq!(header.to_raw_size(), 36);
    }

    #[test]
    fn max_length_uses_31_bits() {
        assert_eq!(MAX_CHUNK_LENGTH, 0x7FFF_FFFF);
        let header = ChunkHeader::from_raw(ChunkId::MESH, u32::MAX);
        assert_eq!(header.length, MAX_CHUNK_LENGTH);
        assert!(header.container);
    }
}
