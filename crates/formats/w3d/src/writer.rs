use crate::chunk_id::ChunkId;
use crate::cursor::Writer;
use crate::error::{Error, Result};
use crate::stream::{ChunkHeader, ChunkWrite, HEADER_SIZE, MAX_CHUNK_LENGTH};

#[derive(Debug)]
struct OpenChunk {
    id: ChunkId,
    container: bool,
    /// Offset of the `size_and_flag` word awaiting its backpatch.
    size_pos: usize,
}

/// [`ChunkWrite`] into an in-memory buffer.
///
/// Each chunk header is written with a zero length on `begin_chunk` and patched
/// with the real body length on `end_chunk`.
#[derive(Debug, Default)]
pub struct ChunkWriter {
    out: Writer,
    open: Vec<OpenChunk>,
}

impl ChunkWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            out: Writer::with_capacity(cap),
            open: Vec::new(),
        }
    }

    /// Bytes written so far, headers included.
    pub fn position(&self) -> usize {
        self.out.position()
    }

    /// Number of chunks begun but not yet ended.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Hand out the finished byte stream. Fails if any chunk is still open.
    pub fn finish(self) -> Result<Vec<u8>> {
        if let Some(chunk) = self.open.last() {
            return Err(Error::WriteFailure {
                message: format!("{} chunk(s) still open, innermost {}", self.open.len(), chunk.id),
            });
        }
        Ok(self.out.into_bytes())
    }
}

impl ChunkWrite for ChunkWriter {
    fn begin_chunk(&mut self, id: ChunkId, container: bool) -> Result<()> {
        if let Some(parent) = self.open.last() {
            if !parent.container {
                return Err(Error::WriteFailure {
                    message: format!("chunk {id} begun inside leaf chunk {}", parent.id),
                });
            }
        }
        self.out.write_u32(id.0);
        let size_pos = self.out.position();
        self.out.write_u32(0);
        self.open.push(OpenChunk {
            id,
            container,
            size_pos,
        });
        Ok(())
    }

    fn end_chunk(&mut self) -> Result<()> {
        let chunk = self.open.pop().ok_or_else(|| Error::WriteFailure {
            message: "end_chunk without a matching begin_chunk".to_string(),
        })?;
        let body_start = chunk.size_pos + (HEADER_SIZE - 4);
        let length = self.out.position() - body_start;
        if length > MAX_CHUNK_LENGTH as usize {
            return Err(Error::LengthOverflow {
                id: chunk.id,
                length,
            });
        }
        let header = ChunkHeader {
            id: chunk.id,
            length: length as u32,
            container: chunk.container,
        };
        if !self.out.patch_u32(chunk.size_pos, header.to_raw_size()) {
            return Err(Error::WriteFailure {
                message: format!("cannot patch length of chunk {}", chunk.id),
            });
        }
        Ok(())
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        match self.open.last() {
            Some(chunk) if chunk.container => Err(Error::WriteFailure {
                message: format!("raw bytes written into container chunk {}", chunk.id),
            }),
            Some(_) => {
                self.out.write_bytes(buf);
                Ok(buf.len())
            }
            None => Err(Error::WriteFailure {
                message: "raw bytes written outside any chunk".to_string(),
            }),
        }
    }
}
