use crate::chunk_id::ChunkId;
use crate::cursor::Cursor;
use crate::error::{Error, Result};
use crate::stream::{ChunkHeader, ChunkRead, HEADER_SIZE};

/// An open chunk scope.
#[derive(Debug, Clone, Copy)]
struct Scope {
    header: ChunkHeader,
    /// Absolute offset one past the last body byte.
    end: usize,
}

/// [`ChunkRead`] over an in-memory W3D file.
///
/// This is Layer 1: it only knows about headers and scope boundaries and never
/// interprets a body. Every header is checked against the enclosing scope when
/// it is opened, so a successful `open_chunk` guarantees the whole body is
/// present.
pub struct ChunkReader<'a> {
    cursor: Cursor<'a>,
    scopes: Vec<Scope>,
}

impl<'a> ChunkReader<'a> {
    /// The `data` slice must be the entire file contents.
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            cursor: Cursor::new(data),
            scopes: Vec::new(),
        }
    }

    /// Number of chunks currently open.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Bytes left in the innermost open chunk (or the file, at the outermost scope).
    pub fn remaining_in_scope(&self) -> usize {
        self.scope_end().saturating_sub(self.cursor.position())
    }

    fn scope_end(&self) -> usize {
        self.scopes
            .last()
            .map_or(self.cursor.len(), |scope| scope.end)
    }
}

impl ChunkRead for ChunkReader<'_> {
    fn open_chunk(&mut self) -> Result<bool> {
        let offset = self.cursor.position();
        let available = self.remaining_in_scope();
        if available == 0 {
            return Ok(false);
        }
        if available < HEADER_SIZE {
            return Err(Error::IncompleteHeader {
                offset,
                have: available,
            });
        }

        let id = ChunkId(self.cursor.read_u32()?);
        let header = ChunkHeader::from_raw(id, self.cursor.read_u32()?);
        let body = available - HEADER_SIZE;
        if header.length as usize > body {
            return Err(Error::TruncatedChunk {
                id,
                offset,
                declared: header.length,
                available: body,
            });
        }

        self.scopes.push(Scope {
            header,
            end: offset + HEADER_SIZE + header.length as usize,
        });
        Ok(true)
    }

    fn close_chunk(&mut self) -> Result<()> {
        let scope = self.scopes.pop().ok_or_else(|| Error::UnexpectedEof {
            offset: self.cursor.position(),
            need: HEADER_SIZE,
            have: 0,
        })?;
        self.cursor.seek(scope.end);
        Ok(())
    }

    fn header(&self) -> Option<ChunkHeader> {
        self.scopes.last().map(|scope| scope.header)
    }

    fn read(&mut self, buf: &mut [u8]) -> usize {
        let n = buf.len().min(self.remaining_in_scope());
        match self.cursor.read_bytes(n) {
            Ok(bytes) => {
                buf[..n].copy_from_slice(bytes);
                n
            }
            Err(_) => 0,
        }
    }

    fn position(&self) -> usize {
        self.cursor.position()
    }
}
