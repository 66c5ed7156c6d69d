use tracing::{debug, trace, warn};

use crate::codec::Decoded;
use crate::error::{Error, Result, Warning};
use crate::options::{ReadOptions, UnknownChunkPolicy};
use crate::registry::{ChunkDef, Registry};
use crate::stream::{ChunkHeader, ChunkRead, HEADER_SIZE};
use crate::tree::{ChunkNode, ChunkTree, Payload};

/// Read path: turns a chunk stream into a [`ChunkTree`].
///
/// Containment comes from the stream's container flag alone; the registry is
/// consulted only for leaf chunks. Structural failures (truncation, nesting
/// beyond `max_depth`) abort the whole build and no partial tree escapes.
/// Semantic anomalies become [`Warning`]s and the build carries on.
pub struct TreeBuilder<'r> {
    registry: &'r Registry,
    options: ReadOptions,
    warnings: Vec<Warning>,
}

impl<'r> TreeBuilder<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            options: ReadOptions::default(),
            warnings: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: ReadOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Warnings from the most recent [`build`](Self::build), in file order.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    /// Read every chunk remaining at the reader's current scope.
    pub fn build<R: ChunkRead>(&mut self, reader: &mut R) -> Result<ChunkTree> {
        self.warnings.clear();
        debug!(
            unknown_chunks = ?self.options.unknown_chunks,
            max_depth = self.options.max_depth,
            strict_sizes = self.options.strict_sizes,
            "building chunk tree"
        );
        let chunks = self.build_scope(reader, 0)?;
        debug!(
            chunks = chunks.len(),
            warnings = self.warnings.len(),
            "built chunk tree"
        );
        Ok(ChunkTree::new(chunks))
    }

    fn build_scope<R: ChunkRead>(&mut self, reader: &mut R, depth: usize) -> Result<Vec<ChunkNode>> {
        let mut nodes = Vec::new();
        while reader.open_chunk()? {
            let offset = reader.position() - HEADER_SIZE;
            let header = reader.header().ok_or(Error::UnexpectedEof {
                offset,
                need: HEADER_SIZE,
                have: 0,
            })?;
            trace!(
                id = %header.id,
                offset,
                length = header.length,
                container = header.container,
                depth,
                "chunk"
            );
            if depth >= self.options.max_depth {
                return Err(Error::NestingTooDeep {
                    id: header.id,
                    offset,
                    max: self.options.max_depth,
                });
            }

            let (payload, trailing) = if header.container {
                (Payload::Children(self.build_scope(reader, depth + 1)?), Vec::new())
            } else {
                self.build_leaf(reader, header, offset)?
            };
            reader.close_chunk()?;

            nodes.push(ChunkNode {
                id: header.id,
                declared_length: header.length,
                payload,
                trailing,
            });
        }
        Ok(nodes)
    }

    /// Decode one leaf body into its payload plus any bytes the codec left
    /// unconsumed.
    fn build_leaf<R: ChunkRead>(
        &mut self,
        reader: &mut R,
        header: ChunkHeader,
        offset: usize,
    ) -> Result<(Payload, Vec<u8>)> {
        let registry = self.registry;
        let Some(def) = registry.lookup(header.id) else {
            return Ok((self.unknown_leaf(reader, header, offset)?, Vec::new()));
        };

        let mut body = read_body(reader, header, offset)?;
        let payload = match def.codec.decode(&body)? {
            Decoded::Value { payload, consumed } => {
                if consumed != body.len() {
                    self.size_mismatch(def, offset, body.len())?;
                }
                return Ok((payload, body.split_off(consumed)));
            }
            Decoded::TooShort => {
                self.size_mismatch(def, offset, body.len())?;
                Payload::Raw(body)
            }
            Decoded::NotALeaf => {
                if !body.is_empty() {
                    self.warn(Warning::UnexpectedLeaf {
                        id: header.id,
                        name: def.name,
                        offset,
                        length: header.length,
                    });
                }
                Payload::Raw(body)
            }
        };
        Ok((payload, Vec::new()))
    }

    fn unknown_leaf<R: ChunkRead>(
        &mut self,
        reader: &mut R,
        header: ChunkHeader,
        offset: usize,
    ) -> Result<Payload> {
        let preserved = self.options.unknown_chunks == UnknownChunkPolicy::Preserve;
        self.warn(Warning::UnknownChunkType {
            id: header.id,
            offset,
            length: header.length,
            preserved,
        });
        if preserved {
            Ok(Payload::Raw(read_body(reader, header, offset)?))
        } else {
            Ok(Payload::Empty)
        }
    }

    fn size_mismatch(&mut self, def: &ChunkDef, offset: usize, actual: usize) -> Result<()> {
        let Some(expected) = def.codec.expected_size() else {
            return Ok(());
        };
        if self.options.strict_sizes {
            return Err(Error::SizeMismatch {
                id: def.id,
                name: def.name,
                offset,
                expected,
                actual,
            });
        }
        self.warn(Warning::SizeMismatch {
            id: def.id,
            name: def.name,
            offset,
            expected,
            actual,
        });
        Ok(())
    }

    fn warn(&mut self, warning: Warning) {
        warn!(id = %warning.id(), offset = warning.offset(), "{warning}");
        self.warnings.push(warning);
    }
}

/// Read a leaf's whole body. A short read means the source ended early.
fn read_body<R: ChunkRead>(reader: &mut R, header: ChunkHeader, offset: usize) -> Result<Vec<u8>> {
    let mut body = vec![0u8; header.length as usize];
    let got = reader.read(&mut body);
    if got < body.len() {
        return Err(Error::TruncatedChunk {
            id: header.id,
            offset,
            declared: header.length,
            available: got,
        });
    }
    Ok(body)
}
