use tracing::{debug, trace};

use crate::cursor::Writer;
use crate::error::{Error, Result};
use crate::registry::Registry;
use crate::stream::ChunkWrite;
use crate::tree::{ChunkNode, ChunkTree, Payload};
use crate::writer::ChunkWriter;

/// Write path: emits a [`ChunkTree`] depth-first, pre-order.
///
/// Lengths stored on the nodes are ignored; every header gets the number of
/// body bytes actually written. Any failure aborts the whole serialization.
pub struct TreeSerializer<'r> {
    registry: &'r Registry,
}

impl<'r> TreeSerializer<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub fn serialize<W: ChunkWrite>(&self, tree: &ChunkTree, out: &mut W) -> Result<()> {
        for node in tree {
            self.write_node(node, out)?;
        }
        debug!(chunks = tree.len(), "serialized chunk tree");
        Ok(())
    }

    /// Serialize into a fresh buffer.
    pub fn to_bytes(&self, tree: &ChunkTree) -> Result<Vec<u8>> {
        let mut out = ChunkWriter::with_capacity(tree.encoded_len());
        self.serialize(tree, &mut out)?;
        out.finish()
    }

    fn write_node<W: ChunkWrite>(&self, node: &ChunkNode, out: &mut W) -> Result<()> {
        trace!(id = %node.id, shape = %node.payload.shape(), "write chunk");
        match &node.payload {
            Payload::Children(children) => {
                out.begin_chunk(node.id, true)?;
                for child in children {
                    self.write_node(child, out)?;
                }
            }
            Payload::Empty => {
                out.begin_chunk(node.id, false)?;
                write_all(out, node, &node.trailing)?;
            }
            Payload::Raw(bytes) => {
                out.begin_chunk(node.id, false)?;
                write_all(out, node, bytes)?;
                write_all(out, node, &node.trailing)?;
            }
            typed => {
                let def = self
                    .registry
                    .lookup(node.id)
                    .ok_or(Error::UnregisteredChunk { id: node.id })?;
                let mut body = Writer::with_capacity(node.body_len());
                def.codec.encode(node.id, typed, &mut body)?;
                body.write_bytes(&node.trailing);
                out.begin_chunk(node.id, false)?;
                write_all(out, node, body.as_bytes())?;
            }
        }
        out.end_chunk()
    }
}

fn write_all<W: ChunkWrite>(out: &mut W, node: &ChunkNode, bytes: &[u8]) -> Result<()> {
    let written = out.write(bytes)?;
    if written != bytes.len() {
        return Err(Error::ShortWrite {
            id: node.id,
            expected: bytes.len(),
            written,
        });
    }
    Ok(())
}
