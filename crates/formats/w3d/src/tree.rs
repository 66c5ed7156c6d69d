use crate::chunk_id::ChunkId;
use crate::codec::{ArrayValue, StructValue};
use crate::cursor::Writer;
use crate::error::Result;
use crate::stream::{HEADER_SIZE, MAX_CHUNK_LENGTH};

/// Body of a chunk node. Exactly one shape holds at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Nothing kept (a discarded unknown chunk, or a genuinely empty leaf).
    Empty,
    /// Bytes kept verbatim because no codec understood them.
    Raw(Vec<u8>),
    Struct(StructValue),
    Array(ArrayValue),
    /// Text bytes exactly as stored, without any added terminator.
    Text(Vec<u8>),
    /// Nested chunks, in file order.
    Children(Vec<ChunkNode>),
}

impl Payload {
    /// Short description of the payload's shape, for diagnostics.
    pub fn shape(&self) -> String {
        match self {
            Self::Empty => "empty".to_string(),
            Self::Raw(_) => "raw".to_string(),
            Self::Struct(value) => format!("struct {}", value.kind().name()),
            Self::Array(value) => format!("array of {}", value.kind().name()),
            Self::Text(_) => "text".to_string(),
            Self::Children(_) => "container".to_string(),
        }
    }
}

/// One chunk of a W3D file and everything it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkNode {
    pub id: ChunkId,
    /// Body length from the header this node was read from, or as last
    /// computed by [`ChunkNode::refresh_lengths`]. Never trusted on write.
    pub declared_length: u32,
    pub payload: Payload,
    /// Body bytes past the decoded struct or array elements. Written back
    /// after the payload so newer, longer records survive a rewrite. Ignored
    /// on containers.
    pub trailing: Vec<u8>,
}

impl ChunkNode {
    /// Build a leaf node; `declared_length` is computed from the payload.
    pub fn leaf(id: ChunkId, payload: Payload) -> Self {
        let mut node = Self {
            id,
            declared_length: 0,
            payload,
            trailing: Vec::new(),
        };
        node.declared_length = clamp_length(node.body_len());
        node
    }

    pub fn container(id: ChunkId, children: Vec<ChunkNode>) -> Self {
        Self::leaf(id, Payload::Children(children))
    }

    pub fn structure(id: ChunkId, value: impl Into<StructValue>) -> Self {
        Self::leaf(id, Payload::Struct(value.into()))
    }

    pub fn array(id: ChunkId, value: impl Into<ArrayValue>) -> Self {
        Self::leaf(id, Payload::Array(value.into()))
    }

    pub fn text(id: ChunkId, bytes: impl Into<Vec<u8>>) -> Self {
        Self::leaf(id, Payload::Text(bytes.into()))
    }

    pub fn raw(id: ChunkId, bytes: impl Into<Vec<u8>>) -> Self {
        Self::leaf(id, Payload::Raw(bytes.into()))
    }

    pub fn is_container(&self) -> bool {
        matches!(self.payload, Payload::Children(_))
    }

    /// Child nodes; empty for leaves.
    pub fn children(&self) -> &[ChunkNode] {
        match &self.payload {
            Payload::Children(children) => children,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<ChunkNode>> {
        match &mut self.payload {
            Payload::Children(children) => Some(children),
            _ => None,
        }
    }

    /// Number of body bytes this node encodes to, excluding its own header.
    pub fn body_len(&self) -> usize {
        let payload = match &self.payload {
            Payload::Empty => 0,
            Payload::Raw(bytes) | Payload::Text(bytes) => bytes.len(),
            Payload::Struct(value) => value.kind().size(),
            Payload::Array(value) => value.len() * value.kind().size(),
            Payload::Children(children) => children
                .iter()
                .map(|child| HEADER_SIZE + child.body_len())
                .sum(),
        };
        if self.is_container() {
            payload
        } else {
            payload + self.trailing.len()
        }
    }

    /// Recompute `declared_length` for this node and its whole subtree.
    pub fn refresh_lengths(&mut self) {
        if let Payload::Children(children) = &mut self.payload {
            for child in children.iter_mut() {
                child.refresh_lengths();
            }
        }
        self.declared_length = clamp_length(self.body_len());
    }

    /// Equality on the encoded form: floats compare by bit pattern, so NaN
    /// fields match themselves and `-0.0` differs from `0.0`.
    pub fn is_bit_identical(&self, other: &ChunkNode) -> bool {
        self.id == other.id
            && self.declared_length == other.declared_length
            && self.trailing == other.trailing
            && match (&self.payload, &other.payload) {
                (Payload::Struct(a), Payload::Struct(b)) => {
                    a.kind() == b.kind() && encoded(|w| a.write(w)) == encoded(|w| b.write(w))
                }
                (Payload::Array(a), Payload::Array(b)) => {
                    a.kind() == b.kind() && encoded(|w| a.write(w)) == encoded(|w| b.write(w))
                }
                (Payload::Children(a), Payload::Children(b)) => {
                    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.is_bit_identical(y))
                }
                (a, b) => a == b,
            }
    }

    /// Text payload up to the first NUL, lossily decoded.
    pub fn text_str(&self) -> Option<std::borrow::Cow<'_, str>> {
        match &self.payload {
            Payload::Text(bytes) => {
                let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
                Some(String::from_utf8_lossy(&bytes[..end]))
            }
            _ => None,
        }
    }

    /// First node with the given id in this subtree, depth-first pre-order.
    pub fn find(&self, id: ChunkId) -> Option<&ChunkNode> {
        if self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }
}

/// A whole W3D file: the top-level chunk sequence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkTree {
    pub chunks: Vec<ChunkNode>,
}

impl ChunkTree {
    pub fn new(chunks: Vec<ChunkNode>) -> Self {
        Self { chunks }
    }

    /// Parse a file with the process-wide registry and default options.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = crate::reader::ChunkReader::new(data);
        crate::builder::TreeBuilder::new(crate::registry::registry()).build(&mut reader)
    }

    /// Serialize with the process-wide registry.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        crate::serializer::TreeSerializer::new(crate::registry::registry()).to_bytes(self)
    }

    /// Top-level chunks in file order.
    pub fn iter(&self) -> std::slice::Iter<'_, ChunkNode> {
        self.chunks.iter()
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Every node with its nesting depth (top level is 0), depth-first pre-order.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: self.chunks.iter().rev().map(|node| (0, node)).collect(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    pub fn find(&self, id: ChunkId) -> Option<&ChunkNode> {
        self.chunks.iter().find_map(|node| node.find(id))
    }

    /// Total encoded size of the file.
    pub fn encoded_len(&self) -> usize {
        self.chunks
            .iter()
            .map(|node| HEADER_SIZE + node.body_len())
            .sum()
    }

    pub fn refresh_lengths(&mut self) {
        for node in &mut self.chunks {
            node.refresh_lengths();
        }
    }

    /// See [`ChunkNode::is_bit_identical`].
    pub fn is_bit_identical(&self, other: &ChunkTree) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other)
                .all(|(a, b)| a.is_bit_identical(b))
    }
}

impl<'a> IntoIterator for &'a ChunkTree {
    type Item = &'a ChunkNode;
    type IntoIter = std::slice::Iter<'a, ChunkNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}

/// Saturate a body length to what the 31-bit header field can hold.
fn clamp_length(len: usize) -> u32 {
    u32::try_from(len).map_or(MAX_CHUNK_LENGTH, |len| len.min(MAX_CHUNK_LENGTH))
}

fn encoded(write: impl FnOnce(&mut Writer)) -> Vec<u8> {
    let mut w = Writer::new();
    write(&mut w);
    w.into_bytes()
}

/// Depth-first pre-order iterator returned by [`ChunkTree::walk`].
pub struct Walk<'a> {
    stack: Vec<(usize, &'a ChunkNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a ChunkNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children().iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunks::primitives::Vector3;

    #[test]
    fn oversized_lengths_saturate() {
        assert_eq!(clamp_length(12), 12);
        assert_eq!(clamp_length(MAX_CHUNK_LENGTH as usize), MAX_CHUNK_LENGTH);
        assert_eq!(clamp_length(0x8000_0000), MAX_CHUNK_LENGTH);
        assert_eq!(clamp_length(usize::MAX), MAX_CHUNK_LENGTH);
    }

    #[test]
    fn trailing_bytes_count_toward_body() {
        let mut node = ChunkNode::array(ChunkId::VERTICES, vec![Vector3::default()]);
        node.trailing = vec![0xAA, 0xBB];
        assert_eq!(node.body_len(), 14);
        node.refresh_lengths();
        assert_eq!(node.declared_length, 14);
    }

    #[test]
    fn bit_identity_compares_float_bits() {
        let nan = ChunkNode::array(ChunkId::VERTICES, vec![Vector3::new(f32::NAN, 0.0, 0.0)]);
        assert_ne!(nan, nan.clone());
        assert!(nan.is_bit_identical(&nan.clone()));

        let zero = ChunkNode::array(ChunkId::VERTICES, vec![Vector3::new(0.0, 0.0, 0.0)]);
        let neg_zero = ChunkNode::array(ChunkId::VERTICES, vec![Vector3::new(-0.0, 0.0, 0.0)]);
        assert_eq!(zero, neg_zero);
        assert!(!zero.is_bit_identical(&neg_zero));
    }
}
