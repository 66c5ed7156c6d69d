use std::fmt;

use thiserror::Error;

use crate::chunk_id::ChunkId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unexpected end of data at offset {offset:#x} (need {need} bytes, have {have})")]
    UnexpectedEof {
        offset: usize,
        need: usize,
        have: usize,
    },

    #[error("incomplete chunk header at offset {offset:#x}: {have} of 8 bytes left in scope")]
    IncompleteHeader { offset: usize, have: usize },

    #[error(
        "chunk {id} at offset {offset:#x} declares {declared} bytes but only {available} remain"
    )]
    TruncatedChunk {
        id: ChunkId,
        offset: usize,
        declared: u32,
        available: usize,
    },

    #[error("chunk {id} at offset {offset:#x} nests deeper than {max} levels")]
    NestingTooDeep {
        id: ChunkId,
        offset: usize,
        max: usize,
    },

    #[error("chunk {id} ({name}) at offset {offset:#x}: expected {expected}, found {actual} bytes")]
    SizeMismatch {
        id: ChunkId,
        name: &'static str,
        offset: usize,
        expected: ExpectedSize,
        actual: usize,
    },

    #[error("short write in chunk {id}: wrote {written} of {expected} bytes")]
    ShortWrite {
        id: ChunkId,
        expected: usize,
        written: usize,
    },

    #[error("write failed: {message}")]
    WriteFailure { message: String },

    #[error("chunk {id} body is {length} bytes, exceeding the 31-bit length field")]
    LengthOverflow { id: ChunkId, length: usize },

    #[error("chunk {id} registered twice ({existing} and {duplicate})")]
    DuplicateChunk {
        id: ChunkId,
        existing: &'static str,
        duplicate: &'static str,
    },

    #[error("no codec registered for typed chunk {id}")]
    UnregisteredChunk { id: ChunkId },

    #[error("chunk {id} is registered as {expected} but holds a {found} payload")]
    ShapeMismatch {
        id: ChunkId,
        expected: String,
        found: String,
    },

    #[error("unsupported model file type: {0}")]
    UnsupportedFileType(String),

    #[error("invalid options: {0}")]
    Options(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Body size a codec expects for a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedSize {
    /// Exactly this many bytes (fixed struct).
    Exact(usize),
    /// Any multiple of this element size (homogeneous array).
    MultipleOf(usize),
}

impl fmt::Display for ExpectedSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "exactly {n} bytes"),
            Self::MultipleOf(n) => write!(f, "a multiple of {n} bytes"),
        }
    }
}

/// A recoverable anomaly noticed while building a tree.
///
/// Warnings never abort a parse. The builder collects them in file order and
/// also reports each one through `tracing`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    #[error(
        "unknown chunk {id} at offset {offset:#x} ({length} bytes {})",
        disposition(.preserved)
    )]
    UnknownChunkType {
        id: ChunkId,
        offset: usize,
        length: u32,
        preserved: bool,
    },

    #[error("chunk {id} ({name}) at offset {offset:#x}: expected {expected}, found {actual} bytes")]
    SizeMismatch {
        id: ChunkId,
        name: &'static str,
        offset: usize,
        expected: ExpectedSize,
        actual: usize,
    },

    /// A tag registered as a container was stored without the container flag.
    #[error("container chunk {id} ({name}) at offset {offset:#x} stored as a {length}-byte leaf")]
    UnexpectedLeaf {
        id: ChunkId,
        name: &'static str,
        offset: usize,
        length: u32,
    },
}

fn disposition(preserved: &bool) -> &'static str {
    if *preserved {
        "kept as raw bytes"
    } else {
        "discarded"
    }
}

impl Warning {
    /// Tag of the chunk the warning is about.
    pub fn id(&self) -> ChunkId {
        match self {
            Self::UnknownChunkType { id, .. }
            | Self::SizeMismatch { id, .. }
            | Self::UnexpectedLeaf { id, .. } => *id,
        }
    }

    /// Offset of the offending chunk's header.
    pub fn offset(&self) -> usize {
        match self {
            Self::UnknownChunkType { offset, .. }
            | Self::SizeMismatch { offset, .. }
            | Self::UnexpectedLeaf { offset, .. } => *offset,
        }
    }
}
