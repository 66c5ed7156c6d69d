//! Reader/writer for the W3D chunked model format.
//!
//! Three-layer architecture:
//! - **Layer 1** (`cursor`/`reader`/`writer`/`stream`): Raw chunk I/O, header
//!   flags and scope bounds
//! - **Layer 2** (`chunks`/`codec`/`registry`): Fixed-size records and the
//!   tag-to-codec table
//! - **Layer 3** (`tree`/`builder`/`serializer`/`model`): In-memory chunk tree,
//!   its read and write paths, and whole-file load/save

pub mod builder;
pub mod chunk_id;
pub mod chunks;
pub mod codec;
pub mod cursor;
pub mod error;
pub mod model;
pub mod options;
pub mod printer;
pub mod reader;
pub mod registry;
pub mod serializer;
pub mod stream;
pub mod tree;
pub mod writer;

pub use builder::TreeBuilder;
pub use chunk_id::ChunkId;
pub use codec::{ArrayValue, Codec, ElementKind, StructKind, StructValue};
pub use error::{Error, Result, Warning};
pub use model::{load_model, parse_model, save_model, FileType, LoadedModel};
pub use options::{ReadOptions, UnknownChunkPolicy};
pub use reader::ChunkReader;
pub use registry::{registry, ChunkDef, Registry};
pub use serializer::TreeSerializer;
pub use stream::{ChunkHeader, ChunkRead, ChunkWrite};
pub use tree::{ChunkNode, ChunkTree, Payload};
pub use writer::ChunkWriter;
