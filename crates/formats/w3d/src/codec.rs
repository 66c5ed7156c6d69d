//! Payload shapes and the codecs that decode/encode them.
//!
//! A leaf chunk body takes one of three shapes: a single fixed struct, a
//! packed array of fixed-size elements, or text. Container tags carry no leaf
//! codec at all. The set of struct layouts and element types is closed; each
//! list below expands into a kind enum (stored in the registry) and a value
//! enum (stored in the tree) that can only be built in matching pairs.

use std::fmt;

use crate::chunks::animation::{AnimationHeader, CompressedAnimationHeader};
use crate::chunks::hierarchy::{HierarchyHeader, Pivot, PivotFixup};
use crate::chunks::hlod::{HlodArrayHeader, HlodHeader, HlodSubObject};
use crate::chunks::hmodel::{BoxObject, HModelHeader, HModelNode};
use crate::chunks::mesh::{
    AabTreeHeader, AabTreeNode, FaceIndices, MaterialInfo, MeshHeader3, Shader, TextureInfo,
    Triangle, VertexInfluence, VertexMaterialInfo,
};
use crate::chunks::primitives::{Rgba, Vector2, Vector3};
use crate::chunks::Record;
use crate::chunk_id::ChunkId;
use crate::cursor::{Cursor, Writer};
use crate::error::{Error, ExpectedSize, Result};
use crate::tree::Payload;

macro_rules! struct_shapes {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        /// Fixed struct layout of a leaf chunk.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum StructKind {
            $($variant,)*
        }

        /// A decoded fixed struct.
        #[derive(Debug, Clone, PartialEq)]
        pub enum StructValue {
            $($variant($ty),)*
        }

        impl StructKind {
            /// Encoded size of the record.
            pub fn size(self) -> usize {
                match self {
                    $(Self::$variant => <$ty as Record>::SIZE,)*
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)*
                }
            }

            fn read(self, c: &mut Cursor<'_>) -> Result<StructValue> {
                Ok(match self {
                    $(Self::$variant => StructValue::$variant(<$ty as Record>::read(c)?),)*
                })
            }
        }

        impl StructValue {
            pub fn kind(&self) -> StructKind {
                match self {
                    $(Self::$variant(_) => StructKind::$variant,)*
                }
            }

            pub(crate) fn write(&self, w: &mut Writer) {
                match self {
                    $(Self::$variant(v) => v.write(w),)*
                }
            }
        }

        $(
            impl From<$ty> for StructValue {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

macro_rules! array_shapes {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        /// Element type of a homogeneous array chunk.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ElementKind {
            $($variant,)*
        }

        /// A decoded array of fixed-size elements.
        #[derive(Debug, Clone, PartialEq)]
        pub enum ArrayValue {
            $($variant(Vec<$ty>),)*
        }

        impl ElementKind {
            /// Encoded size of one element.
            pub fn size(self) -> usize {
                match self {
                    $(Self::$variant => <$ty as Record>::SIZE,)*
                }
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)*
                }
            }

            fn read(self, c: &mut Cursor<'_>, count: usize) -> Result<ArrayValue> {
                Ok(match self {
                    $(Self::$variant => {
                        let mut items = Vec::with_capacity(count);
                        for _ in 0..count {
                            items.push(<$ty as Record>::read(c)?);
                        }
                        ArrayValue::$variant(items)
                    })*
                })
            }
        }

        impl ArrayValue {
            pub fn kind(&self) -> ElementKind {
                match self {
                    $(Self::$variant(_) => ElementKind::$variant,)*
                }
            }

            pub fn len(&self) -> usize {
                match self {
                    $(Self::$variant(items) => items.len(),)*
                }
            }

            pub fn is_empty(&self) -> bool {
                self.len() == 0
            }

            pub(crate) fn write(&self, w: &mut Writer) {
                match self {
                    $(Self::$variant(items) => {
                        for item in items {
                            item.write(w);
                        }
                    })*
                }
            }
        }

        $(
            impl From<Vec<$ty>> for ArrayValue {
                fn from(items: Vec<$ty>) -> Self {
                    Self::$variant(items)
                }
            }
        )*
    };
}

struct_shapes! {
    MeshHeader3 => MeshHeader3,
    MaterialInfo => MaterialInfo,
    VertexMaterialInfo => VertexMaterialInfo,
    TextureInfo => TextureInfo,
    AabTreeHeader => AabTreeHeader,
    HierarchyHeader => HierarchyHeader,
    AnimationHeader => AnimationHeader,
    CompressedAnimationHeader => CompressedAnimationHeader,
    HModelHeader => HModelHeader,
    HModelNode => HModelNode,
    HlodHeader => HlodHeader,
    HlodArrayHeader => HlodArrayHeader,
    HlodSubObject => HlodSubObject,
    BoxObject => BoxObject,
}

array_shapes! {
    U32 => u32,
    // No built-in tag stores bare floats; kept for registries that extend
    // the table with float channels.
    F32 => f32,
    Vector3 => Vector3,
    Vector2 => Vector2,
    Rgba => Rgba,
    Triangle => Triangle,
    VertexInfluence => VertexInfluence,
    Shader => Shader,
    AabTreeNode => AabTreeNode,
    FaceIndices => FaceIndices,
    Pivot => Pivot,
    PivotFixup => PivotFixup,
}

/// How a registered chunk tag is decoded and encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// Body is a sequence of nested chunks; handled structurally by the tree
    /// builder and serializer.
    Container,
    Struct(StructKind),
    Array(ElementKind),
    /// Raw text bytes, copied verbatim. Not assumed to be NUL-terminated.
    Text,
}

/// Outcome of decoding a leaf body.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// Payload built from the first `consumed` bytes of the body.
    Value { payload: Payload, consumed: usize },
    /// The body cannot hold even one complete record.
    TooShort,
    /// The codec has no leaf form.
    NotALeaf,
}

impl Codec {
    /// Body size this codec accepts, if it constrains one.
    pub fn expected_size(&self) -> Option<ExpectedSize> {
        match self {
            Self::Struct(kind) => Some(ExpectedSize::Exact(kind.size())),
            Self::Array(kind) => Some(ExpectedSize::MultipleOf(kind.size())),
            Self::Container | Self::Text => None,
        }
    }

    /// Decode a leaf body.
    ///
    /// Struct codecs read exactly one record and leave trailing bytes; array
    /// codecs read as many whole elements as fit. The caller compares
    /// `consumed` with the body length to diagnose mismatches.
    pub fn decode(&self, body: &[u8]) -> Result<Decoded> {
        let mut c = Cursor::new(body);
        let decoded = match self {
            Self::Container => Decoded::NotALeaf,
            Self::Struct(kind) => {
                if body.len() < kind.size() {
                    Decoded::TooShort
                } else {
                    Decoded::Value {
                        payload: Payload::Struct(kind.read(&mut c)?),
                        consumed: c.position(),
                    }
                }
            }
            Self::Array(kind) => {
                let count = body.len() / kind.size();
                if count == 0 && !body.is_empty() {
                    Decoded::TooShort
                } else {
                    Decoded::Value {
                        payload: Payload::Array(kind.read(&mut c, count)?),
                        consumed: c.position(),
                    }
                }
            }
            Self::Text => Decoded::Value {
                payload: Payload::Text(body.to_vec()),
                consumed: body.len(),
            },
        };
        Ok(decoded)
    }

    /// Encode a typed payload, rejecting payloads of the wrong shape.
    pub fn encode(&self, id: ChunkId, payload: &Payload, w: &mut Writer) -> Result<()> {
        match (self, payload) {
            (Self::Struct(kind), Payload::Struct(value)) if value.kind() == *kind => {
                value.write(w)
            }
            (Self::Array(kind), Payload::Array(value)) if value.kind() == *kind => {
                value.write(w)
            }
            (Self::Text, Payload::Text(bytes)) => w.write_bytes(bytes),
            _ => {
                return Err(Error::ShapeMismatch {
                    id,
                    expected: self.to_string(),
                    found: payload.shape(),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container => write!(f, "container"),
            Self::Struct(kind) => write!(f, "struct {}", kind.name()),
            Self::Array(kind) => write!(f, "array of {}", kind.name()),
            Self::Text => write!(f, "text"),
        }
    }
}
