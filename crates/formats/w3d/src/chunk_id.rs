use std::fmt;

use serde::{Deserialize, Serialize};

/// 32-bit chunk type tag.
///
/// The engine treats the value as an opaque lookup key; meaning comes only from
/// the registry entry it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkId(pub u32);

impl ChunkId {
    // Meshes
    pub const MESH: Self = Self(0x0000_0000);
    pub const VERTICES: Self = Self(0x0000_0002);
    pub const VERTEX_NORMALS: Self = Self(0x0000_0003);
    pub const MESH_USER_TEXT: Self = Self(0x0000_000C);
    pub const VERTEX_INFLUENCES: Self = Self(0x0000_000E);
    pub const MESH_HEADER3: Self = Self(0x0000_001F);
    pub const TRIANGLES: Self = Self(0x0000_0020);
    pub const VERTEX_SHADE_INDICES: Self = Self(0x0000_0022);
    pub const PRELIT_UNLIT: Self = Self(0x0000_0023);
    pub const PRELIT_VERTEX: Self = Self(0x0000_0024);
    pub const PRELIT_LIGHTMAP_MULTI_PASS: Self = Self(0x0000_0025);
    pub const PRELIT_LIGHTMAP_MULTI_TEXTURE: Self = Self(0x0000_0026);
    pub const MATERIAL_INFO: Self = Self(0x0000_0028);
    pub const SHADERS: Self = Self(0x0000_0029);
    pub const VERTEX_MATERIALS: Self = Self(0x0000_002A);
    pub const VERTEX_MATERIAL: Self = Self(0x0000_002B);
    pub const VERTEX_MATERIAL_NAME: Self = Self(0x0000_002C);
    pub const VERTEX_MATERIAL_INFO: Self = Self(0x0000_002D);
    pub const VERTEX_MAPPER_ARGS0: Self = Self(0x0000_002E);
    pub const VERTEX_MAPPER_ARGS1: Self = Self(0x0000_002F);
    pub const TEXTURES: Self = Self(0x0000_0030);
    pub const TEXTURE: Self = Self(0x0000_0031);
    pub const TEXTURE_NAME: Self = Self(0x0000_0032);
    pub const TEXTURE_INFO: Self = Self(0x0000_0033);
    pub const MATERIAL_PASS: Self = Self(0x0000_0038);
    pub const VERTEX_MATERIAL_IDS: Self = Self(0x0000_0039);
    pub const SHADER_IDS: Self = Self(0x0000_003A);
    pub const DCG: Self = Self(0x0000_003B);
    pub const DIG: Self = Self(0x0000_003C);
    pub const SCG: Self = Self(0x0000_003E);
    pub const TEXTURE_STAGE: Self = Self(0x0000_0048);
    pub const TEXTURE_IDS: Self = Self(0x0000_0049);
    pub const STAGE_TEXCOORDS: Self = Self(0x0000_004A);
    pub const PER_FACE_TEXCOORD_IDS: Self = Self(0x0000_004B);
    pub const TANGENTS: Self = Self(0x0000_0060);
    pub const BINORMALS: Self = Self(0x0000_0061);
    pub const AABTREE: Self = Self(0x0000_0090);
    pub const AABTREE_HEADER: Self = Self(0x0000_0091);
    pub const AABTREE_POLYINDICES: Self = Self(0x0000_0092);
    pub const AABTREE_NODES: Self = Self(0x0000_0093);

    // Hierarchies
    pub const HIERARCHY: Self = Self(0x0000_0100);
    pub const HIERARCHY_HEADER: Self = Self(0x0000_0101);
    pub const PIVOTS: Self = Self(0x0000_0102);
    pub const PIVOT_FIXUPS: Self = Self(0x0000_0103);

    // Animations
    pub const ANIMATION: Self = Self(0x0000_0200);
    pub const ANIMATION_HEADER: Self = Self(0x0000_0201);
    pub const ANIMATION_CHANNEL: Self = Self(0x0000_0202);
    pub const BIT_CHANNEL: Self = Self(0x0000_0203);
    pub const COMPRESSED_ANIMATION: Self = Self(0x0000_0280);
    pub const COMPRESSED_ANIMATION_HEADER: Self = Self(0x0000_0281);
    pub const COMPRESSED_ANIMATION_CHANNEL: Self = Self(0x0000_0282);
    pub const COMPRESSED_BIT_CHANNEL: Self = Self(0x0000_0283);

    // Hierarchical models
    pub const HMODEL: Self = Self(0x0000_0300);
    pub const HMODEL_HEADER: Self = Self(0x0000_0301);
    pub const NODE: Self = Self(0x0000_0302);
    pub const COLLISION_NODE: Self = Self(0x0000_0303);
    pub const SKIN_NODE: Self = Self(0x0000_0304);

    pub const COLLECTION: Self = Self(0x0000_0420);
    pub const COLLECTION_OBJ_NAME: Self = Self(0x0000_0422);
    pub const EMITTER: Self = Self(0x0000_0500);
    pub const AGGREGATE: Self = Self(0x0000_0600);

    // Levels of detail
    pub const HLOD: Self = Self(0x0000_0700);
    pub const HLOD_HEADER: Self = Self(0x0000_0701);
    pub const HLOD_LOD_ARRAY: Self = Self(0x0000_0702);
    pub const HLOD_SUB_OBJECT_ARRAY_HEADER: Self = Self(0x0000_0703);
    pub const HLOD_SUB_OBJECT: Self = Self(0x0000_0704);
    pub const HLOD_AGGREGATE_ARRAY: Self = Self(0x0000_0705);
    pub const HLOD_PROXY_ARRAY: Self = Self(0x0000_0706);

    // Primitives and misc
    pub const BOX: Self = Self(0x0000_0740);
    pub const NULL_OBJECT: Self = Self(0x0000_0750);
    pub const DAZZLE: Self = Self(0x0000_0900);
    pub const DAZZLE_NAME: Self = Self(0x0000_0901);
    pub const DAZZLE_TYPENAME: Self = Self(0x0000_0902);
    pub const SOUNDROBJ: Self = Self(0x0000_0A00);
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl From<u32> for ChunkId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
