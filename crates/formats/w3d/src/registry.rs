//! Chunk registry: the lookup from type tag to codec shared by both paths.
//!
//! The built-in table is a plain list of `(id, name, codec)` rows. It is turned
//! into a [`Registry`] once per process by [`registry`] and never mutated
//! afterwards. Custom registries can be built with [`Registry::register`] for
//! formats that extend the tag set.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::chunk_id::ChunkId;
use crate::codec::{Codec, ElementKind, StructKind};
use crate::error::{Error, Result};

/// One row of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkDef {
    pub id: ChunkId,
    /// Diagnostic name only.
    pub name: &'static str,
    pub codec: Codec,
}

impl ChunkDef {
    pub const fn new(id: ChunkId, name: &'static str, codec: Codec) -> Self {
        Self { id, name, codec }
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    defs: HashMap<ChunkId, ChunkDef>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a table, rejecting duplicate ids.
    pub fn from_table(table: &[ChunkDef]) -> Result<Self> {
        let mut registry = Self::new();
        for def in table {
            registry.register(*def)?;
        }
        Ok(registry)
    }

    /// The built-in W3D table.
    pub fn w3d() -> Result<Self> {
        Self::from_table(W3D_CHUNKS)
    }

    /// Add an entry. Registering the same id twice is an error and leaves the
    /// existing entry in place.
    pub fn register(&mut self, def: ChunkDef) -> Result<()> {
        if let Some(existing) = self.defs.get(&def.id) {
            return Err(Error::DuplicateChunk {
                id: def.id,
                existing: existing.name,
                duplicate: def.name,
            });
        }
        self.defs.insert(def.id, def);
        Ok(())
    }

    pub fn lookup(&self, id: ChunkId) -> Option<&ChunkDef> {
        self.defs.get(&id)
    }

    /// Registered name of `id`, or `"unknown"`.
    pub fn name_of(&self, id: ChunkId) -> &'static str {
        self.lookup(id).map_or("unknown", |def| def.name)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// All entries, sorted by id.
    pub fn entries(&self) -> Vec<&ChunkDef> {
        let mut defs: Vec<_> = self.defs.values().collect();
        defs.sort_by_key(|def| def.id);
        defs
    }
}

/// The process-wide registry holding the built-in W3D table.
///
/// Built on first use; read-only afterwards.
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| Registry::w3d().expect("built-in W3D chunk table has duplicate ids"))
}

const fn container(id: ChunkId, name: &'static str) -> ChunkDef {
    ChunkDef::new(id, name, Codec::Container)
}

const fn structure(id: ChunkId, name: &'static str, kind: StructKind) -> ChunkDef {
    ChunkDef::new(id, name, Codec::Struct(kind))
}

const fn array(id: ChunkId, name: &'static str, kind: ElementKind) -> ChunkDef {
    ChunkDef::new(id, name, Codec::Array(kind))
}

const fn text(id: ChunkId, name: &'static str) -> ChunkDef {
    ChunkDef::new(id, name, Codec::Text)
}

// Animation channels, emitters, aggregates and sound objects are left out on
// purpose: they are read back as raw bytes.
pub const W3D_CHUNKS: &[ChunkDef] = &[
    // Meshes
    container(ChunkId::MESH, "W3D_CHUNK_MESH"),
    array(ChunkId::VERTICES, "W3D_CHUNK_VERTICES", ElementKind::Vector3),
    array(ChunkId::VERTEX_NORMALS, "W3D_CHUNK_VERTEX_NORMALS", ElementKind::Vector3),
    text(ChunkId::MESH_USER_TEXT, "W3D_CHUNK_MESH_USER_TEXT"),
    array(ChunkId::VERTEX_INFLUENCES, "W3D_CHUNK_VERTEX_INFLUENCES", ElementKind::VertexInfluence),
    structure(ChunkId::MESH_HEADER3, "W3D_CHUNK_MESH_HEADER3", StructKind::MeshHeader3),
    array(ChunkId::TRIANGLES, "W3D_CHUNK_TRIANGLES", ElementKind::Triangle),
    array(ChunkId::VERTEX_SHADE_INDICES, "W3D_CHUNK_VERTEX_SHADE_INDICES", ElementKind::U32),
    container(ChunkId::PRELIT_UNLIT, "W3D_CHUNK_PRELIT_UNLIT"),
    container(ChunkId::PRELIT_VERTEX, "W3D_CHUNK_PRELIT_VERTEX"),
    container(ChunkId::PRELIT_LIGHTMAP_MULTI_PASS, "W3D_CHUNK_PRELIT_LIGHTMAP_MULTI_PASS"),
    container(ChunkId::PRELIT_LIGHTMAP_MULTI_TEXTURE, "W3D_CHUNK_PRELIT_LIGHTMAP_MULTI_TEXTURE"),
    structure(ChunkId::MATERIAL_INFO, "W3D_CHUNK_MATERIAL_INFO", StructKind::MaterialInfo),
    array(ChunkId::SHADERS, "W3D_CHUNK_SHADERS", ElementKind::Shader),
    container(ChunkId::VERTEX_MATERIALS, "W3D_CHUNK_VERTEX_MATERIALS"),
    container(ChunkId::VERTEX_MATERIAL, "W3D_CHUNK_VERTEX_MATERIAL"),
    text(ChunkId::VERTEX_MATERIAL_NAME, "W3D_CHUNK_VERTEX_MATERIAL_NAME"),
    structure(ChunkId::VERTEX_MATERIAL_INFO, "W3D_CHUNK_VERTEX_MATERIAL_INFO", StructKind::VertexMaterialInfo),
    text(ChunkId::VERTEX_MAPPER_ARGS0, "W3D_CHUNK_VERTEX_MAPPER_ARGS0"),
    text(ChunkId::VERTEX_MAPPER_ARGS1, "W3D_CHUNK_VERTEX_MAPPER_ARGS1"),
    container(ChunkId::TEXTURES, "W3D_CHUNK_TEXTURES"),
    container(ChunkId::TEXTURE, "W3D_CHUNK_TEXTURE"),
    text(ChunkId::TEXTURE_NAME, "W3D_CHUNK_TEXTURE_NAME"),
    structure(ChunkId::TEXTURE_INFO, "W3D_CHUNK_TEXTURE_INFO", StructKind::TextureInfo),
    container(ChunkId::MATERIAL_PASS, "W3D_CHUNK_MATERIAL_PASS"),
    array(ChunkId::VERTEX_MATERIAL_IDS, "W3D_CHUNK_VERTEX_MATERIAL_IDS", ElementKind::U32),
    array(ChunkId::SHADER_IDS, "W3D_CHUNK_SHADER_IDS", ElementKind::U32),
    array(ChunkId::DCG, "W3D_CHUNK_DCG", ElementKind::Rgba),
    array(ChunkId::DIG, "W3D_CHUNK_DIG", ElementKind::Rgba),
    array(ChunkId::SCG, "W3D_CHUNK_SCG", ElementKind::Rgba),
    container(ChunkId::TEXTURE_STAGE, "W3D_CHUNK_TEXTURE_STAGE"),
    array(ChunkId::TEXTURE_IDS, "W3D_CHUNK_TEXTURE_IDS", ElementKind::U32),
    array(ChunkId::STAGE_TEXCOORDS, "W3D_CHUNK_STAGE_TEXCOORDS", ElementKind::Vector2),
    array(ChunkId::PER_FACE_TEXCOORD_IDS, "W3D_CHUNK_PER_FACE_TEXCOORD_IDS", ElementKind::FaceIndices),
    array(ChunkId::TANGENTS, "W3D_CHUNK_TANGENTS", ElementKind::Vector3),
    array(ChunkId::BINORMALS, "W3D_CHUNK_BINORMALS", ElementKind::Vector3),
    container(ChunkId::AABTREE, "W3D_CHUNK_AABTREE"),
    structure(ChunkId::AABTREE_HEADER, "W3D_CHUNK_AABTREE_HEADER", StructKind::AabTreeHeader),
    array(ChunkId::AABTREE_POLYINDICES, "W3D_CHUNK_AABTREE_POLYINDICES", ElementKind::U32),
    array(ChunkId::AABTREE_NODES, "W3D_CHUNK_AABTREE_NODES", ElementKind::AabTreeNode),
    // Hierarchies
    container(ChunkId::HIERARCHY, "W3D_CHUNK_HIERARCHY"),
    structure(ChunkId::HIERARCHY_HEADER, "W3D_CHUNK_HIERARCHY_HEADER", StructKind::HierarchyHeader),
    array(ChunkId::PIVOTS, "W3D_CHUNK_PIVOTS", ElementKind::Pivot),
    array(ChunkId::PIVOT_FIXUPS, "W3D_CHUNK_PIVOT_FIXUPS", ElementKind::PivotFixup),
    // Animations
    container(ChunkId::ANIMATION, "W3D_CHUNK_ANIMATION"),
    structure(ChunkId::ANIMATION_HEADER, "W3D_CHUNK_ANIMATION_HEADER", StructKind::AnimationHeader),
    container(ChunkId::COMPRESSED_ANIMATION, "W3D_CHUNK_COMPRESSED_ANIMATION"),
    structure(
        ChunkId::COMPRESSED_ANIMATION_HEADER,
        "W3D_CHUNK_COMPRESSED_ANIMATION_HEADER",
        StructKind::CompressedAnimationHeader,
    ),
    // Hierarchical models
    container(ChunkId::HMODEL, "W3D_CHUNK_HMODEL"),
    structure(ChunkId::HMODEL_HEADER, "W3D_CHUNK_HMODEL_HEADER", StructKind::HModelHeader),
    structure(ChunkId::NODE, "W3D_CHUNK_NODE", StructKind::HModelNode),
    structure(ChunkId::COLLISION_NODE, "W3D_CHUNK_COLLISION_NODE", StructKind::HModelNode),
    structure(ChunkId::SKIN_NODE, "W3D_CHUNK_SKIN_NODE", StructKind::HModelNode),
    container(ChunkId::COLLECTION, "W3D_CHUNK_COLLECTION"),
    text(ChunkId::COLLECTION_OBJ_NAME, "W3D_CHUNK_COLLECTION_OBJ_NAME"),
    // Levels of detail
    container(ChunkId::HLOD, "W3D_CHUNK_HLOD"),
    structure(ChunkId::HLOD_HEADER, "W3D_CHUNK_HLOD_HEADER", StructKind::HlodHeader),
    container(ChunkId::HLOD_LOD_ARRAY, "W3D_CHUNK_HLOD_LOD_ARRAY"),
    structure(
        ChunkId::HLOD_SUB_OBJECT_ARRAY_HEADER,
        "W3D_CHUNK_HLOD_SUB_OBJECT_ARRAY_HEADER",
        StructKind::HlodArrayHeader,
    ),
    structure(ChunkId::HLOD_SUB_OBJECT, "W3D_CHUNK_HLOD_SUB_OBJECT", StructKind::HlodSubObject),
    container(ChunkId::HLOD_AGGREGATE_ARRAY, "W3D_CHUNK_HLOD_AGGREGATE_ARRAY"),
    container(ChunkId::HLOD_PROXY_ARRAY, "W3D_CHUNK_HLOD_PROXY_ARRAY"),
    // Primitives and misc
    structure(ChunkId::BOX, "W3D_CHUNK_BOX", StructKind::BoxObject),
    container(ChunkId::DAZZLE, "W3D_CHUNK_DAZZLE"),
    text(ChunkId::DAZZLE_NAME, "W3D_CHUNK_DAZZLE_NAME"),
    text(ChunkId::DAZZLE_TYPENAME, "W3D_CHUNK_DAZZLE_TYPENAME"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_has_unique_ids() {
        let registry = Registry::w3d().expect("duplicate id in W3D_CHUNKS");
        assert_eq!(registry.len(), W3D_CHUNKS.len());
    }

    #[test]
    fn builtin_table_covers_every_shape() {
        let registry = registry();
        let codecs: Vec<Codec> = registry.entries().iter().map(|def| def.codec).collect();
        assert!(codecs.contains(&Codec::Container));
        assert!(codecs.contains(&Codec::Text));
        assert!(codecs.iter().any(|c| matches!(c, Codec::Struct(_))));
        assert!(codecs.iter().any(|c| matches!(c, Codec::Array(_))));
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = Registry::new();
        registry
            .register(ChunkDef::new(ChunkId(7), "FIRST", Codec::Text))
            .unwrap();
        let err = registry
            .register(ChunkDef::new(ChunkId(7), "SECOND", Codec::Container))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateChunk {
                existing: "FIRST",
                duplicate: "SECOND",
                ..
            }
        ));
        assert_eq!(registry.lookup(ChunkId(7)).unwrap().name, "FIRST");
    }

    #[test]
    fn builtin_table_extends_with_float_arrays() {
        let mut registry = Registry::w3d().unwrap();
        let weights = ChunkDef::new(ChunkId(0x7000), "WEIGHTS", Codec::Array(ElementKind::F32));
        registry.register(weights).unwrap();
        assert_eq!(registry.len(), W3D_CHUNKS.len() + 1);
        assert_eq!(registry.lookup(ChunkId(0x7000)), Some(&weights));
        assert!(W3D_CHUNKS
            .iter()
            .all(|def| def.codec != Codec::Array(ElementKind::F32)));
    }

    #[test]
    fn lookup_misses_unregistered_ids() {
        let registry = registry();
        assert!(registry.lookup(ChunkId::ANIMATION_CHANNEL).is_none());
        assert_eq!(registry.name_of(ChunkId::ANIMATION_CHANNEL), "unknown");
        assert_eq!(registry.name_of(ChunkId::MESH), "W3D_CHUNK_MESH");
    }
}
