//! Fixture builders shared by the integration tests.
//!
//! Raw byte fixtures are assembled by hand so that tests do not depend on the
//! serializer they are checking.

#![allow(dead_code)]

use w3d::chunks::hierarchy::{HierarchyHeader, Pivot, NO_PARENT};
use w3d::chunks::animation::AnimationHeader;
use w3d::chunks::mesh::{
    AabTreeHeader, AabTreeNode, MaterialInfo, MeshHeader3, Shader, TextureInfo, Triangle,
    VertexMaterialInfo,
};
use w3d::chunks::primitives::{Quaternion, Rgb, Vector2, Vector3};
use w3d::chunks::Name;
use w3d::cursor::Writer;
use w3d::{ChunkId, ChunkNode, ChunkTree};

/// Encode one leaf chunk: header plus body.
pub fn leaf(id: ChunkId, body: &[u8]) -> Vec<u8> {
    let mut w = Writer::new();
    w.write_u32(id.0);
    w.write_u32(body.len() as u32);
    w.write_bytes(body);
    w.into_bytes()
}

/// Encode a container chunk around already-encoded children.
pub fn container(id: ChunkId, children: &[Vec<u8>]) -> Vec<u8> {
    let body: Vec<u8> = children.concat();
    let mut w = Writer::new();
    w.write_u32(id.0);
    w.write_u32(body.len() as u32 | 0x8000_0000);
    w.write_bytes(&body);
    w.into_bytes()
}

pub fn f32s(values: &[f32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

pub fn u32s(values: &[u32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Tag that the built-in registry deliberately does not know.
pub const UNREGISTERED: ChunkId = ChunkId::ANIMATION_CHANNEL;

/// A small but complete model: a textured triangle mesh, its hierarchy and an
/// animation whose channel data is unregistered.
pub fn sample_model() -> ChunkTree {
    ChunkTree::new(vec![sample_hierarchy(), sample_mesh(), sample_animation()])
}

pub fn sample_mesh() -> ChunkNode {
    let vertices = vec![
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
    ];
    let normals = vec![Vector3::new(0.0, 0.0, 1.0); 3];
    let header = MeshHeader3 {
        version: 0x0004_0002,
        mesh_name: Name::new("TRIANGLE"),
        container_name: Name::new("SAMPLE"),
        num_tris: 1,
        num_vertices: 3,
        num_materials: 1,
        vertex_channels: 0x3,
        face_channels: 0x1,
        max: Vector3::new(1.0, 1.0, 0.0),
        sph_center: Vector3::new(0.5, 0.5, 0.0),
        sph_radius: 0.7071,
        ..MeshHeader3::default()
    };
    let triangle = Triangle {
        vindex: [0, 1, 2],
        attributes: 13,
        normal: Vector3::new(0.0, 0.0, 1.0),
        dist: 0.0,
    };

    ChunkNode::container(
        ChunkId::MESH,
        vec![
            ChunkNode::structure(ChunkId::MESH_HEADER3, header),
            ChunkNode::array(ChunkId::VERTICES, vertices),
            ChunkNode::array(ChunkId::VERTEX_NORMALS, normals),
            ChunkNode::text(ChunkId::MESH_USER_TEXT, b"exported by hand\0".to_vec()),
            ChunkNode::array(ChunkId::TRIANGLES, vec![triangle]),
            ChunkNode::array(ChunkId::VERTEX_SHADE_INDICES, vec![0u32, 1, 2]),
            ChunkNode::structure(
                ChunkId::MATERIAL_INFO,
                MaterialInfo {
                    pass_count: 1,
                    vertex_material_count: 1,
                    shader_count: 1,
                    texture_count: 1,
                },
            ),
            ChunkNode::container(
                ChunkId::VERTEX_MATERIALS,
                vec![ChunkNode::container(
                    ChunkId::VERTEX_MATERIAL,
                    vec![
                        ChunkNode::text(ChunkId::VERTEX_MATERIAL_NAME, b"VM0\0".to_vec()),
                        ChunkNode::structure(
                            ChunkId::VERTEX_MATERIAL_INFO,
                            VertexMaterialInfo {
                                diffuse: Rgb {
                                    r: 255,
                                    g: 255,
                                    b: 255,
                                    pad: 0,
                                },
                                opacity: 1.0,
                                ..VertexMaterialInfo::default()
                            },
                        ),
                    ],
                )],
            ),
            ChunkNode::array(
                ChunkId::SHADERS,
                vec![Shader {
                    depth_compare: 3,
                    depth_mask: 1,
                    dest_blend: 0,
                    src_blend: 1,
                    texturing: 1,
                    pri_gradient: 1,
                    ..Shader::default()
                }],
            ),
            ChunkNode::container(
                ChunkId::TEXTURES,
                vec![ChunkNode::container(
                    ChunkId::TEXTURE,
                    vec![
                        ChunkNode::text(ChunkId::TEXTURE_NAME, b"triangle.tga\0".to_vec()),
                        ChunkNode::structure(
                            ChunkId::TEXTURE_INFO,
                            TextureInfo {
                                attributes: 0,
                                anim_type: 0,
                                frame_count: 1,
                                frame_rate: 15.0,
                            },
                        ),
                    ],
                )],
            ),
            ChunkNode::container(
                ChunkId::MATERIAL_PASS,
                vec![
                    ChunkNode::array(ChunkId::VERTEX_MATERIAL_IDS, vec![0u32]),
                    ChunkNode::array(ChunkId::SHADER_IDS, vec![0u32]),
                    ChunkNode::container(
                        ChunkId::TEXTURE_STAGE,
                        vec![
                            ChunkNode::array(ChunkId::TEXTURE_IDS, vec![0u32]),
                            ChunkNode::array(
                                ChunkId::STAGE_TEXCOORDS,
                                vec![
                                    Vector2 { u: 0.0, v: 0.0 },
                                    Vector2 { u: 1.0, v: 0.0 },
                                    Vector2 { u: 0.0, v: 1.0 },
                                ],
                            ),
                        ],
                    ),
                ],
            ),
            ChunkNode::container(
                ChunkId::AABTREE,
                vec![
                    ChunkNode::structure(
                        ChunkId::AABTREE_HEADER,
                        AabTreeHeader {
                            node_count: 1,
                            poly_count: 1,
                            padding: [0; 6],
                        },
                    ),
                    ChunkNode::array(ChunkId::AABTREE_POLYINDICES, vec![0u32]),
                    ChunkNode::array(
                        ChunkId::AABTREE_NODES,
                        vec![AabTreeNode {
                            min: Vector3::new(0.0, 0.0, 0.0),
                            max: Vector3::new(1.0, 1.0, 0.0),
                            front_or_poly0: 0x8000_0000,
                            back_or_poly_count: 1,
                        }],
                    ),
                ],
            ),
        ],
    )
}

pub fn sample_hierarchy() -> ChunkNode {
    let pivots = vec![
        Pivot {
            name: Name::new("ROOTTRANSFORM"),
            parent_idx: NO_PARENT,
            ..Pivot::default()
        },
        Pivot {
            name: Name::new("TURRET"),
            parent_idx: 0,
            translation: Vector3::new(0.0, 0.0, 2.5),
            rotation: Quaternion::default(),
            ..Pivot::default()
        },
    ];
    ChunkNode::container(
        ChunkId::HIERARCHY,
        vec![
            ChunkNode::structure(
                ChunkId::HIERARCHY_HEADER,
                HierarchyHeader {
                    version: 0x0004_0001,
                    name: Name::new("SAMPLE"),
                    num_pivots: 2,
                    center: Vector3::default(),
                },
            ),
            ChunkNode::array(ChunkId::PIVOTS, pivots),
        ],
    )
}

pub fn sample_animation() -> ChunkNode {
    // FirstFrame, LastFrame, VectorLen, Flags, Pivot, pad, then keyframe data.
    let mut channel = Writer::new();
    for v in [0u16, 1, 1, 2, 1, 0] {
        channel.write_u16(v);
    }
    channel.write_f32(0.0);
    channel.write_f32(2.5);

    ChunkNode::container(
        ChunkId::ANIMATION,
        vec![
            ChunkNode::structure(
                ChunkId::ANIMATION_HEADER,
                AnimationHeader {
                    version: 0x0004_0001,
                    name: Name::new("SAMPLE.RAISE"),
                    hierarchy_name: Name::new("SAMPLE"),
                    num_frames: 2,
                    frame_rate: 30,
                },
            ),
            ChunkNode::raw(UNREGISTERED, channel.into_bytes()),
        ],
    )
}

/// Byte offsets at which each top-level chunk of `tree` ends.
pub fn top_level_boundaries(tree: &ChunkTree) -> Vec<usize> {
    let mut end = 0;
    tree.iter()
        .map(|node| {
            end += 8 + node.body_len();
            end
        })
        .collect()
}
