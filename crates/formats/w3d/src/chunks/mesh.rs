use crate::chunks::primitives::{Rgb, Vector3};
use crate::chunks::{Name, Record};
use crate::cursor::{Cursor, Writer};
use crate::error::Result;

/// Mesh header, version 3 (`MESH_HEADER3`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshHeader3 {
    pub version: u32,
    pub attributes: u32,
    pub mesh_name: Name,
    pub container_name: Name,
    pub num_tris: u32,
    pub num_vertices: u32,
    pub num_materials: u32,
    pub num_damage_stages: u32,
    pub sort_level: i32,
    pub prelit_version: u32,
    pub future_count: u32,
    /// Bitmask of per-vertex channels present (locations, normals, tex coords, ...).
    pub vertex_channels: u32,
    pub face_channels: u32,
    pub min: Vector3,
    pub max: Vector3,
    pub sph_center: Vector3,
    pub sph_radius: f32,
}

impl Record for MeshHeader3 {
    const SIZE: usize = 116;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            version: c.read_u32()?,
            attributes: c.read_u32()?,
            mesh_name: Name::read(c)?,
            container_name: Name::read(c)?,
            num_tris: c.read_u32()?,
            num_vertices: c.read_u32()?,
            num_materials: c.read_u32()?,
            num_damage_stages: c.read_u32()?,
            sort_level: c.read_i32()?,
            prelit_version: c.read_u32()?,
            future_count: c.read_u32()?,
            vertex_channels: c.read_u32()?,
            face_channels: c.read_u32()?,
            min: Vector3::read(c)?,
            max: Vector3::read(c)?,
            sph_center: Vector3::read(c)?,
            sph_radius: c.read_f32()?,
        })
    }

    fn write(&self, w: &mut Writer) {
        w.write_u32(self.version);
        w.write_u32(self.attributes);
        self.mesh_name.write(w);
        self.container_name.write(w);
        w.write_u32(self.num_tris);
        w.write_u32(self.num_vertices);
        w.write_u32(self.num_materials);
        w.write_u32(self.num_damage_stages);
        w.write_i32(self.sort_level);
        w.write_u32(self.prelit_version);
        w.write_u32(self.future_count);
        w.write_u32(self.vertex_channels);
        w.write_u32(self.face_channels);
        self.min.write(w);
        self.max.write(w);
        self.sph_center.write(w);
        w.write_f32(self.sph_radius);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Triangle {
    pub vindex: [u32; 3],
    /// Surface type and collision flags.
    pub attributes: u32,
    pub normal: Vector3,
    /// Plane distance.
    pub dist: f32,
}

impl Record for Triangle {
    const SIZE: usize = 32;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            vindex: [c.read_u32()?, c.read_u32()?, c.read_u32()?],
            attributes: c.read_u32()?,
            normal: Vector3::read(c)?,
            dist: c.read_f32()?,
        })
    }

    fn write(&self, w: &mut Writer) {
        for v in self.vindex {
            w.write_u32(v);
        }
        w.write_u32(self.attributes);
        self.normal.write(w);
        w.write_f32(self.dist);
    }
}

/// Bone bindings for one skinned vertex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VertexInfluence {
    pub bone_idx: [u16; 2],
    /// Per-bone weights in hundredths; zero for single-bone vertices.
    pub weight: [u16; 2],
}

impl Record for VertexInfluence {
    const SIZE: usize = 8;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            bone_idx: [c.read_u16()?, c.read_u16()?],
            weight: [c.read_u16()?, c.read_u16()?],
        })
    }

    fn write(&self, w: &mut Writer) {
        for v in self.bone_idx.iter().chain(&self.weight) {
            w.write_u16(*v);
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterialInfo {
    pub pass_count: u32,
    pub vertex_material_count: u32,
    pub shader_count: u32,
    pub texture_count: u32,
}

impl Record for MaterialInfo {
    const SIZE: usize = 16;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            pass_count: c.read_u32()?,
            vertex_material_count: c.read_u32()?,
            shader_count: c.read_u32()?,
            texture_count: c.read_u32()?,
        })
    }

    fn write(&self, w: &mut Writer) {
        w.write_u32(self.pass_count);
        w.write_u32(self.vertex_material_count);
        w.write_u32(self.shader_count);
        w.write_u32(self.texture_count);
    }
}

/// Fixed-function blend/depth state, one byte per setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Shader {
    pub depth_compare: u8,
    pub depth_mask: u8,
    pub color_mask: u8,
    pub dest_blend: u8,
    pub fog_func: u8,
    pub pri_gradient: u8,
    pub sec_gradient: u8,
    pub src_blend: u8,
    pub texturing: u8,
    pub detail_color_func: u8,
    pub detail_alpha_func: u8,
    pub shader_preset: u8,
    pub alpha_test: u8,
    pub post_detail_color_func: u8,
    pub post_detail_alpha_func: u8,
    pub pad: u8,
}

impl Record for Shader {
    const SIZE: usize = 16;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        let b: [u8; 16] = c.read_array()?;
        Ok(Self {
            depth_compare: b[0],
            depth_mask: b[1],
            color_mask: b[2],
            dest_blend: b[3],
            fog_func: b[4],
            pri_gradient: b[5],
            sec_gradient: b[6],
            src_blend: b[7],
            texturing: b[8],
            detail_color_func: b[9],
            detail_alpha_func: b[10],
            shader_preset: b[11],
            alpha_test: b[12],
            post_detail_color_func: b[13],
            post_detail_alpha_func: b[14],
            pad: b[15],
        })
    }

    fn write(&self, w: &mut Writer) {
        w.write_bytes(&[
            self.depth_compare,
            self.depth_mask,
            self.color_mask,
            self.dest_blend,
            self.fog_func,
            self.pri_gradient,
            self.sec_gradient,
            self.src_blend,
            self.texturing,
            self.detail_color_func,
            self.detail_alpha_func,
            self.shader_preset,
            self.alpha_test,
            self.post_detail_color_func,
            self.post_detail_alpha_func,
            self.pad,
        ]);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VertexMaterialInfo {
    pub attributes: u32,
    pub ambient: Rgb,
    pub diffuse: Rgb,
    pub specular: Rgb,
    pub emissive: Rgb,
    pub shininess: f32,
    pub opacity: f32,
    pub translucency: f32,
}

impl Record for VertexMaterialInfo {
    const SIZE: usize = 32;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            attributes: c.read_u32()?,
            ambient: Rgb::read(c)?,
            diffuse: Rgb::read(c)?,
            specular: Rgb::read(c)?,
            emissive: Rgb::read(c)?,
            shininess: c.read_f32()?,
            opacity: c.read_f32()?,
            translucency: c.read_f32()?,
        })
    }

    fn write(&self, w: &mut Writer) {
        w.write_u32(self.attributes);
        self.ambient.write(w);
        self.diffuse.write(w);
        self.specular.write(w);
        self.emissive.write(w);
        w.write_f32(self.shininess);
        w.write_f32(self.opacity);
        w.write_f32(self.translucency);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextureInfo {
    pub attributes: u16,
    pub anim_type: u16,
    pub frame_count: u32,
    pub frame_rate: f32,
}

impl Record for TextureInfo {
    const SIZE: usize = 12;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            attributes: c.read_u16()?,
            anim_type: c.read_u16()?,
            frame_count: c.read_u32()?,
            frame_rate: c.read_f32()?,
        })
    }

    fn write(&self, w: &mut Writer) {
        w.write_u16(self.attributes);
        w.write_u16(self.anim_type);
        w.write_u32(self.frame_count);
        w.write_f32(self.frame_rate);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AabTreeHeader {
    pub node_count: u32,
    pub poly_count: u32,
    pub padding: [u32; 6],
}

impl Record for AabTreeHeader {
    const SIZE: usize = 32;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        let node_count = c.read_u32()?;
        let poly_count = c.read_u32()?;
        let mut padding = [0u32; 6];
        for slot in &mut padding {
            *slot = c.read_u32()?;
        }
        Ok(Self {
            node_count,
            poly_count,
            padding,
        })
    }

    fn write(&self, w: &mut Writer) {
        w.write_u32(self.node_count);
        w.write_u32(self.poly_count);
        for v in self.padding {
            w.write_u32(v);
        }
    }
}

/// Culling tree node. When the high bit of `front_or_poly0` is set the node is
/// a leaf and the pair holds a polygon range instead of child indices.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AabTreeNode {
    pub min: Vector3,
    pub max: Vector3,
    pub front_or_poly0: u32,
    pub back_or_poly_count: u32,
}

impl Record for AabTreeNode {
    const SIZE: usize = 32;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            min: Vector3::read(c)?,
            max: Vector3::read(c)?,
            front_or_poly0: c.read_u32()?,
            back_or_poly_count: c.read_u32()?,
        })
    }

    fn write(&self, w: &mut Writer) {
        self.min.write(w);
        self.max.write(w);
        w.write_u32(self.front_or_poly0);
        w.write_u32(self.back_or_poly_count);
    }
}

/// Three per-face indices (e.g. texture coordinate ids for each corner).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaceIndices(pub [u32; 3]);

impl Record for FaceIndices {
    const SIZE: usize = 12;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self([c.read_u32()?, c.read_u32()?, c.read_u32()?]))
    }

    fn write(&self, w: &mut Writer) {
        for v in self.0 {
            w.write_u32(v);
        }
    }
}
