use crate::chunks::primitives::{Rgb, Vector3};
use crate::chunks::{LongName, Name, Record};
use crate::cursor::{Cursor, Writer};
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HModelHeader {
    pub version: u32,
    pub name: Name,
    pub hierarchy_name: Name,
    pub num_connections: u16,
    pub pad: u16,
}

impl Record for HModelHeader {
    const SIZE: usize = 40;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            version: c.read_u32()?,
            name: Name::read(c)?,
            hierarchy_name: Name::read(c)?,
            num_connections: c.read_u16()?,
            pad: c.read_u16()?,
        })
    }

    fn write(&self, w: &mut Writer) {
        w.write_u32(self.version);
        self.name.write(w);
        self.hierarchy_name.write(w);
        w.write_u16(self.num_connections);
        w.write_u16(self.pad);
    }
}

/// Attachment of a render object to a pivot. Shared by `NODE`,
/// `COLLISION_NODE` and `SKIN_NODE`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HModelNode {
    pub render_obj_name: Name,
    pub pivot_idx: u16,
}

impl Record for HModelNode {
    const SIZE: usize = 18;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            render_obj_name: Name::read(c)?,
            pivot_idx: c.read_u16()?,
        })
    }

    fn write(&self, w: &mut Writer) {
        self.render_obj_name.write(w);
        w.write_u16(self.pivot_idx);
    }
}

/// Oriented or axis-aligned collision box.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoxObject {
    pub version: u32,
    pub attributes: u32,
    pub name: LongName,
    pub color: Rgb,
    pub center: Vector3,
    pub extent: Vector3,
}

impl Record for BoxObject {
    const SIZE: usize = 68;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            version: c.read_u32()?,
            attributes: c.read_u32()?,
            name: LongName::read(c)?,
            color: Rgb::read(c)?,
            center: Vector3::read(c)?,
            extent: Vector3::read(c)?,
        })
    }

    fn write(&self, w: &mut Writer) {
        w.write_u32(self.version);
        w.write_u32(self.attributes);
        self.name.write(w);
        self.color.write(w);
        self.center.write(w);
        self.extent.write(w);
    }
}
