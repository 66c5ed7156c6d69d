use crate::chunks::{LongName, Name, Record};
use crate::cursor::{Cursor, Writer};
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HlodHeader {
    pub version: u32,
    pub lod_count: u32,
    pub name: Name,
    pub hierarchy_name: Name,
}

impl Record for HlodHeader {
    const SIZE: usize = 40;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            version: c.read_u32()?,
            lod_count: c.read_u32()?,
            name: Name::read(c)?,
            hierarchy_name: Name::read(c)?,
        })
    }

    fn write(&self, w: &mut Writer) {
        w.write_u32(self.version);
        w.write_u32(self.lod_count);
        self.name.write(w);
        self.hierarchy_name.write(w);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HlodArrayHeader {
    pub model_count: u32,
    /// Largest screen area at which this level is used; negative means unbounded.
    pub max_screen_size: f32,
}

impl Record for HlodArrayHeader {
    const SIZE: usize = 8;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            model_count: c.read_u32()?,
            max_screen_size: c.read_f32()?,
        })
    }

    fn write(&self, w: &mut Writer) {
        w.write_u32(self.model_count);
        w.write_f32(self.max_screen_size);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HlodSubObject {
    pub bone_index: u32,
    pub name: LongName,
}

impl Record for HlodSubObject {
    const SIZE: usize = 36;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            bone_index: c.read_u32()?,
            name: LongName::read(c)?,
        })
    }

    fn write(&self, w: &mut Writer) {
        w.write_u32(self.bone_index);
        self.name.write(w);
    }
}
