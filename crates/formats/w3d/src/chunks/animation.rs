use crate::chunks::{Name, Record};
use crate::cursor::{Cursor, Writer};
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimationHeader {
    pub version: u32,
    pub name: Name,
    pub hierarchy_name: Name,
    pub num_frames: u32,
    pub frame_rate: u32,
}

impl Record for AnimationHeader {
    const SIZE: usize = 44;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            version: c.read_u32()?,
            name: Name::read(c)?,
            hierarchy_name: Name::read(c)?,
            num_frames: c.read_u32()?,
            frame_rate: c.read_u32()?,
        })
    }

    fn write(&self, w: &mut Writer) {
        w.write_u32(self.version);
        self.name.write(w);
        self.hierarchy_name.write(w);
        w.write_u32(self.num_frames);
        w.write_u32(self.frame_rate);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompressedAnimationHeader {
    pub version: u32,
    pub name: Name,
    pub hierarchy_name: Name,
    pub num_frames: u32,
    pub frame_rate: u16,
    /// Compression scheme: 0 = time-coded, 1 = adaptive delta.
    pub flavor: u16,
}

impl Record for CompressedAnimationHeader {
    const SIZE: usize = 44;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            version: c.read_u32()?,
            name: Name::read(c)?,
            hierarchy_name: Name::read(c)?,
            num_frames: c.read_u32()?,
            frame_rate: c.read_u16()?,
            flavor: c.read_u16()?,
        })
    }

    fn write(&self, w: &mut Writer) {
        w.write_u32(self.version);
        self.name.write(w);
        self.hierarchy_name.write(w);
        w.write_u32(self.num_frames);
        w.write_u16(self.frame_rate);
        w.write_u16(self.flavor);
    }
}
