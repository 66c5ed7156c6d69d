use crate::chunks::Record;
use crate::cursor::{Cursor, Writer};
use crate::error::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl Record for Vector3 {
    const SIZE: usize = 12;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            x: c.read_f32()?,
            y: c.read_f32()?,
            z: c.read_f32()?,
        })
    }

    fn write(&self, w: &mut Writer) {
        w.write_f32(self.x);
        w.write_f32(self.y);
        w.write_f32(self.z);
    }
}

/// Texture coordinate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector2 {
    pub u: f32,
    pub v: f32,
}

impl Record for Vector2 {
    const SIZE: usize = 8;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            u: c.read_f32()?,
            v: c.read_f32()?,
        })
    }

    fn write(&self, w: &mut Writer) {
        w.write_f32(self.u);
        w.write_f32(self.v);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 1.0,
        }
    }
}

impl Record for Quaternion {
    const SIZE: usize = 16;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            x: c.read_f32()?,
            y: c.read_f32()?,
            z: c.read_f32()?,
            w: c.read_f32()?,
        })
    }

    fn write(&self, w: &mut Writer) {
        w.write_f32(self.x);
        w.write_f32(self.y);
        w.write_f32(self.z);
        w.write_f32(self.w);
    }
}

/// RGB colour padded to four bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub pad: u8,
}

impl Record for Rgb {
    const SIZE: usize = 4;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        let [r, g, b, pad] = c.read_array()?;
        Ok(Self { r, g, b, pad })
    }

    fn write(&self, w: &mut Writer) {
        w.write_bytes(&[self.r, self.g, self.b, self.pad]);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Record for Rgba {
    const SIZE: usize = 4;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        let [r, g, b, a] = c.read_array()?;
        Ok(Self { r, g, b, a })
    }

    fn write(&self, w: &mut Writer) {
        w.write_bytes(&[self.r, self.g, self.b, self.a]);
    }
}
