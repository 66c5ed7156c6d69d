use crate::chunks::primitives::{Quaternion, Vector3};
use crate::chunks::{Name, Record};
use crate::cursor::{Cursor, Writer};
use crate::error::Result;

/// Parent index of a root pivot.
pub const NO_PARENT: u32 = 0xFFFF_FFFF;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HierarchyHeader {
    pub version: u32,
    pub name: Name,
    pub num_pivots: u32,
    pub center: Vector3,
}

impl Record for HierarchyHeader {
    const SIZE: usize = 36;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            version: c.read_u32()?,
            name: Name::read(c)?,
            num_pivots: c.read_u32()?,
            center: Vector3::read(c)?,
        })
    }

    fn write(&self, w: &mut Writer) {
        w.write_u32(self.version);
        self.name.write(w);
        w.write_u32(self.num_pivots);
        self.center.write(w);
    }
}

/// One bone of a hierarchy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pivot {
    pub name: Name,
    /// Index of the parent pivot, or [`NO_PARENT`].
    pub parent_idx: u32,
    pub translation: Vector3,
    pub euler_angles: Vector3,
    pub rotation: Quaternion,
}

impl Pivot {
    pub fn is_root(&self) -> bool {
        self.parent_idx == NO_PARENT
    }
}

impl Record for Pivot {
    const SIZE: usize = 60;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self {
            name: Name::read(c)?,
            parent_idx: c.read_u32()?,
            translation: Vector3::read(c)?,
            euler_angles: Vector3::read(c)?,
            rotation: Quaternion::read(c)?,
        })
    }

    fn write(&self, w: &mut Writer) {
        self.name.write(w);
        w.write_u32(self.parent_idx);
        self.translation.write(w);
        self.euler_angles.write(w);
        self.rotation.write(w);
    }
}

/// 4x3 transform applied to a pivot when the hierarchy is re-exported.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PivotFixup {
    pub tm: [[f32; 3]; 4],
}

impl Record for PivotFixup {
    const SIZE: usize = 48;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        let mut tm = [[0.0f32; 3]; 4];
        for row in &mut tm {
            for v in row.iter_mut() {
                *v = c.read_f32()?;
            }
        }
        Ok(Self { tm })
    }

    fn write(&self, w: &mut Writer) {
        for row in &self.tm {
            for v in row {
                w.write_f32(*v);
            }
        }
    }
}
