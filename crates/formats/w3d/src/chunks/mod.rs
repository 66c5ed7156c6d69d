//! Fixed-size on-disk records carried by W3D leaf chunks.
//!
//! Every record knows its exact byte size and how to read and write itself in
//! the format's little-endian layout. Struct chunks hold one record; array
//! chunks hold a packed run of them.

pub mod animation;
pub mod hierarchy;
pub mod hlod;
pub mod hmodel;
pub mod mesh;
pub mod primitives;

use std::fmt;

use crate::cursor::{Cursor, Writer};
use crate::error::Result;

/// Length of the short name fields used throughout the format.
pub const NAME_LEN: usize = 16;

/// A fixed-size little-endian record.
pub trait Record: Sized {
    /// Exact encoded size in bytes.
    const SIZE: usize;

    fn read(c: &mut Cursor<'_>) -> Result<Self>;

    fn write(&self, w: &mut Writer);
}

impl Record for u32 {
    const SIZE: usize = 4;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        c.read_u32()
    }

    fn write(&self, w: &mut Writer) {
        w.write_u32(*self);
    }
}

impl Record for f32 {
    const SIZE: usize = 4;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        c.read_f32()
    }

    fn write(&self, w: &mut Writer) {
        w.write_f32(*self);
    }
}

/// NUL-padded fixed-width name field.
///
/// The bytes are kept verbatim (including anything after the first NUL) so a
/// decoded record re-encodes to the same bytes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedName<const N: usize>(pub [u8; N]);

impl<const N: usize> FixedName<N> {
    /// Build a name, truncating to `N - 1` bytes so it stays NUL-terminated.
    pub fn new(name: &str) -> Self {
        let mut bytes = [0u8; N];
        let len = name.len().min(N.saturating_sub(1));
        bytes[..len].copy_from_slice(&name.as_bytes()[..len]);
        Self(bytes)
    }

    /// Text up to the first NUL, lossily decoded.
    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        let end = self.0.iter().position(|&b| b == 0).unwrap_or(N);
        String::from_utf8_lossy(&self.0[..end])
    }
}

impl<const N: usize> Default for FixedName<N> {
    fn default() -> Self {
        Self([0u8; N])
    }
}

impl<const N: usize> fmt::Debug for FixedName<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl<const N: usize> Record for FixedName<N> {
    const SIZE: usize = N;

    fn read(c: &mut Cursor<'_>) -> Result<Self> {
        Ok(Self(c.read_array()?))
    }

    fn write(&self, w: &mut Writer) {
        w.write_bytes(&self.0);
    }
}

/// Standard 16-byte object name.
pub type Name = FixedName<NAME_LEN>;

/// Double-width name used for fully qualified `Container.Object` references.
pub type LongName = FixedName<{ NAME_LEN * 2 }>;
