use serde::{Deserialize, Serialize};

use crate::face::FaceSet;

/// 24-bit RGB color, stored as `0xRRGGBB`. This is also the wire
/// representation: map payloads and color packets carry plain
/// integers.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff_ff_ff);

    #[inline]
    pub const fn new(hex: u32) -> Self {
        Self(hex & 0xff_ff_ff)
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.0 as u8
    }
}

/// A single voxel. Owned exclusively by the grid; the stored position
/// is the cell address and never changes after placement.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Block {
    pub x: i32,
    pub y: i32,
    pub z: i32,
    pub color: Rgb,
    /// Hides neighboring faces. Always true for current block kinds;
    /// reserved for transparent kinds.
    pub opaque: bool,
    /// Participates in movement resolution.
    pub collides: bool,
    /// Externally visible faces, kept in sync with the surrounding
    /// grid by every mutation that touches this cell or a neighbor.
    pub faces: FaceSet,
    /// UI highlight only; no effect on visibility or physics.
    pub selected: bool,
}

impl Block {
    pub fn new(x: i32, y: i32, z: i32, color: Rgb) -> Self {
        Self {
            x,
            y,
            z,
            color,
            opaque: true,
            collides: true,
            faces: FaceSet::EMPTY,
            selected: false,
        }
    }

    #[inline]
    pub fn same_position(&self, other: &Block) -> bool {
        self.x == other.x && self.y == other.y && self.z == other.z
    }
}
