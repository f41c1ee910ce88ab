use serde::{Deserialize, Serialize};

/// 24-bit RGB colour packed as `0xRRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb(u32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0);

    pub fn from_channels(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    /// Keep only the low 24 bits of a packed value
    pub fn from_packed(packed: u32) -> Self {
        Self(packed & 0x00FF_FFFF)
    }

    pub fn packed(&self) -> u32 {
        self.0
    }

    pub fn r(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn g(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn b(&self) -> u8 {
        self.0 as u8
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}
