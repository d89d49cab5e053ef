use serde::{Deserialize, Serialize};

/// A RGBA `Color`. Each color component is a floating point value
/// with a range from 0 to 1.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Color(pub f32, pub f32, pub f32, pub f32);

impl From<[f32; 4]> for Color {
    fn from(v: [f32; 4]) -> Self {
        Color(v[0], v[1], v[2], v[3])
    }
}

impl Into<[f32; 4]> for Color {
    fn into(self) -> [f32; 4] {
        [self.0, self.1, self.2, self.3]
    }
}

impl Color {
    /// Creates `Color` from a u32 encoded `ARGB`.
    pub fn from_argb_u32(encoded: u32) -> Self {
        Color(
            ((encoded >> 16) & 0xFF) as f32 / 255.0,
            ((encoded >> 8) & 0xFF) as f32 / 255.0,
            (encoded & 0xFF) as f32 / 255.0,
            ((encoded >> 24) & 0xFF) as f32 / 255.0,
        )
    }

    /// Clip to [0.0, 1.0] range.
    pub fn clip(&self) -> Color {
        Color(
            self.0.max(0.0).min(1.0),
            self.1.max(0.0).min(1.0),
            self.2.max(0.0).min(1.0),
            self.3.max(0.0).min(1.0),
        )
    }
}

impl Color {
    pub fn white() -> Self {
        Color(1.0, 1.0, 1.0, 1.0)
    }

    pub fn black() -> Self {
        Color(0.0, 0.0, 0.0, 1.0)
    }

    pub fn red() -> Self {
        Color(1.0, 0.0, 0.0, 1.0)
    }

    pub fn blue() -> Self {
        Color(0.0, 0.0, 1.0, 1.0)
    }

    pub fn yellow() -> Self {
        Color(1.0, 1.0, 0.0, 1.0)
    }
}
