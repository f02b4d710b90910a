extern crate alloc;
use alloc::format;
use alloc::string::String;

use rgb::RGB8;

/// A palette color: an exact RGB triple with an optional display name.
///
/// Matching against a palette always goes through [`distance_sq`] on the
/// RGB components; the name is presentation data only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color {
    rgb: RGB8,
    name: Option<String>,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            rgb: RGB8 { r, g, b },
            name: None,
        }
    }

    pub fn named(r: u8, g: u8, b: u8, name: &str) -> Self {
        Self {
            rgb: RGB8 { r, g, b },
            name: Some(String::from(name)),
        }
    }

    pub fn rgb(&self) -> RGB8 {
        self.rgb
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Lowercase `#rrggbb` rendering.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.rgb.r, self.rgb.g, self.rgb.b)
    }
}

/// Squared Euclidean distance between two RGB samples.
///
/// Closeness is always measured in plain RGB space; there is no perceptual
/// color space conversion anywhere in the pipeline.
pub fn distance_sq(a: RGB8, b: RGB8) -> u32 {
    let dr = a.r as i32 - b.r as i32;
    let dg = a.g as i32 - b.g as i32;
    let db = a.b as i32 - b.b as i32;
    (dr * dr + dg * dg + db * db) as u32
}

/// Rec.601 weighted luminance in [0.0, 255.0].
pub fn luminance(c: RGB8) -> f32 {
    0.299 * c.r as f32 + 0.587 * c.g as f32 + 0.114 * c.b as f32
}
