extern crate alloc;
use alloc::vec::Vec;

use rgb::RGB8;

use crate::color::{distance_sq, Color};
use crate::error::StudioError;

/// An ordered, fixed set of allowed output colors.
///
/// Immutable once constructed for a render pass. Entry order matters:
/// nearest-neighbor ties resolve to the earliest entry, so a given palette
/// ordering always produces the same quantization.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<Color>,
}

impl Palette {
    /// Build a palette from an ordered list of colors.
    ///
    /// Duplicate RGB entries are permitted but reported as a data-quality
    /// warning; the duplicate can never be selected by [`Palette::nearest`].
    pub fn new(entries: Vec<Color>) -> Result<Self, StudioError> {
        if entries.is_empty() {
            return Err(StudioError::EmptyPalette);
        }
        if entries.len() > 256 {
            return Err(StudioError::PaletteTooLarge(entries.len()));
        }

        for (i, entry) in entries.iter().enumerate() {
            if let Some(first) = entries[..i].iter().position(|e| e.rgb() == entry.rgb()) {
                log::warn!(
                    "palette entry {} duplicates entry {} ({})",
                    i,
                    first,
                    entry.hex()
                );
            }
        }

        Ok(Self { entries })
    }

    /// The default studio palette shipped with the brick tools.
    pub fn studio_default() -> Self {
        let entries = alloc::vec![
            Color::named(0, 0, 0, "Black"),
            Color::named(255, 255, 255, "White"),
            Color::named(155, 161, 157, "Medium Stone"),
            Color::named(99, 95, 98, "Dark Stone"),
            Color::named(196, 40, 28, "Bright Red"),
            Color::named(107, 35, 47, "Dark Red"),
            Color::named(218, 133, 65, "Bright Orange"),
            Color::named(245, 205, 48, "Bright Yellow"),
            Color::named(215, 197, 154, "Brick Yellow"),
            Color::named(75, 151, 75, "Bright Green"),
            Color::named(40, 127, 71, "Dark Green"),
            Color::named(159, 195, 233, "Light Blue"),
            Color::named(13, 105, 172, "Bright Blue"),
            Color::named(32, 58, 86, "Dark Blue"),
            Color::named(123, 46, 47, "Reddish Brown"),
            Color::named(160, 95, 53, "Medium Nougat"),
            Color::named(204, 142, 105, "Nougat"),
            Color::named(205, 98, 152, "Bright Pink"),
            Color::named(107, 50, 124, "Medium Lilac"),
            Color::named(226, 249, 154, "Spring Green"),
        ];
        // The built-in list is unique, so construction cannot fail.
        Self { entries }
    }

    pub fn entries(&self) -> &[Color] {
        &self.entries
    }

    pub fn color(&self, index: u8) -> &Color {
        &self.entries[index as usize]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find the nearest palette index for an RGB sample (brute force).
    ///
    /// Minimum squared Euclidean distance; ties break to the first entry in
    /// palette order via the strict comparison.
    pub fn nearest(&self, sample: RGB8) -> u8 {
        let mut best_idx = 0;
        let mut best_dist = u32::MAX;

        for (i, entry) in self.entries.iter().enumerate() {
            let d = distance_sq(sample, entry.rgb());
            if d < best_dist {
                best_dist = d;
                best_idx = i;
            }
        }

        best_idx as u8
    }
}
