//! Relief rasterization: the image path plus a per-cell stack height
//! derived from luminance.

use rgb::RGBA;

use crate::color::luminance;
use crate::error::StudioError;
use crate::grid::{Cell, Grid};
use crate::palette::Palette;
use crate::raster::sample;
use crate::StudioConfig;

/// Rasterize a decoded image into a quantized grid with heights.
///
/// Luminance of each box-averaged sample maps linearly onto
/// `[0, config.max_height]`; with `invert_height` set, dark areas stand
/// tall instead of bright ones. A derived height of zero means no material,
/// so the cell is left empty.
pub fn rasterize_relief(
    pixels: &[RGBA<u8>],
    width: usize,
    height: usize,
    palette: &Palette,
    config: &StudioConfig,
) -> Result<Grid, StudioError> {
    let sampled = sample(pixels, width, height, config)?;

    let mut grid = Grid::new(sampled.width, sampled.height);
    for y in 0..sampled.height {
        for x in 0..sampled.width {
            let s = sampled.samples[y * sampled.width + x];
            if s.alpha < config.alpha_threshold {
                continue;
            }

            let lum = luminance(s.rgb);
            let mut h = (lum / 255.0 * config.max_height as f32).round() as u16;
            if config.invert_height {
                h = config.max_height - h;
            }
            if h == 0 {
                continue;
            }

            grid.set(
                x,
                y,
                Some(Cell {
                    color: palette.nearest(s.rgb),
                    height: h,
                }),
            );
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use alloc::vec;
    use alloc::vec::Vec;

    fn opaque(v: u8) -> RGBA<u8> {
        RGBA {
            r: v,
            g: v,
            b: v,
            a: 255,
        }
    }

    fn gray_palette() -> Palette {
        Palette::new(vec![
            Color::new(0, 0, 0),
            Color::new(128, 128, 128),
            Color::new(255, 255, 255),
        ])
        .unwrap()
    }

    #[test]
    fn luminance_maps_to_height_range() {
        // One row: black, mid gray, white. One cell each.
        let pixels = vec![opaque(0), opaque(128), opaque(255)];
        let cfg = StudioConfig::new().target_width(3).max_height(10);
        let grid = rasterize_relief(&pixels, 3, 1, &gray_palette(), &cfg).unwrap();

        // Black maps to height 0 and disappears.
        assert!(!grid.is_filled(0, 0));
        assert_eq!(grid.get(1, 0).unwrap().height, 5);
        assert_eq!(grid.get(2, 0).unwrap().height, 10);
    }

    #[test]
    fn inversion_flips_extremes() {
        let pixels = vec![opaque(0), opaque(255)];
        let cfg = StudioConfig::new()
            .target_width(2)
            .max_height(8)
            .invert_height(true);
        let grid = rasterize_relief(&pixels, 2, 1, &gray_palette(), &cfg).unwrap();

        assert_eq!(grid.get(0, 0).unwrap().height, 8);
        // White inverts to height 0, so the cell is empty.
        assert!(!grid.is_filled(1, 0));
    }

    #[test]
    fn heights_never_exceed_cap() {
        let pixels: Vec<RGBA<u8>> = (0..64).map(|i| opaque((i * 4) as u8)).collect();
        let cfg = StudioConfig::new().target_width(8).max_height(5);
        let grid = rasterize_relief(&pixels, 8, 8, &gray_palette(), &cfg).unwrap();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if let Some(cell) = grid.get(x, y) {
                    assert!(cell.height >= 1 && cell.height <= 5);
                }
            }
        }
    }
}
