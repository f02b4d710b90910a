//! Image rasterization: downsample a decoded pixel buffer to the target
//! grid resolution and quantize each cell against the active palette.

extern crate alloc;
use alloc::vec::Vec;

use rgb::{RGB8, RGBA};

use crate::error::StudioError;
use crate::grid::{Cell, Grid};
use crate::palette::Palette;
use crate::StudioConfig;

/// One downsampled cell sample: box-averaged color plus mean alpha.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CellSample {
    pub(crate) rgb: RGB8,
    pub(crate) alpha: u8,
}

/// Box-averaged samples for the whole target grid, row-major, together with
/// the derived target dimensions.
pub(crate) struct SampleGrid {
    pub(crate) samples: Vec<CellSample>,
    pub(crate) width: usize,
    pub(crate) height: usize,
}

pub(crate) fn validate_source(
    pixel_count: usize,
    width: usize,
    height: usize,
    target_width: u32,
) -> Result<(), StudioError> {
    if width == 0 || height == 0 || target_width == 0 {
        return Err(StudioError::ZeroDimension);
    }
    if pixel_count != width * height {
        return Err(StudioError::DimensionMismatch {
            len: pixel_count,
            width,
            height,
        });
    }
    Ok(())
}

/// Downsample the source to `target_width` columns, preserving aspect ratio.
///
/// Target height is `round(target_width * height / width)`, clamped to at
/// least one row. Each target cell box-averages the RGB and alpha of its
/// source rectangle.
pub(crate) fn sample(
    pixels: &[RGBA<u8>],
    width: usize,
    height: usize,
    config: &StudioConfig,
) -> Result<SampleGrid, StudioError> {
    validate_source(pixels.len(), width, height, config.target_width)?;

    let pixelated;
    let pixels = match config.pixelate {
        Some(factor) if factor > 1 => {
            pixelated = pixelate(pixels, width, height, factor as usize);
            &pixelated[..]
        }
        _ => pixels,
    };

    let target_w = config.target_width as usize;
    let target_h = ((config.target_width as f32 * height as f32 / width as f32).round() as usize)
        .max(1);

    let mut samples = Vec::with_capacity(target_w * target_h);
    for ty in 0..target_h {
        let sy0 = ty * height / target_h;
        let sy1 = (((ty + 1) * height).div_ceil(target_h)).min(height).max(sy0 + 1);
        for tx in 0..target_w {
            let sx0 = tx * width / target_w;
            let sx1 = (((tx + 1) * width).div_ceil(target_w)).min(width).max(sx0 + 1);

            let mut r = 0u32;
            let mut g = 0u32;
            let mut b = 0u32;
            let mut a = 0u32;
            for sy in sy0..sy1 {
                for sx in sx0..sx1 {
                    let p = pixels[sy * width + sx];
                    r += p.r as u32;
                    g += p.g as u32;
                    b += p.b as u32;
                    a += p.a as u32;
                }
            }
            let n = ((sy1 - sy0) * (sx1 - sx0)) as u32;
            samples.push(CellSample {
                rgb: RGB8 {
                    r: (r / n) as u8,
                    g: (g / n) as u8,
                    b: (b / n) as u8,
                },
                alpha: (a / n) as u8,
            });
        }
    }

    Ok(SampleGrid {
        samples,
        width: target_w,
        height: target_h,
    })
}

/// Two-step nearest-neighbor resample: shrink by `factor`, then re-expand to
/// the original size. A resolution transform that coarsens the effective
/// sampling grid before the main downsample; not part of quantization.
pub(crate) fn pixelate(
    pixels: &[RGBA<u8>],
    width: usize,
    height: usize,
    factor: usize,
) -> Vec<RGBA<u8>> {
    let small_w = (width / factor).max(1);
    let small_h = (height / factor).max(1);

    let mut small = Vec::with_capacity(small_w * small_h);
    for y in 0..small_h {
        let sy = y * height / small_h;
        for x in 0..small_w {
            let sx = x * width / small_w;
            small.push(pixels[sy * width + sx]);
        }
    }

    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        let sy = y * small_h / height;
        for x in 0..width {
            let sx = x * small_w / width;
            out.push(small[sy * small_w + sx]);
        }
    }
    out
}

/// Rasterize a decoded image into a quantized grid.
///
/// Cells whose mean alpha falls below the configured threshold become empty;
/// everything else is quantized to the nearest palette entry at height 1.
pub fn rasterize(
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
            grid.set(
                x,
                y,
                Some(Cell {
                    color: palette.nearest(s.rgb),
                    height: 1,
                }),
            );
        }
    }
    Ok(grid)
}
