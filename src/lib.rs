#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod color;
pub mod error;
pub mod grid;
pub mod optimizer;
pub mod palette;
pub mod raster;
pub mod relief;
pub mod stats;
pub mod text;

pub use color::Color;
pub use error::StudioError;
pub use grid::{Cell, Grid};
pub use optimizer::{Brick, BrickLayout};
pub use palette::Palette;
pub use stats::LayoutStats;
pub use text::{Glyph, GlyphSet};

use alloc::vec::Vec;
use rgb::RGBA;

/// Configuration for one render pass.
///
/// Purely input data: the pipeline holds no state between calls, performs
/// no caching or debouncing, and every parameter change means a full
/// regeneration by the caller.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    /// Grid width in cells; grid height follows the source aspect ratio.
    pub target_width: u32,
    /// Height cap for the relief path, in stack units.
    pub max_height: u16,
    /// Relief: tall where dark instead of tall where bright.
    pub invert_height: bool,
    /// Optional pixelation factor applied as a pre-pass resample.
    pub pixelate: Option<u32>,
    /// Cells with mean alpha below this become empty.
    pub alpha_threshold: u8,
    /// Brick widths the optimizer may place, e.g. `[3, 2, 1]`.
    pub allowed_widths: Vec<u32>,
    /// Whether two cells must share a height to merge into one run.
    pub match_height: bool,
    /// Blank columns between consecutive glyphs on the text path.
    pub glyph_spacing: usize,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            target_width: 48,
            max_height: 10,
            invert_height: false,
            pixelate: None,
            alpha_threshold: 128,
            allowed_widths: alloc::vec![3, 2, 1],
            match_height: true,
            glyph_spacing: 1,
        }
    }
}

impl StudioConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target_width(mut self, w: u32) -> Self {
        self.target_width = w;
        self
    }

    pub fn max_height(mut self, h: u16) -> Self {
        self.max_height = h;
        self
    }

    pub fn invert_height(mut self, invert: bool) -> Self {
        self.invert_height = invert;
        self
    }

    pub fn pixelate(mut self, factor: u32) -> Self {
        self.pixelate = Some(factor);
        self
    }

    pub fn alpha_threshold(mut self, threshold: u8) -> Self {
        self.alpha_threshold = threshold;
        self
    }

    pub fn allowed_widths(mut self, widths: Vec<u32>) -> Self {
        self.allowed_widths = widths;
        self
    }

    pub fn match_height(mut self, matched: bool) -> Self {
        self.match_height = matched;
        self
    }

    pub fn glyph_spacing(mut self, spacing: usize) -> Self {
        self.glyph_spacing = spacing;
        self
    }
}

/// Everything one regeneration produces: the quantized grid, its brick
/// cover, and the tallies derived from that cover.
#[derive(Debug, Clone)]
pub struct RenderResult {
    pub grid: Grid,
    pub layout: BrickLayout,
    pub stats: LayoutStats,
}

fn finish(grid: Grid, config: &StudioConfig) -> Result<RenderResult, StudioError> {
    let layout = optimizer::optimize(&grid, &config.allowed_widths, config.match_height)?;
    let stats = LayoutStats::summarize(&layout);
    Ok(RenderResult {
        grid,
        layout,
        stats,
    })
}

/// Render a decoded image: rasterize, optimize, summarize.
pub fn render_image(
    pixels: &[RGBA<u8>],
    width: usize,
    height: usize,
    palette: &Palette,
    config: &StudioConfig,
) -> Result<RenderResult, StudioError> {
    let grid = raster::rasterize(pixels, width, height, palette, config)?;
    finish(grid, config)
}

/// Render a decoded image in relief mode, with luminance-derived heights.
pub fn render_relief(
    pixels: &[RGBA<u8>],
    width: usize,
    height: usize,
    palette: &Palette,
    config: &StudioConfig,
) -> Result<RenderResult, StudioError> {
    let grid = relief::rasterize_relief(pixels, width, height, palette, config)?;
    finish(grid, config)
}

/// Render text through a glyph set, filled cells carrying `foreground`.
pub fn render_text(
    input: &str,
    glyphs: &GlyphSet,
    foreground: u8,
    config: &StudioConfig,
) -> Result<RenderResult, StudioError> {
    let grid = text::rasterize_text(input, glyphs, foreground, config);
    finish(grid, config)
}
