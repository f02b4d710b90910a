//! Text rasterization: compose fixed-height glyph bitmaps into one grid.
//!
//! Color assignment happens downstream via a single foreground index; the
//! glyph data itself is purely boolean.

extern crate alloc;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::error::StudioError;
use crate::grid::{Cell, Grid};
use crate::StudioConfig;

/// A fixed-size boolean bitmap for one character, row-major.
#[derive(Debug, Clone)]
pub struct Glyph {
    columns: usize,
    rows: usize,
    bits: Vec<bool>,
}

impl Glyph {
    /// Parse a glyph from row strings, `#` marking filled cells.
    ///
    /// All rows must have the same length; the glyph height is the row
    /// count. An empty slice yields a zero-size glyph.
    pub fn from_rows(rows: &[&str]) -> Self {
        let columns = rows.first().map_or(0, |r| r.len());
        let mut bits = Vec::with_capacity(columns * rows.len());
        for row in rows {
            debug_assert_eq!(row.len(), columns, "ragged glyph row");
            for ch in row.chars() {
                bits.push(ch == '#');
            }
        }
        Self {
            columns,
            rows: rows.len(),
            bits,
        }
    }

    fn blank(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            bits: alloc::vec![false; columns * rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn bit(&self, x: usize, y: usize) -> bool {
        self.bits[y * self.columns + x]
    }
}

/// A character-to-bitmap table with a uniform glyph height.
///
/// Lookup for a character the set does not cover falls back to the space
/// glyph, i.e. blank columns of the set's width.
#[derive(Debug, Clone)]
pub struct GlyphSet {
    rows: usize,
    glyphs: BTreeMap<char, Glyph>,
}

impl GlyphSet {
    /// Build a glyph set, validating that every glyph has the same height.
    pub fn new(glyphs: impl IntoIterator<Item = (char, Glyph)>) -> Result<Self, StudioError> {
        let mut map = BTreeMap::new();
        let mut rows = None;
        let mut first_width = None;

        for (ch, glyph) in glyphs {
            let expected = *rows.get_or_insert(glyph.rows);
            if glyph.rows != expected {
                return Err(StudioError::MixedGlyphHeight {
                    expected,
                    found: glyph.rows,
                });
            }
            first_width.get_or_insert(glyph.columns);
            map.insert(ch, glyph);
        }

        let rows = rows.unwrap_or(0);
        // Guarantee the fallback key exists.
        map.entry(' ')
            .or_insert_with(|| Glyph::blank(first_width.unwrap_or(0), rows));

        Ok(Self { rows, glyphs: map })
    }

    /// The built-in 5-row studio pixel font: A-Z, 0-9, space and common
    /// punctuation, 5 columns per letter.
    pub fn builtin() -> Self {
        // Row count is fixed by the table's array type, and the table
        // carries its own space glyph.
        Self {
            rows: FONT_ROWS,
            glyphs: builtin_font().into_iter().collect(),
        }
    }

    /// Glyph height shared by every entry.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Explicit lookup with the space glyph as the default key.
    fn glyph(&self, ch: char) -> &Glyph {
        self.glyphs
            .get(&ch)
            .or_else(|| self.glyphs.get(&' '))
            .expect("glyph set always carries a space glyph")
    }
}

/// Rasterize text into a grid, filled cells carrying `foreground` at
/// height 1.
///
/// Glyph columns concatenate left to right with `spacing` blank columns
/// between consecutive characters and no trailing run after the last one.
/// Empty text yields a zero-width grid of the set's row height.
pub fn rasterize_text(
    text: &str,
    glyphs: &GlyphSet,
    foreground: u8,
    config: &StudioConfig,
) -> Grid {
    let spacing = config.glyph_spacing;
    let shapes: Vec<&Glyph> = text.chars().map(|c| glyphs.glyph(c)).collect();

    let glyph_width: usize = shapes.iter().map(|g| g.columns()).sum();
    let total_width = if shapes.is_empty() {
        0
    } else {
        glyph_width + spacing * (shapes.len() - 1)
    };

    let mut grid = Grid::new(total_width, glyphs.rows());
    let mut x0 = 0;
    for glyph in shapes {
        for y in 0..glyph.rows() {
            for x in 0..glyph.columns() {
                if glyph.bit(x, y) {
                    grid.set(
                        x0 + x,
                        y,
                        Some(Cell {
                            color: foreground,
                            height: 1,
                        }),
                    );
                }
            }
        }
        x0 += glyph.columns() + spacing;
    }
    grid
}

const FONT_ROWS: usize = 5;

fn builtin_font() -> Vec<(char, Glyph)> {
    let defs: &[(char, [&str; FONT_ROWS])] = &[
        (' ', ["     ", "     ", "     ", "     ", "     "]),
        ('A', [".###.", "#...#", "#####", "#...#", "#...#"]),
        ('B', ["####.", "#...#", "####.", "#...#", "####."]),
        ('C', [".####", "#....", "#....", "#....", ".####"]),
        ('D', ["####.", "#...#", "#...#", "#...#", "####."]),
        ('E', ["#####", "#....", "####.", "#....", "#####"]),
        ('F', ["#####", "#....", "####.", "#....", "#...."]),
        ('G', [".####", "#....", "#..##", "#...#", ".###."]),
        ('H', ["#...#", "#...#", "#####", "#...#", "#...#"]),
        ('I', ["#####", "..#..", "..#..", "..#..", "#####"]),
        ('J', ["....#", "....#", "....#", "#...#", ".###."]),
        ('K', ["#...#", "#..#.", "###..", "#..#.", "#...#"]),
        ('L', ["#....", "#....", "#....", "#....", "#####"]),
        ('M', ["#...#", "##.##", "#.#.#", "#...#", "#...#"]),
        ('N', ["#...#", "##..#", "#.#.#", "#..##", "#...#"]),
        ('O', [".###.", "#...#", "#...#", "#...#", ".###."]),
        ('P', ["####.", "#...#", "####.", "#....", "#...."]),
        ('Q', [".###.", "#...#", "#...#", "#..#.", ".##.#"]),
        ('R', ["####.", "#...#", "####.", "#..#.", "#...#"]),
        ('S', [".####", "#....", ".###.", "....#", "####."]),
        ('T', ["#####", "..#..", "..#..", "..#..", "..#.."]),
        ('U', ["#...#", "#...#", "#...#", "#...#", ".###."]),
        ('V', ["#...#", "#...#", "#...#", ".#.#.", "..#.."]),
        ('W', ["#...#", "#...#", "#.#.#", "##.##", "#...#"]),
        ('X', ["#...#", ".#.#.", "..#..", ".#.#.", "#...#"]),
        ('Y', ["#...#", ".#.#.", "..#..", "..#..", "..#.."]),
        ('Z', ["#####", "...#.", "..#..", ".#...", "#####"]),
        ('0', [".###.", "#..##", "#.#.#", "##..#", ".###."]),
        ('1', ["..#..", ".##..", "..#..", "..#..", "#####"]),
        ('2', [".###.", "#...#", "..##.", ".#...", "#####"]),
        ('3', ["####.", "....#", ".###.", "....#", "####."]),
        ('4', ["#...#", "#...#", "#####", "....#", "....#"]),
        ('5', ["#####", "#....", "####.", "....#", "####."]),
        ('6', [".###.", "#....", "####.", "#...#", ".###."]),
        ('7', ["#####", "....#", "...#.", "..#..", "..#.."]),
        ('8', [".###.", "#...#", ".###.", "#...#", ".###."]),
        ('9', [".###.", "#...#", ".####", "....#", ".###."]),
        ('.', ["     ", "     ", "     ", "     ", "..#.."]),
        ('!', ["..#..", "..#..", "..#..", "     ", "..#.."]),
        ('?', [".###.", "#...#", "...#.", "     ", "..#.."]),
        ('-', ["     ", "     ", "#####", "     ", "     "]),
        (':', ["     ", "..#..", "     ", "..#..", "     "]),
        ('+', ["     ", "..#..", ".###.", "..#..", "     "]),
    ];

    defs.iter()
        .map(|(ch, rows)| (*ch, Glyph::from_rows(rows)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_font_is_uniform() {
        let set = GlyphSet::builtin();
        assert_eq!(set.rows(), 5);
        for glyph in set.glyphs.values() {
            assert_eq!(glyph.rows(), 5);
            assert_eq!(glyph.columns(), 5);
        }
    }

    #[test]
    fn two_letters_one_spacing_column() {
        let cfg = StudioConfig::new().glyph_spacing(1);
        let grid = rasterize_text("AB", &GlyphSet::builtin(), 0, &cfg);
        assert_eq!(grid.height(), 5);
        assert_eq!(grid.width(), 5 + 1 + 5);
        // The spacing column stays blank.
        for y in 0..5 {
            assert!(!grid.is_filled(5, y));
        }
    }

    #[test]
    fn empty_text_is_zero_width() {
        let cfg = StudioConfig::new();
        let grid = rasterize_text("", &GlyphSet::builtin(), 0, &cfg);
        assert_eq!(grid.width(), 0);
        assert_eq!(grid.height(), 5);
        assert_eq!(grid.filled_count(), 0);
    }

    #[test]
    fn unknown_character_falls_back_to_space() {
        let cfg = StudioConfig::new().glyph_spacing(0);
        let known = rasterize_text(" ", &GlyphSet::builtin(), 0, &cfg);
        let unknown = rasterize_text("~", &GlyphSet::builtin(), 0, &cfg);
        assert_eq!(unknown.width(), known.width());
        assert_eq!(unknown.filled_count(), 0);
    }

    #[test]
    fn mixed_glyph_heights_rejected() {
        let tall = Glyph::from_rows(&["#", "#", "#"]);
        let short = Glyph::from_rows(&["#", "#"]);
        let err = GlyphSet::new([('a', tall), ('b', short)]).unwrap_err();
        assert_eq!(
            err,
            StudioError::MixedGlyphHeight {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn foreground_index_is_carried() {
        let cfg = StudioConfig::new();
        let grid = rasterize_text("I", &GlyphSet::builtin(), 7, &cfg);
        let mut filled = 0;
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                if let Some(cell) = grid.get(x, y) {
                    assert_eq!(cell.color, 7);
                    assert_eq!(cell.height, 1);
                    filled += 1;
                }
            }
        }
        assert!(filled > 0);
    }
}
