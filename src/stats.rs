//! Brick tallies derived from a layout, for part lists and reporting.

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;

use crate::optimizer::BrickLayout;

/// Aggregated counts over one brick layout.
///
/// Both tallies keep first-seen order, so iteration is deterministic for a
/// given layout.
#[derive(Debug, Clone)]
pub struct LayoutStats {
    total: usize,
    by_size: Vec<(String, usize)>,
    by_color: Vec<(u8, usize)>,
}

impl LayoutStats {
    /// Pure tally over the layout's bricks.
    pub fn summarize(layout: &BrickLayout) -> Self {
        let mut by_size: Vec<(String, usize)> = Vec::new();
        let mut by_color: Vec<(u8, usize)> = Vec::new();

        for brick in layout.bricks() {
            let tag = brick.size_tag();
            match by_size.iter_mut().find(|(t, _)| *t == tag) {
                Some((_, n)) => *n += 1,
                None => by_size.push((tag, 1)),
            }
            match by_color.iter_mut().find(|(c, _)| *c == brick.color) {
                Some((_, n)) => *n += 1,
                None => by_color.push((brick.color, 1)),
            }
        }

        Self {
            total: layout.len(),
            by_size,
            by_color,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Counts per size tag, in first-seen order.
    pub fn by_size(&self) -> &[(String, usize)] {
        &self.by_size
    }

    /// Counts per palette index, in first-seen order.
    pub fn by_color(&self) -> &[(u8, usize)] {
        &self.by_color
    }

    pub fn count_for_size(&self, tag: &str) -> usize {
        self.by_size
            .iter()
            .find(|(t, _)| t == tag)
            .map_or(0, |(_, n)| *n)
    }

    pub fn count_for_color(&self, color: u8) -> usize {
        self.by_color
            .iter()
            .find(|(c, _)| *c == color)
            .map_or(0, |(_, n)| *n)
    }

    /// Colors ordered by count descending; ties keep first-seen order via
    /// the stable sort.
    pub fn top_colors(&self) -> Vec<(u8, usize)> {
        let mut sorted = self.by_color.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted
    }
}
