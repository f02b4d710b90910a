extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;

/// One filled grid cell: a palette index plus a stack height.
///
/// Height is always >= 1 for a stored cell; rasterizers normalize a derived
/// height of zero to "no cell". Non-relief paths fill cells at height 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub color: u8,
    pub height: u16,
}

/// A dense row-major grid of optional cells, created fresh per render pass.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Option<Cell>>,
}

impl Grid {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            None
        }
    }

    pub(crate) fn set(&mut self, x: usize, y: usize, cell: Option<Cell>) {
        debug_assert!(x < self.width && y < self.height);
        self.cells[y * self.width + x] = cell;
    }

    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some()
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}
