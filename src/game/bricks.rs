//! Brick grid geometry and active-brick bookkeeping.
//!
//! [`BrickLayout`] turns the grid constants into cell rectangles; it is pure
//! and deterministic.  [`BrickGrid`] is the match resource that remembers
//! which cells are still standing.  The brick *entities* are spawned from the
//! grid by [`super::spawn::spawn_bricks`] and carry a [`Brick`] index back
//! into it.

use bevy::prelude::*;

/// Geometry of the brick grid, in field coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickLayout {
    pub rows: usize,
    pub cols: usize,
    /// Gap between bricks and between the outer columns and the side edges.
    pub spacing: f32,
    pub field_width: f32,
    pub brick_height: f32,
    /// Top edge of the first row.
    pub top: f32,
}

impl BrickLayout {
    /// Size shared by every brick: the field width minus `cols + 1` gaps,
    /// split evenly across the columns.
    pub fn brick_size(&self) -> Vec2 {
        let cols = self.cols as f32;
        let width = (self.field_width - (cols + 1.0) * self.spacing) / cols;
        Vec2::new(width, self.brick_height)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> Vec<BrickCell> {
        let size = self.brick_size();
        let mut cells = Vec::with_capacity(self.rows * self.cols);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let x = col as f32 * (size.x + self.spacing) + self.spacing + size.x / 2.0;
                let y = row as f32 * (size.y + self.spacing) + self.top + size.y / 2.0;
                cells.push(BrickCell {
                    row,
                    col,
                    center: Vec2::new(x, y),
                    size,
                });
            }
        }
        cells
    }
}

/// One slot of the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickCell {
    pub row: usize,
    pub col: usize,
    pub center: Vec2,
    pub size: Vec2,
}

impl BrickCell {
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }
}

/// Brick entity marker; `index` points into [`BrickGrid::cells`].
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brick {
    pub index: usize,
}

/// The live grid of a match.
///
/// A cell goes from active to inactive at most once; only [`BrickGrid::rebuild`]
/// brings cells back.
#[derive(Resource, Debug, Clone)]
pub struct BrickGrid {
    layout: BrickLayout,
    cells: Vec<BrickCell>,
    active: Vec<bool>,
    active_count: usize,
}

impl BrickGrid {
    pub fn new(layout: BrickLayout) -> Self {
        let cells = layout.cells();
        let count = cells.len();
        Self {
            layout,
            cells,
            active: vec![true; count],
            active_count: count,
        }
    }

    pub fn cells(&self) -> &[BrickCell] {
        &self.cells
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active.get(index).copied().unwrap_or(false)
    }

    /// Knock out the brick at `index`.
    ///
    /// Returns the number of bricks still standing, or `None` when the cell
    /// was already inactive (or out of range) and nothing changed.
    pub fn deactivate(&mut self, index: usize) -> Option<usize> {
        let slot = self.active.get_mut(index)?;
        if !*slot {
            return None;
        }
        *slot = false;
        self.active_count -= 1;
        Some(self.active_count)
    }

    /// Restore the grid to its freshly-built state.
    pub fn rebuild(&mut self) {
        *self = Self::new(self.layout);
    }
}
