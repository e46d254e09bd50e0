//! Slide Escape - a Klotski-style sliding block puzzle
//!
//! Core modules:
//! - `sim`: Deterministic game logic (board, drag resolution, win detection)
//! - `renderer`: Canvas2D rendering (wasm only)
//! - `settings`: Player preferences
//! - `highscores`: Best completed-game results

pub mod highscores;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod renderer;

pub use highscores::BestResults;
pub use settings::{Settings, Theme};

use glam::{IVec2, Vec2};

/// Board layout constants
pub mod consts {
    /// Board side length in cells
    pub const GRID: i32 = 6;
    /// Cell edge length in canvas pixels
    pub const CELL_SIZE: f32 = 60.0;
    /// Height of the header band above the board (exit arrow lives here)
    pub const BOARD_OFFSET_Y: f32 = 60.0;

    /// Canvas logical width (GRID * CELL_SIZE)
    pub const CANVAS_WIDTH: u32 = 360;
    /// Canvas logical height (board plus header band)
    pub const CANVAS_HEIGHT: u32 = 420;
}

/// Map a canvas-relative point to a board cell.
///
/// Pure floor division - no clamping. Points above the board (the header
/// band) or outside the grid map to out-of-range cells; callers decide
/// which of those to ignore.
#[inline]
pub fn point_to_cell(p: Vec2) -> IVec2 {
    IVec2::new(
        (p.x / consts::CELL_SIZE).floor() as i32,
        ((p.y - consts::BOARD_OFFSET_Y) / consts::CELL_SIZE).floor() as i32,
    )
}

/// Top-left canvas pixel of a board cell.
#[inline]
pub fn cell_to_point(cell: IVec2) -> Vec2 {
    Vec2::new(
        cell.x as f32 * consts::CELL_SIZE,
        cell.y as f32 * consts::CELL_SIZE + consts::BOARD_OFFSET_Y,
    )
}
