//! Deterministic game logic
//!
//! All gameplay rules live here. This module must stay pure:
//! - No rendering or platform dependencies
//! - The host clock enters only as an explicit `now_ms` argument
//! - State changes only through `handle_pointer`

pub mod board;
pub mod input;
pub mod state;

pub use board::{piece_at, placement_clear, slide_candidate};
pub use input::{handle_pointer, PointerEvent};
pub use state::{
    format_clock, starting_layout, Axis, Clock, DragSession, GameEvent, GamePhase, GameState,
    Piece, PieceColor, EXIT_CELL, TARGET_ID,
};
