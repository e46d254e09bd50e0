//! Canvas2D rendering module
//!
//! The board is rectangles all the way down, so rendering goes straight to
//! the 2D canvas context - no GPU pipeline.

pub mod canvas;

pub use canvas::CanvasRenderer;
