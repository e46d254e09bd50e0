//! Board drawing on a 2D canvas context

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{GameState, Piece};
use crate::{cell_to_point, sim::EXIT_CELL};

/// Immediate-mode renderer over a canvas 2D context
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    /// Draw one frame. `time_ms` drives the exit pulse animation.
    pub fn render(
        &self,
        state: &GameState,
        settings: &Settings,
        time_ms: f64,
    ) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let theme = settings.theme;
        let board_px = f64::from(GRID) * f64::from(CELL_SIZE);
        let offset_y = f64::from(BOARD_OFFSET_Y);

        ctx.clear_rect(0.0, 0.0, f64::from(CANVAS_WIDTH), f64::from(CANVAS_HEIGHT));

        // Board background
        ctx.set_fill_style_str(theme.board_fill());
        ctx.fill_rect(0.0, offset_y, board_px, board_px);

        if settings.show_grid_lines {
            self.draw_grid_lines(theme.grid_line(), board_px, offset_y);
        }

        self.draw_exit_marker(settings, time_ms)?;

        for piece in &state.pieces {
            self.draw_piece(piece, settings)?;
        }

        if settings.highlight_target && !state.is_solved() {
            if let Some(target) = state.target() {
                self.draw_target_outline(target)?;
            }
        }

        self.draw_frame(theme.frame(), board_px, offset_y);

        Ok(())
    }

    fn draw_grid_lines(&self, stroke: &str, board_px: f64, offset_y: f64) {
        let ctx = &self.ctx;
        ctx.set_stroke_style_str(stroke);
        ctx.set_line_width(0.5);
        for i in 0..=GRID {
            let step = f64::from(i) * f64::from(CELL_SIZE);
            ctx.begin_path();
            ctx.move_to(step, offset_y);
            ctx.line_to(step, board_px + offset_y);
            ctx.stroke();

            ctx.begin_path();
            ctx.move_to(0.0, step + offset_y);
            ctx.line_to(board_px, step + offset_y);
            ctx.stroke();
        }
    }

    /// Exit cell glow, arrow and label in the header band
    fn draw_exit_marker(&self, settings: &Settings, time_ms: f64) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let cell = f64::from(CELL_SIZE);
        let exit_x = f64::from(EXIT_CELL.x) * cell;
        let offset_y = f64::from(BOARD_OFFSET_Y);

        ctx.set_fill_style_str("rgba(255, 192, 203, 0.3)");
        ctx.fill_rect(exit_x, offset_y, cell, cell);

        let intensity = if settings.effective_exit_pulse() {
            0.5 + 0.2 * (time_ms / 300.0).sin()
        } else {
            0.5
        };
        ctx.set_fill_style_str(&format!("rgba(255, 192, 203, {intensity:.3})"));
        ctx.fill_rect(exit_x + 10.0, offset_y + 10.0, cell - 20.0, cell - 20.0);

        // Arrow pointing down at the exit
        ctx.set_fill_style_str("rgba(255, 0, 0, 0.7)");
        ctx.begin_path();
        ctx.move_to(exit_x + cell / 2.0, 30.0);
        ctx.line_to(exit_x + cell / 4.0, 45.0);
        ctx.line_to(exit_x + 3.0 * cell / 4.0, 45.0);
        ctx.close_path();
        ctx.fill();

        ctx.set_fill_style_str("red");
        ctx.set_font("bold 16px Arial");
        ctx.fill_text("EXIT", exit_x + 10.0, 20.0)?;

        Ok(())
    }

    fn draw_piece(&self, piece: &Piece, settings: &Settings) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let origin = cell_to_point(piece.pos());
        let (x, y) = (f64::from(origin.x), f64::from(origin.y));
        let w = f64::from(piece.w) * f64::from(CELL_SIZE);
        let h = f64::from(piece.h) * f64::from(CELL_SIZE);

        // Drop shadow
        ctx.set_fill_style_str("rgba(0,0,0,0.2)");
        ctx.fill_rect(x + 2.0, y + 2.0, w, h);

        let (light, dark) = settings.theme.piece_gradient(piece.color);
        let gradient = ctx.create_linear_gradient(x, y, x + w, y + h);
        gradient.add_color_stop(0.0, light)?;
        gradient.add_color_stop(1.0, dark)?;
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill_rect(x, y, w, h);

        ctx.set_stroke_style_str("rgba(0,0,0,0.5)");
        ctx.set_line_width(1.0);
        ctx.stroke_rect(x, y, w, h);

        Ok(())
    }

    /// Dashed outline marking the piece that has to escape
    fn draw_target_outline(&self, target: &Piece) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        let origin = cell_to_point(target.pos());
        let w = f64::from(target.w) * f64::from(CELL_SIZE);
        let h = f64::from(target.h) * f64::from(CELL_SIZE);

        ctx.set_stroke_style_str("red");
        ctx.set_line_width(2.0);
        ctx.set_line_dash(&js_sys::Array::of2(&5.0.into(), &3.0.into()))?;
        ctx.stroke_rect(
            f64::from(origin.x) - 2.0,
            f64::from(origin.y) - 2.0,
            w + 4.0,
            h + 4.0,
        );
        ctx.set_line_dash(&js_sys::Array::new())?;

        Ok(())
    }

    /// Board frame, with a gap in the top edge above the exit column
    fn draw_frame(&self, stroke: &str, board_px: f64, offset_y: f64) {
        let ctx = &self.ctx;
        let cell = f64::from(CELL_SIZE);
        let exit_x = f64::from(EXIT_CELL.x) * cell;

        ctx.set_stroke_style_str(stroke);
        ctx.set_line_width(8.0);

        ctx.begin_path();
        ctx.move_to(0.0, offset_y);
        ctx.line_to(0.0, board_px + offset_y);
        ctx.stroke();

        ctx.begin_path();
        ctx.move_to(board_px, offset_y);
        ctx.line_to(board_px, board_px + offset_y);
        ctx.stroke();

        ctx.begin_path();
        ctx.move_to(0.0, board_px + offset_y);
        ctx.line_to(board_px, board_px + offset_y);
        ctx.stroke();

        // Thinner top edge, interrupted over the exit
        ctx.set_line_width(4.0);
        ctx.begin_path();
        ctx.move_to(0.0, offset_y);
        ctx.line_to(exit_x, offset_y);
        ctx.stroke();

        ctx.begin_path();
        ctx.move_to(exit_x + cell, offset_y);
        ctx.line_to(board_px, offset_y);
        ctx.stroke();

        ctx.set_line_width(1.0);
    }
}
