//! Pointer event processing
//!
//! The whole game advances through `handle_pointer`: pointer-down selects,
//! pointer-move resolves a drag candidate, pointer-up finalizes the move
//! and checks for the win. Pure and synchronous - the host clock enters as
//! an explicit `now_ms` argument, so every path is testable off-browser.

use glam::Vec2;

use super::board::{piece_at, placement_clear, slide_candidate};
use super::state::{DragSession, GameEvent, GamePhase, GameState};
use crate::consts::GRID;
use crate::point_to_cell;

/// A pointer event in canvas-relative pixels.
///
/// Mouse and touch collapse to the same three shapes; release carries no
/// position because only the last committed position matters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Vec2),
    Move(Vec2),
    Up,
}

/// Advance the game state by one pointer event.
pub fn handle_pointer(state: &mut GameState, event: PointerEvent, now_ms: f64) {
    // Solved boards are frozen
    if state.phase == GamePhase::Solved {
        return;
    }

    match event {
        PointerEvent::Down(p) => {
            let cell = point_to_cell(p);
            // Presses in the header band or below the board never select;
            // out-of-range columns simply find no piece
            if cell.y >= 0 && cell.y < GRID {
                state.drag = piece_at(&state.pieces, cell).map(|idx| DragSession {
                    piece: idx,
                    grab: cell - state.pieces[idx].pos(),
                    start: state.pieces[idx].pos(),
                });
            }
        }
        PointerEvent::Move(p) => {
            let Some(drag) = state.drag else {
                return;
            };
            // The first drag-move starts the clock, even when the candidate
            // below is rejected
            state.clock.start(now_ms);

            let cell = point_to_cell(p);
            let piece = &state.pieces[drag.piece];
            let candidate = slide_candidate(piece, cell, drag.grab);
            if candidate != piece.pos() && placement_clear(&state.pieces, drag.piece, candidate) {
                let piece = &mut state.pieces[drag.piece];
                piece.x = candidate.x;
                piece.y = candidate.y;
            }
        }
        PointerEvent::Up => {
            let Some(drag) = state.drag.take() else {
                return;
            };
            if state.pieces[drag.piece].pos() != drag.start {
                state.moves += 1;
            }
            if state.is_solved() {
                state.clock.stop(now_ms);
                state.phase = GamePhase::Solved;
                state.events.push(GameEvent::Solved {
                    piece: super::state::TARGET_ID,
                    moves: state.moves,
                    elapsed_secs: state.clock.elapsed_secs(now_ms),
                });
                log::info!(
                    "solved in {} moves, {}s",
                    state.moves,
                    state.clock.elapsed_secs(now_ms)
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell_to_point;
    use crate::sim::state::{Axis, Piece, PieceColor, EXIT_CELL};
    use glam::IVec2;

    /// Center pixel of a cell (any point inside the cell maps back to it)
    fn px(cell: IVec2) -> Vec2 {
        cell_to_point(cell) + Vec2::splat(30.0)
    }

    fn down(state: &mut GameState, cell: IVec2) {
        handle_pointer(state, PointerEvent::Down(px(cell)), 0.0);
    }

    fn move_to(state: &mut GameState, cell: IVec2) {
        handle_pointer(state, PointerEvent::Move(px(cell)), 1_000.0);
    }

    fn up(state: &mut GameState) {
        handle_pointer(state, PointerEvent::Up, 2_000.0);
    }

    /// One full drag gesture grabbing the piece by its origin cell
    fn gesture(state: &mut GameState, id: char, to: IVec2) {
        let from = state.pieces.iter().find(|p| p.id == id).unwrap().pos();
        down(state, from);
        move_to(state, to);
        up(state);
    }

    fn piece_pos(state: &GameState, id: char) -> IVec2 {
        state.pieces.iter().find(|p| p.id == id).unwrap().pos()
    }

    #[test]
    fn test_down_selects_piece_under_cell() {
        let mut state = GameState::new();
        down(&mut state, IVec2::new(3, 0)); // middle cell of A
        let drag = state.drag.unwrap();
        assert_eq!(state.pieces[drag.piece].id, 'A');
        assert_eq!(drag.grab, IVec2::new(2, 0));
        assert_eq!(drag.start, IVec2::new(1, 0));
    }

    #[test]
    fn test_down_on_empty_cell_clears_selection() {
        let mut state = GameState::new();
        down(&mut state, IVec2::new(2, 0));
        assert!(state.drag.is_some());
        down(&mut state, IVec2::new(0, 0));
        assert!(state.drag.is_none());
    }

    #[test]
    fn test_down_outside_playable_rows_ignored() {
        let mut state = GameState::new();
        // Header band (row -1) and below the board (row 6)
        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(150.0, 30.0)), 0.0);
        assert!(state.drag.is_none());
        handle_pointer(&mut state, PointerEvent::Down(Vec2::new(150.0, 450.0)), 0.0);
        assert!(state.drag.is_none());
    }

    #[test]
    fn test_horizontal_piece_never_moves_vertically() {
        let mut state = GameState::new();
        down(&mut state, IVec2::new(1, 0)); // A, horizontal, row 0
        // Pointer dives four rows down and drifts right
        move_to(&mut state, IVec2::new(2, 4));
        assert_eq!(piece_pos(&state, 'A'), IVec2::new(2, 0));
        up(&mut state);
        assert_eq!(piece_pos(&state, 'A').y, 0);
    }

    #[test]
    fn test_blocked_candidate_rejected_entirely() {
        let mut state = GameState::new();
        // B (0,2) dragged right into D's column: candidate (3,2) overlaps D
        let before = state.pieces.clone();
        down(&mut state, IVec2::new(0, 2));
        move_to(&mut state, IVec2::new(3, 2));
        up(&mut state);
        assert_eq!(state.pieces, before);
        assert_eq!(state.moves, 0);
    }

    #[test]
    fn test_partial_slide_up_to_blocker() {
        let mut state = GameState::new();
        // G slides left along row 5 until F's foot blocks the last cell
        down(&mut state, IVec2::new(4, 5));
        move_to(&mut state, IVec2::new(1, 5));
        assert_eq!(piece_pos(&state, 'G'), IVec2::new(1, 5));
        move_to(&mut state, IVec2::new(0, 5));
        // Candidate (0,5) overlaps F - G stays at its last accepted position
        assert_eq!(piece_pos(&state, 'G'), IVec2::new(1, 5));
        up(&mut state);
        assert_eq!(state.moves, 1);
    }

    #[test]
    fn test_drag_update_idempotent() {
        let mut state = GameState::new();
        down(&mut state, IVec2::new(1, 0));
        move_to(&mut state, IVec2::new(2, 0));
        let once = piece_pos(&state, 'A');
        move_to(&mut state, IVec2::new(2, 0));
        assert_eq!(piece_pos(&state, 'A'), once);
    }

    #[test]
    fn test_move_counting() {
        let mut state = GameState::new();

        // down -> up with no movement: 0
        down(&mut state, IVec2::new(1, 0));
        up(&mut state);
        assert_eq!(state.moves, 0);

        // down -> move to a new cell -> up: exactly 1, not one per step
        down(&mut state, IVec2::new(1, 0));
        move_to(&mut state, IVec2::new(2, 0));
        move_to(&mut state, IVec2::new(3, 0));
        up(&mut state);
        assert_eq!(state.moves, 1);

        // out and back inside one gesture: net zero, no move counted
        down(&mut state, IVec2::new(2, 3));
        move_to(&mut state, IVec2::new(2, 4));
        move_to(&mut state, IVec2::new(2, 3));
        up(&mut state);
        assert_eq!(state.moves, 1);
    }

    #[test]
    fn test_up_without_selection_is_noop() {
        let mut state = GameState::new();
        up(&mut state);
        assert_eq!(state.moves, 0);
        assert!(state.drag.is_none());
    }

    #[test]
    fn test_clock_starts_on_first_drag_move_even_when_rejected() {
        let mut state = GameState::new();
        assert!(!state.clock.is_running());

        // Pointer-down alone does not start the clock
        down(&mut state, IVec2::new(0, 2));
        assert!(!state.clock.is_running());

        // A rejected drag-move still starts it
        handle_pointer(&mut state, PointerEvent::Move(px(IVec2::new(3, 2))), 5_000.0);
        assert_eq!(piece_pos(&state, 'B'), IVec2::new(0, 2));
        assert!(state.clock.is_running());
        assert_eq!(state.clock.elapsed_secs(8_500.0), 3);
    }

    #[test]
    fn test_win_fires_once_and_freezes_board() {
        // Minimal board: the target one cell below the exit
        let mut state = GameState::new();
        state.pieces = vec![Piece {
            id: 'H',
            color: PieceColor::Pink,
            x: EXIT_CELL.x,
            y: 1,
            w: 1,
            h: 2,
        }];

        down(&mut state, IVec2::new(2, 1));
        handle_pointer(&mut state, PointerEvent::Move(px(IVec2::new(2, 0))), 1_000.0);
        handle_pointer(&mut state, PointerEvent::Up, 61_000.0);

        assert_eq!(state.phase, GamePhase::Solved);
        let events = state.take_events();
        assert_eq!(
            events,
            vec![GameEvent::Solved { piece: 'H', moves: 1, elapsed_secs: 60 }]
        );

        // Frozen: further gestures change nothing and emit nothing
        down(&mut state, IVec2::new(2, 0));
        assert!(state.drag.is_none());
        handle_pointer(&mut state, PointerEvent::Move(px(IVec2::new(2, 3))), 99_000.0);
        handle_pointer(&mut state, PointerEvent::Up, 99_000.0);
        assert_eq!(piece_pos(&state, 'H'), EXIT_CELL);
        assert_eq!(state.moves, 1);
        assert!(state.take_events().is_empty());

        // The clock reading is frozen too
        assert_eq!(state.clock.elapsed_secs(999_000.0), 60);
    }

    #[test]
    fn test_solve_scenario() {
        // A known 20-drag solution of the shipped layout
        let solution: [(char, (i32, i32)); 20] = [
            ('A', (3, 0)),
            ('H', (2, 4)),
            ('C', (0, 3)),
            ('D', (3, 4)),
            ('B', (1, 2)),
            ('C', (1, 3)),
            ('F', (0, 0)),
            ('B', (0, 2)),
            ('C', (0, 3)),
            ('D', (3, 1)),
            ('C', (3, 3)),
            ('H', (2, 3)),
            ('G', (0, 5)),
            ('H', (2, 4)),
            ('C', (0, 3)),
            ('D', (3, 4)),
            ('E', (5, 4)),
            ('B', (3, 2)),
            ('C', (3, 3)),
            ('H', (2, 0)),
        ];

        let mut state = GameState::new();
        for (id, (x, y)) in solution {
            assert_eq!(state.phase, GamePhase::Playing);
            gesture(&mut state, id, IVec2::new(x, y));
            assert_eq!(piece_pos(&state, id), IVec2::new(x, y), "drag of {id} did not land");
        }

        assert_eq!(state.phase, GamePhase::Solved);
        assert_eq!(state.moves, 20);
        let events = state.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            GameEvent::Solved { piece: 'H', moves: 20, .. }
        ));
    }

    mod invariants {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Arbitrary gesture streams never break the board invariants:
            /// pieces stay in bounds, stay disjoint, and stay on their axis.
            #[test]
            fn random_gestures_preserve_invariants(
                gestures in prop::collection::vec((0usize..8, -2i32..8, -2i32..8), 0..64)
            ) {
                let mut state = GameState::new();
                let initial = state.pieces.clone();

                for (idx, tx, ty) in gestures {
                    let origin = state.pieces[idx].pos();
                    down(&mut state, origin);
                    move_to(&mut state, IVec2::new(tx, ty));
                    up(&mut state);

                    for (i, p) in state.pieces.iter().enumerate() {
                        prop_assert!(p.in_bounds(), "{} out of bounds", p.id);
                        match initial[i].axis() {
                            Axis::Horizontal => prop_assert_eq!(p.y, initial[i].y),
                            Axis::Vertical => prop_assert_eq!(p.x, initial[i].x),
                        }
                        for q in &state.pieces[i + 1..] {
                            prop_assert!(
                                !p.would_overlap(p.x, p.y, q),
                                "{} overlaps {}", p.id, q.id
                            );
                        }
                    }
                }
            }
        }
    }
}
