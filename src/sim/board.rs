//! Piece lookup and drag candidate resolution
//!
//! The tricky part of Slide Escape: turning a raw pointer cell into a
//! legal piece position - axis pinning, board clamping, and whole-candidate
//! rejection on overlap.

use glam::IVec2;

use super::state::{Axis, Piece};
use crate::consts::GRID;

/// Find the piece whose rectangle contains `cell`.
///
/// Linear scan; the no-overlap invariant makes any hit unique, so order
/// does not matter.
pub fn piece_at(pieces: &[Piece], cell: IVec2) -> Option<usize> {
    pieces.iter().position(|p| p.contains_cell(cell))
}

/// Candidate origin for a dragged piece, given the pointer cell and the
/// grab offset recorded at selection.
///
/// Only the piece's free axis follows the pointer; the orthogonal axis is
/// pinned to the current value. The free axis is clamped to
/// `[0, GRID - extent]`, so the result is always in bounds.
pub fn slide_candidate(piece: &Piece, pointer_cell: IVec2, grab: IVec2) -> IVec2 {
    let desired = pointer_cell - grab;
    match piece.axis() {
        Axis::Horizontal => IVec2::new(desired.x.clamp(0, GRID - piece.w), piece.y),
        Axis::Vertical => IVec2::new(piece.x, desired.y.clamp(0, GRID - piece.h)),
    }
}

/// Whether the piece at `idx` can occupy `pos` without intersecting any
/// other piece.
///
/// Tests the candidate rectangle alone - no path sweep, no pushing. A
/// blocked candidate rejects the whole move.
pub fn placement_clear(pieces: &[Piece], idx: usize, pos: IVec2) -> bool {
    let piece = &pieces[idx];
    pieces
        .iter()
        .enumerate()
        .all(|(i, other)| i == idx || !piece.would_overlap(pos.x, pos.y, other))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{starting_layout, PieceColor};

    fn piece(id: char, x: i32, y: i32, w: i32, h: i32) -> Piece {
        Piece { id, color: PieceColor::Blue, x, y, w, h }
    }

    #[test]
    fn test_piece_at_hit_and_miss() {
        let pieces = starting_layout();

        // A spans (1,0)..(3,0)
        let a = piece_at(&pieces, IVec2::new(2, 0)).unwrap();
        assert_eq!(pieces[a].id, 'A');

        // H spans (2,3)..(2,4)
        let h = piece_at(&pieces, IVec2::new(2, 4)).unwrap();
        assert_eq!(pieces[h].id, 'H');

        // Empty cell
        assert!(piece_at(&pieces, IVec2::new(0, 0)).is_none());
        // Off-board cells never match
        assert!(piece_at(&pieces, IVec2::new(-1, 2)).is_none());
        assert!(piece_at(&pieces, IVec2::new(2, 9)).is_none());
    }

    #[test]
    fn test_slide_candidate_pins_orthogonal_axis() {
        let p = piece('A', 1, 0, 3, 1);
        // Pointer wanders down two rows; a horizontal piece ignores it
        let cand = slide_candidate(&p, IVec2::new(3, 2), IVec2::new(1, 0));
        assert_eq!(cand, IVec2::new(2, 0));

        let v = piece('D', 3, 1, 1, 2);
        let cand = slide_candidate(&v, IVec2::new(0, 3), IVec2::new(0, 1));
        assert_eq!(cand, IVec2::new(3, 2));
    }

    #[test]
    fn test_slide_candidate_clamps_to_board() {
        let p = piece('A', 1, 0, 3, 1);
        // Far right: clamp to GRID - w = 3
        assert_eq!(
            slide_candidate(&p, IVec2::new(40, 0), IVec2::ZERO),
            IVec2::new(3, 0)
        );
        // Far left, negative pointer cell
        assert_eq!(
            slide_candidate(&p, IVec2::new(-7, 0), IVec2::ZERO),
            IVec2::new(0, 0)
        );

        let v = piece('H', 2, 3, 1, 2);
        assert_eq!(
            slide_candidate(&v, IVec2::new(2, 11), IVec2::ZERO),
            IVec2::new(2, 4)
        );
    }

    #[test]
    fn test_placement_clear_rejects_overlap() {
        let pieces = starting_layout();
        let a = piece_at(&pieces, IVec2::new(1, 0)).unwrap();
        let b = piece_at(&pieces, IVec2::new(0, 2)).unwrap();
        assert_eq!(pieces[a].id, 'A');
        assert_eq!(pieces[b].id, 'B');

        // A has row 0 to itself
        assert!(placement_clear(&pieces, a, IVec2::new(0, 0)));
        assert!(placement_clear(&pieces, a, IVec2::new(3, 0)));

        // Any slide of B reaches (3,2), held by D
        assert!(!placement_clear(&pieces, b, IVec2::new(1, 2)));
        assert!(!placement_clear(&pieces, b, IVec2::new(3, 2)));

        // Staying put is always clear
        assert!(placement_clear(&pieces, b, pieces[b].pos()));
    }

    #[test]
    fn test_placement_clear_edge_adjacency() {
        // Touching edges is not overlap: [0,2) and [2,4) are disjoint
        let pieces = vec![piece('X', 0, 0, 2, 1), piece('Y', 3, 0, 2, 1)];
        assert!(placement_clear(&pieces, 1, IVec2::new(2, 0)));
        assert!(!placement_clear(&pieces, 1, IVec2::new(1, 0)));
    }
}
