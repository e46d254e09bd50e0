//! Game state and core board types
//!
//! Everything the renderer and shell observe lives here.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::GRID;

/// The piece that must reach [`EXIT_CELL`] to win
pub const TARGET_ID: char = 'H';

/// Cell the target piece's origin must reach
pub const EXIT_CELL: IVec2 = IVec2::new(2, 0);

/// Axis a piece is allowed to slide along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Piece color group (selects the render gradient)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceColor {
    Blue,
    Green,
    Pink,
}

/// A rectangular block on the board, in grid-cell units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub id: char,
    pub color: PieceColor,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Piece {
    /// Movement axis, derived from shape: wider than tall slides
    /// horizontally, everything else vertically.
    pub fn axis(&self) -> Axis {
        if self.w > self.h {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }

    /// Grid-cell origin
    pub fn pos(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    /// Whether `cell` lies inside `[x, x+w) x [y, y+h)`
    pub fn contains_cell(&self, cell: IVec2) -> bool {
        cell.x >= self.x && cell.x < self.x + self.w && cell.y >= self.y && cell.y < self.y + self.h
    }

    /// AABB overlap test against another piece at this piece's size but
    /// candidate origin `(nx, ny)`.
    pub fn would_overlap(&self, nx: i32, ny: i32, other: &Piece) -> bool {
        nx < other.x + other.w && nx + self.w > other.x && ny < other.y + other.h && ny + self.h > other.y
    }

    /// Whether the piece fits inside the board at its current origin
    pub fn in_bounds(&self) -> bool {
        self.x >= 0 && self.y >= 0 && self.x + self.w <= GRID && self.y + self.h <= GRID
    }
}

/// Ephemeral drag state, created on pointer-down over a piece and
/// consumed on pointer-up
#[derive(Debug, Clone, Copy)]
pub struct DragSession {
    /// Index into `GameState::pieces`
    pub piece: usize,
    /// Cell delta between the pointer and the piece origin at selection
    pub grab: IVec2,
    /// Piece origin at selection, for did-a-move-occur detection
    pub start: IVec2,
}

/// Whole-game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Accepting drags
    Playing,
    /// Target reached the exit; the board is frozen
    Solved,
}

/// One-shot notifications drained by the shell
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The target piece reached the exit cell
    Solved {
        piece: char,
        moves: u32,
        elapsed_secs: u64,
    },
}

/// Elapsed-time clock driven by the host's millisecond timestamps.
///
/// Starts on the first drag-move of the session, stops permanently on win.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Clock {
    started_ms: Option<f64>,
    stopped_ms: Option<f64>,
}

impl Clock {
    /// Start the clock if it is not already running. Idempotent.
    pub fn start(&mut self, now_ms: f64) {
        if self.started_ms.is_none() {
            self.started_ms = Some(now_ms);
        }
    }

    /// Freeze the clock. Later `elapsed_secs` calls ignore `now_ms`.
    pub fn stop(&mut self, now_ms: f64) {
        if self.started_ms.is_some() && self.stopped_ms.is_none() {
            self.stopped_ms = Some(now_ms);
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_ms.is_some() && self.stopped_ms.is_none()
    }

    /// Whole seconds since the clock started (0 before the first drag-move)
    pub fn elapsed_secs(&self, now_ms: f64) -> u64 {
        let Some(start) = self.started_ms else {
            return 0;
        };
        let end = self.stopped_ms.unwrap_or(now_ms);
        (((end - start) / 1000.0).floor()).max(0.0) as u64
    }
}

/// Render whole seconds as `MM:SS` (minutes widen past 59 instead of
/// wrapping)
pub fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Complete game state observed by the renderer and shell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// All pieces; rectangles are pairwise disjoint at every settled state
    pub pieces: Vec<Piece>,
    /// Current phase
    pub phase: GamePhase,
    /// Completed drags that changed a piece's position
    pub moves: u32,
    /// Elapsed-time clock
    pub clock: Clock,
    /// Active drag, if any
    #[serde(skip)]
    pub drag: Option<DragSession>,
    /// Pending notifications (drained by the shell)
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a game with the fixed starting layout.
    pub fn new() -> Self {
        Self {
            pieces: starting_layout(),
            phase: GamePhase::Playing,
            moves: 0,
            clock: Clock::default(),
            drag: None,
            events: Vec::new(),
        }
    }

    /// The distinguished piece that must reach the exit
    pub fn target(&self) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == TARGET_ID)
    }

    /// Whether the target piece sits on the exit cell
    pub fn is_solved(&self) -> bool {
        self.target().is_some_and(|p| p.pos() == EXIT_CELL)
    }

    /// Drain pending events for the shell
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// The shipped puzzle: three blue bars, four green blocks, and the pink
/// target two columns in from the left, two rows above the bottom.
pub fn starting_layout() -> Vec<Piece> {
    use PieceColor::*;
    vec![
        Piece { id: 'A', color: Blue, x: 1, y: 0, w: 3, h: 1 },
        Piece { id: 'B', color: Blue, x: 0, y: 2, w: 3, h: 1 },
        Piece { id: 'C', color: Blue, x: 3, y: 3, w: 3, h: 1 },
        Piece { id: 'D', color: Green, x: 3, y: 1, w: 1, h: 2 },
        Piece { id: 'E', color: Green, x: 5, y: 1, w: 1, h: 2 },
        Piece { id: 'F', color: Green, x: 0, y: 4, w: 1, h: 2 },
        Piece { id: 'G', color: Green, x: 4, y: 5, w: 2, h: 1 },
        Piece { id: 'H', color: Pink, x: 2, y: 3, w: 1, h: 2 },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_layout_valid() {
        let pieces = starting_layout();
        assert!(pieces.iter().all(Piece::in_bounds));
        for (i, a) in pieces.iter().enumerate() {
            for b in &pieces[i + 1..] {
                assert!(
                    !a.would_overlap(a.x, a.y, b),
                    "pieces {} and {} overlap",
                    a.id,
                    b.id
                );
            }
        }
    }

    #[test]
    fn test_axis_derivation() {
        let pieces = starting_layout();
        let axis_of = |id: char| pieces.iter().find(|p| p.id == id).unwrap().axis();
        assert_eq!(axis_of('A'), Axis::Horizontal);
        assert_eq!(axis_of('G'), Axis::Horizontal);
        assert_eq!(axis_of('D'), Axis::Vertical);
        assert_eq!(axis_of('H'), Axis::Vertical);
    }

    #[test]
    fn test_clock_lifecycle() {
        let mut clock = Clock::default();
        assert_eq!(clock.elapsed_secs(99_999.0), 0);

        clock.start(1_000.0);
        clock.start(5_000.0); // second start is a no-op
        assert!(clock.is_running());
        assert_eq!(clock.elapsed_secs(4_500.0), 3);

        clock.stop(11_000.0);
        assert!(!clock.is_running());
        // Frozen: later timestamps do not change the reading
        assert_eq!(clock.elapsed_secs(60_000.0), 10);
        assert_eq!(clock.elapsed_secs(999_000.0), 10);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(600), "10:00");
        assert_eq!(format_clock(3700), "61:40");
    }
}
