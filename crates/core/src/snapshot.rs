//! Read-only frame snapshots for the renderer
//!
//! The renderer reads a consistent view of the session once per frame and
//! never mutates core state. [`GameState::snapshot_into`] refills an existing
//! snapshot so a render loop can reuse one buffer; [`GameState::snapshot`]
//! is the convenience allocating form.

use crate::game_state::{ActivePiece, GameState};
use crate::pieces::Matrix;
use crate::types::{Cell, Phase, PieceKind};

/// A piece as the renderer sees it: kind, shape, board position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub matrix: Matrix,
    pub x: i32,
    pub y: i32,
}

impl From<&ActivePiece> for PieceSnapshot {
    fn from(piece: &ActivePiece) -> Self {
        Self {
            kind: piece.kind,
            matrix: piece.matrix.clone(),
            x: piece.x,
            y: piece.y,
        }
    }
}

/// Everything a frame needs: board contents, pieces, counters, phase
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Locked cells, row-major (the active piece is not merged in)
    pub cells: Vec<Cell>,
    pub active: Option<PieceSnapshot>,
    /// The preview piece, positioned at its future spawn column
    pub next: Option<PieceSnapshot>,
    pub phase: Phase,
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    pub lines: u32,
    pub soft_dropping: bool,
}

impl GameSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether input and gravity are currently being honored
    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing
    }
}

impl GameState {
    /// Refill `out` with the current frame state, reusing its buffers
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board().width();
        out.height = self.board().height();
        out.cells.clear();
        out.cells.extend_from_slice(self.board().cells());
        out.active = self.active().map(PieceSnapshot::from);
        out.next = self.next().map(PieceSnapshot::from);
        out.phase = self.phase();
        out.score = self.score();
        out.high_score = self.high_score();
        out.level = self.level();
        out.lines = self.lines();
        out.soft_dropping = self.soft_dropping();
    }

    /// Allocate a fresh snapshot of the current frame state
    pub fn snapshot(&self) -> GameSnapshot {
        let mut out = GameSnapshot::new();
        self.snapshot_into(&mut out);
        out
    }
}
