//! Game state module - manages the complete game state
//!
//! This module ties together the board, piece catalog, RNG, and scoring into
//! the session object the embedding shell drives. The shell owns the clock
//! and the scheduling primitive (a frame callback, a timer, or a test loop)
//! and pumps [`GameState::tick`] with timestamps; input events arrive as
//! synchronous calls between ticks.
//!
//! The lifecycle is an explicit phase machine:
//! `Stopped -> Playing <-> Paused`, `Playing -> GameOver`, and back to
//! `Playing` via [`GameState::start`], which resets the session first when
//! the game is over. A tick that observes any phase other than `Playing`
//! does nothing, so stale callbacks firing after a pause or reset cannot
//! mutate the session.

use crate::board::Board;
use crate::pieces::{create_piece, try_rotate, Matrix};
use crate::rng::PieceStream;
use crate::scoring::{drop_interval_ms, level_for_lines, line_clear_score, soft_drop_interval_ms};
use crate::types::{BoardPolicy, GameAction, GameRules, Phase, PieceKind};

/// The currently falling piece: shape matrix plus board-relative position
///
/// `(x, y)` locates the matrix's top-left cell; `y` counts down from the top
/// of the board. The matrix is a value swapped wholesale on rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub matrix: Matrix,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    /// Create a piece of the given kind, horizontally centered for a board
    /// of `board_width` columns
    pub fn new(kind: PieceKind, board_width: usize) -> Self {
        let matrix = create_piece(kind);
        let x = spawn_x(board_width, matrix.cols());
        Self {
            kind,
            matrix,
            x,
            y: 0,
        }
    }
}

/// Spawn column for a piece: board center minus half the matrix width,
/// both in integer division (x = 4 for the O piece on a 10-wide board)
fn spawn_x(board_width: usize, cols: usize) -> i32 {
    (board_width / 2) as i32 - (cols / 2) as i32
}

/// Complete game session state
///
/// Owns the board, the active and next pieces, and all counters; external
/// collaborators read through accessors or [`GameState::snapshot`] and
/// mutate only through the action methods.
#[derive(Debug, Clone)]
pub struct GameState {
    rules: GameRules,
    board: Board,
    stream: PieceStream,
    active: Option<ActivePiece>,
    next: Option<ActivePiece>,
    phase: Phase,
    score: u32,
    /// Best score seen; seeded by the persistence layer, survives resets
    high_score: u32,
    lines: u32,
    level: u32,
    drop_counter_ms: u32,
    last_time_ms: Option<u64>,
    soft_dropping: bool,
}

impl GameState {
    /// Create a new session with the default rules and the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_rules(seed, GameRules::default())
    }

    /// Create a new session with explicit rules
    pub fn with_rules(seed: u32, rules: GameRules) -> Self {
        let mut stream = PieceStream::new(seed);
        let next = ActivePiece::new(stream.draw(), rules.width);
        Self {
            rules,
            board: Board::new(rules.width, rules.height),
            stream,
            active: None,
            next: Some(next),
            phase: Phase::Stopped,
            score: 0,
            high_score: 0,
            lines: 0,
            level: 1,
            drop_counter_ms: 0,
            last_time_ms: None,
            soft_dropping: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Seed the stored best score (called by the persistence layer at
    /// startup; the core never performs storage I/O itself)
    pub fn set_high_score(&mut self, value: u32) {
        self.high_score = value.max(self.score);
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    /// The pre-generated piece shown in the preview box
    pub fn next(&self) -> Option<&ActivePiece> {
        self.next.as_ref()
    }

    /// Kind of the piece that will spawn next
    pub fn next_kind(&self) -> Option<PieceKind> {
        self.next.as_ref().map(|p| p.kind)
    }

    pub fn soft_dropping(&self) -> bool {
        self.soft_dropping
    }

    /// Current RNG state (restarting with this value replays the remainder
    /// of the piece sequence)
    pub fn seed(&self) -> u32 {
        self.stream.seed()
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Replace the preview piece (test setup helper)
    #[cfg(test)]
    pub fn force_next(&mut self, kind: PieceKind) {
        self.next = Some(ActivePiece::new(kind, self.rules.width));
    }

    /// Replace the falling piece with a fresh one at spawn (test setup helper)
    #[cfg(test)]
    pub fn force_active(&mut self, kind: PieceKind) {
        self.active = Some(ActivePiece::new(kind, self.rules.width));
    }

    /// Start playing
    ///
    /// No-op while already playing or paused. Starting from game over resets
    /// the session first (board, score, lines, level; the high score
    /// survives). Spawns the first piece and enters `Playing`.
    pub fn start(&mut self) {
        match self.phase {
            Phase::Playing | Phase::Paused => return,
            Phase::GameOver => self.reset(),
            Phase::Stopped => {}
        }
        self.phase = Phase::Playing;
        self.last_time_ms = None;
        self.drop_counter_ms = 0;
        self.spawn_piece();
    }

    /// Reset the session back to `Stopped`
    ///
    /// Clears the board and counters and regenerates the preview piece. The
    /// high score is the only value that survives.
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.next = Some(ActivePiece::new(self.stream.draw(), self.rules.width));
        self.phase = Phase::Stopped;
        self.score = 0;
        self.lines = 0;
        self.level = 1;
        self.drop_counter_ms = 0;
        self.last_time_ms = None;
        self.soft_dropping = false;
    }

    /// Pause (no-op unless playing)
    pub fn pause(&mut self) {
        if self.phase == Phase::Playing {
            self.phase = Phase::Paused;
        }
    }

    /// Resume from pause
    ///
    /// Clears the timestamp baseline so the first tick after resuming sees a
    /// zero delta instead of the whole pause duration.
    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            self.phase = Phase::Playing;
            self.last_time_ms = None;
        }
    }

    /// Toggle between playing and paused
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Playing => {
                self.pause();
                true
            }
            Phase::Paused => {
                self.resume();
                true
            }
            _ => false,
        }
    }

    /// Advance the simulation to `now_ms`
    ///
    /// No-op unless playing. Accumulates the elapsed time into the drop
    /// counter and applies one gravity step (via [`GameState::move_down`])
    /// when the counter exceeds the current interval. Returns true when the
    /// piece descended or locked this tick; rendering and rescheduling are
    /// the caller's concern either way.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }

        let delta = match self.last_time_ms {
            Some(prev) => now_ms.saturating_sub(prev),
            None => 0,
        };
        self.last_time_ms = Some(now_ms);
        self.drop_counter_ms = self
            .drop_counter_ms
            .saturating_add(delta.min(u32::MAX as u64) as u32);

        if self.drop_counter_ms > self.drop_interval_ms() {
            self.move_down();
            return true;
        }
        false
    }

    /// Current gravity interval: level-based, divided down while a soft drop
    /// is held
    pub fn drop_interval_ms(&self) -> u32 {
        let base = drop_interval_ms(self.level);
        if self.soft_dropping {
            soft_drop_interval_ms(base)
        } else {
            base
        }
    }

    /// Move the active piece one cell left; a blocked move is absorbed
    pub fn move_left(&mut self) -> bool {
        self.shift_horizontal(-1)
    }

    /// Move the active piece one cell right; a blocked move is absorbed
    pub fn move_right(&mut self) -> bool {
        self.shift_horizontal(1)
    }

    fn shift_horizontal(&mut self, dx: i32) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let board = &self.board;
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        if board.collides(&active.matrix, active.x + dx, active.y) {
            return false;
        }
        active.x += dx;
        true
    }

    /// Rotate the active piece 90 degrees
    ///
    /// A colliding orientation is kicked horizontally (bounded offset
    /// search); if no offset resolves it the rotation is a no-op.
    pub fn rotate(&mut self, clockwise: bool) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let board = &self.board;
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        let y = active.y;
        match try_rotate(&active.matrix, active.x, clockwise, |m, x| {
            board.collides(m, x, y)
        }) {
            Some((matrix, x)) => {
                active.matrix = matrix;
                active.x = x;
                true
            }
            None => false,
        }
    }

    /// Descend one row, locking on contact
    ///
    /// The single integration point for gravity ticks and the manual drop
    /// input: a blocked descent reverts the shift, merges the piece, sweeps
    /// full rows, scores them, and spawns the next piece. Returns true when
    /// the piece descended without locking.
    pub fn move_down(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.drop_counter_ms = 0;

        let board = &self.board;
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        if board.collides(&active.matrix, active.x, active.y + 1) {
            self.lock_active();
            return false;
        }
        active.y += 1;
        true
    }

    /// Drop the active piece straight to its rest position and lock it
    ///
    /// The descent loop is bounded by the board height: `collides` is
    /// guaranteed true once the piece reaches the floor.
    pub fn hard_drop(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.drop_counter_ms = 0;

        let board = &self.board;
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        while !board.collides(&active.matrix, active.x, active.y + 1) {
            active.y += 1;
        }
        self.lock_active();
        true
    }

    /// Hold or release the accelerated soft drop
    ///
    /// Engaging is honored only while playing; releasing always clears the
    /// flag so a key-up during a pause cannot leave the drop stuck on.
    pub fn set_soft_dropping(&mut self, on: bool) {
        if on {
            if self.phase == Phase::Playing {
                self.soft_dropping = true;
            }
        } else {
            self.soft_dropping = false;
        }
    }

    /// Merge the active piece, sweep and score full rows, spawn the next
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        let skipped = self.board.merge(&piece.matrix, piece.x, piece.y);
        if skipped > 0 && self.rules.strict_top_out {
            self.enter_game_over();
            return;
        }

        let cleared = self.board.sweep_full_rows(self.rules.sweep).len();
        if cleared > 0 {
            // Score with the level in effect when the lock happened, then
            // advance the level from the new line total
            self.score = self
                .score
                .saturating_add(line_clear_score(cleared, self.level, self.rules.scoring));
            self.lines += cleared as u32;
            self.level = level_for_lines(self.lines);
            self.bump_high_score();
        }

        self.spawn_piece();
    }

    /// Promote the preview piece to active and test it at the spawn position
    ///
    /// A colliding spawn is the sole game-over trigger.
    fn spawn_piece(&mut self) {
        let mut piece = self
            .next
            .take()
            .unwrap_or_else(|| ActivePiece::new(self.stream.draw(), self.rules.width));
        piece.x = spawn_x(self.rules.width, piece.matrix.cols());
        piece.y = 0;
        self.next = Some(ActivePiece::new(self.stream.draw(), self.rules.width));

        let blocked = self.board.collides(&piece.matrix, piece.x, piece.y);
        self.active = Some(piece);
        if blocked {
            self.enter_game_over();
        }
    }

    fn enter_game_over(&mut self) {
        self.bump_high_score();
        self.phase = Phase::GameOver;
        self.soft_dropping = false;
        if self.rules.on_game_over == BoardPolicy::Clear {
            self.board.clear();
            self.active = None;
            self.score = 0;
        }
    }

    fn bump_high_score(&mut self) {
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    /// Apply a game action from the input layer
    ///
    /// Returns whether the action changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::RotateCw => self.rotate(true),
            GameAction::RotateCcw => self.rotate(false),
            GameAction::MoveDown => self.move_down(),
            GameAction::SoftDropPressed => {
                self.set_soft_dropping(true);
                self.soft_dropping
            }
            GameAction::SoftDropReleased => {
                self.set_soft_dropping(false);
                true
            }
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Start => {
                self.start();
                self.phase == Phase::Playing
            }
            GameAction::Pause => {
                let was = self.phase;
                self.pause();
                was != self.phase
            }
            GameAction::Resume => {
                let was = self.phase;
                self.resume();
                was != self.phase
            }
            GameAction::TogglePause => self.toggle_pause(),
            GameAction::Reset => {
                self.reset();
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
