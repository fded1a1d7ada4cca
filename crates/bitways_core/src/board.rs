//! The board: a position plus the history that produced it.
//!
//! A board remembers the snapshot it started from and every move pushed
//! since, each with the stones it overwrote. That record is enough to undo
//! any move exactly and to write the board out as its origin followed by
//! the move list.

use crate::action::Move;
use crate::error::{MoveError, ParseError};
use crate::execute;
use crate::inverse;
use crate::invariants::{BoardInvariants, InvariantSet, InvariantViolation};
use crate::movegen;
use crate::position::Snapshot;
use crate::rules::{self, GameStatus, WinProgress};
use crate::types::{Color, Stone};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, error, instrument, warn};

/// Keyword separating the origin position from the move list.
pub const MOVES_KEYWORD: &str = "moves";

/// One applied move and what it replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct HistoryEntry {
    /// The move as it was pushed.
    mv: Move,
    /// Previous content of the target way; empty if the way was empty.
    overwritten: Vec<Stone>,
    /// Lock flag of the target way before the move.
    was_locked: bool,
}

/// Game state with full history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    origin: Snapshot,
    position: Snapshot,
    history: Vec<HistoryEntry>,
    progress: WinProgress,
}

// ─────────────────────────────────────────────────────────────
//  Construction
// ─────────────────────────────────────────────────────────────

impl Board {
    /// Board at the canonical starting position.
    #[instrument]
    pub fn new() -> Self {
        Self::from_snapshot(Snapshot::start())
    }

    /// Board with an empty grid, Black to move.
    #[instrument]
    pub fn empty() -> Self {
        Self::from_snapshot(Snapshot::empty())
    }

    /// Board starting from an arbitrary position.
    ///
    /// Targets already on the grid are recorded at the move before the
    /// snapshot's move number.
    #[instrument(skip(snapshot), fields(position = %snapshot))]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut progress = WinProgress::new();
        progress.scan(&snapshot, snapshot.move_number().saturating_sub(1));
        Self {
            origin: snapshot.clone(),
            position: snapshot,
            history: Vec::new(),
            progress,
        }
    }

    /// Rebuilds a board by replaying moves from an origin.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MalformedPosition`] if any move does not apply.
    #[instrument(skip(origin, moves), fields(origin = %origin, count = moves.len()))]
    pub fn replay(origin: Snapshot, moves: &[Move]) -> Result<Self, ParseError> {
        let mut board = Self::from_snapshot(origin);
        for mv in moves {
            board.push(mv.clone()).map_err(|err| {
                ParseError::MalformedPosition(format!("move {mv} does not apply: {err}"))
            })?;
        }
        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────
//  Accessors
// ─────────────────────────────────────────────────────────────

impl Board {
    /// Current position.
    pub fn position(&self) -> &Snapshot {
        &self.position
    }

    /// Position the board started from.
    pub fn origin(&self) -> &Snapshot {
        &self.origin
    }

    /// Applied moves, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Move numbers at which clear targets were first reached.
    pub fn progress(&self) -> &WinProgress {
        &self.progress
    }

    /// Side to move.
    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    /// Number of the next move.
    pub fn move_number(&self) -> u32 {
        self.position.move_number()
    }

    /// Last applied move, if any.
    pub fn last_move(&self) -> Option<&Move> {
        self.history.last().map(HistoryEntry::mv)
    }

    /// ASCII rendering of the current position.
    pub fn diagram(&self) -> String {
        self.position.diagram()
    }

    #[cfg(test)]
    pub(crate) fn position_mut(&mut self) -> &mut Snapshot {
        &mut self.position
    }
}

// ─────────────────────────────────────────────────────────────
//  Moves
// ─────────────────────────────────────────────────────────────

impl Board {
    /// Applies a move.
    ///
    /// The turn passes and the move number advances for every move,
    /// editing moves included.
    ///
    /// # Errors
    ///
    /// Returns the [`MoveError`] of the first failed precondition; the board
    /// is unchanged in that case.
    #[instrument(skip(self, mv), fields(code = %mv, move_number = self.move_number()))]
    pub fn push(&mut self, mut mv: Move) -> Result<(), MoveError> {
        let number = self.position.move_number();
        if number.checked_add(1).is_none() {
            warn!("Move number exhausted");
            return Err(MoveError::MoveNumberExhausted(number));
        }
        let plan = execute::plan(&self.position, &mv)
            .inspect_err(|err| warn!(%err, "Move rejected"))?;

        let was_locked = self.position.is_locked(*plan.way());
        plan.commit(&mut self.position);
        self.position.advance();

        mv.clear_duplicate_of();
        self.history
            .push(HistoryEntry::new(mv, plan.overwritten(), was_locked));
        self.progress.scan(&self.position, number);

        debug!(locked = plan.locked(), "Move applied");
        Ok(())
    }

    /// Parses and applies a move code.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error`] wrapping either the parse or the move error.
    pub fn push_code(&mut self, code: &str) -> Result<(), crate::Error> {
        let mv = Move::parse(code)?;
        self.push(mv)?;
        Ok(())
    }

    /// Reverts the last move and returns it.
    ///
    /// The inverse move is executed force-unlocked, then the way's previous
    /// lock flag, the turn, the move number and the win progress are
    /// restored. The board afterwards equals the board before the move.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::NothingToUndo`] on an empty history and
    /// [`MoveError::NoInverseAvailable`] if the last move cannot be reversed.
    /// The board is unchanged on error.
    #[instrument(skip(self), fields(move_number = self.move_number()))]
    pub fn undo(&mut self) -> Result<Move, MoveError> {
        let entry = self.history.last().ok_or(MoveError::NothingToUndo)?;
        let inverse = inverse::inverse(entry.mv(), entry.overwritten())?;
        let plan = execute::plan(&self.position, &inverse).inspect_err(|err| {
            error!(%err, code = %inverse, "Inverse move failed to apply");
        })?;
        let was_locked = *entry.was_locked();

        plan.commit(&mut self.position);
        self.position.set_locked(*plan.way(), was_locked);
        self.position.retreat();

        let number = self.position.move_number();
        self.progress.clear_from(number);
        self.progress.scan(&self.position, number.saturating_sub(1));

        let entry = self.history.pop().ok_or(MoveError::NothingToUndo)?;
        debug!(code = %entry.mv(), inverse = %inverse, "Move undone");
        Ok(entry.mv().clone())
    }

    /// Playable moves for the side to move, without duplicate marking.
    pub fn playable_moves(&self) -> Vec<Move> {
        movegen::playable_moves(&self.position)
    }

    /// Editing moves applicable to the current position.
    pub fn edit_moves(&self) -> Vec<Move> {
        movegen::edit_moves(&self.position)
    }

    /// Playable moves with duplicates marked.
    ///
    /// Each move is simulated and undone; a move whose resulting position
    /// matches an earlier move's carries that move's code in
    /// [`Move::duplicate_of`]. The board is left as it was.
    #[instrument(skip(self), fields(move_number = self.move_number()))]
    pub fn legal_moves(&mut self) -> Vec<Move> {
        let mut moves = self.playable_moves();
        movegen::mark_duplicates(self, &mut moves);
        moves
    }

    /// Playable moves that lead to distinct positions.
    pub fn distinct_moves(&mut self) -> Vec<Move> {
        self.legal_moves()
            .into_iter()
            .filter(|mv| mv.duplicate_of().is_none())
            .collect()
    }

    /// Current game status.
    #[instrument(skip(self))]
    pub fn status(&self) -> GameStatus {
        rules::evaluate(&self.progress, movegen::has_playable_move(&self.position))
    }

    /// Checks the board's structural invariants.
    ///
    /// # Errors
    ///
    /// Returns every violated invariant.
    pub fn check_invariants(&self) -> Result<(), Vec<InvariantViolation>> {
        BoardInvariants::check_all(self)
    }
}

// ─────────────────────────────────────────────────────────────
//  Text form
// ─────────────────────────────────────────────────────────────

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.origin)?;
        if !self.history.is_empty() {
            write!(f, " {MOVES_KEYWORD}")?;
            for entry in &self.history {
                write!(f, " {}", entry.mv())?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseError;

    /// Parses `<position> [moves <code>...]` and replays the moves.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(' ').collect();
        if fields.len() < 4 {
            return Err(ParseError::MalformedPosition(format!(
                "expected at least 4 fields, got {}",
                fields.len()
            )));
        }
        let (head, tail) = fields.split_at(4);
        let origin: Snapshot = head.join(" ").parse()?;

        let codes = match tail.split_first() {
            None => &[][..],
            Some((&MOVES_KEYWORD, codes)) => codes,
            Some((other, _)) => {
                return Err(ParseError::MalformedPosition(format!(
                    "expected '{MOVES_KEYWORD}', got {other:?}"
                )));
            }
        };

        let moves = codes
            .iter()
            .map(|code| {
                Move::parse(code).map_err(|err| ParseError::MalformedPosition(err.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::replay(origin, &moves)
    }
}
