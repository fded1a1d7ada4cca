//! Operator execution.
//!
//! Execution is split in two steps. [`plan`] checks every precondition and
//! computes the new contents of the target way without touching the
//! position; the board then commits the plan. A rejected move therefore
//! never leaves a partial write behind.

use crate::action::{Move, Operator};
use crate::coord::Way;
use crate::error::MoveError;
use crate::position::Snapshot;
use crate::types::Stone;
use derive_getters::Getters;
use std::ops::Range;
use tracing::instrument;

/// Fully validated effect of a move on its target way.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Plan {
    /// Target way.
    way: Way,
    /// Stones on the way before the move.
    before: Vec<Stone>,
    /// Stones on the way after the move.
    after: Vec<Stone>,
    /// Lock flag of the way after the move.
    locked: bool,
}

impl Plan {
    /// Stones the move overwrites: the whole previous way, or nothing if the
    /// way was empty.
    pub fn overwritten(&self) -> Vec<Stone> {
        if self.before.iter().any(|s| s.is_occupied()) {
            self.before.clone()
        } else {
            Vec::new()
        }
    }

    /// Writes the plan into a position.
    pub(crate) fn commit(&self, position: &mut Snapshot) {
        position.set_line(self.way, &self.after);
        position.set_locked(self.way, self.locked);
    }
}

/// Span from the first to the last occupied cell of a line.
pub fn occupied_span(line: &[Stone]) -> Option<Range<usize>> {
    let first = line.iter().position(|s| s.is_occupied())?;
    let last = line.iter().rposition(|s| s.is_occupied())?;
    Some(first..last + 1)
}

/// Checks a move against a position and computes its effect.
///
/// # Errors
///
/// Returns the first violated precondition; the position is never modified.
#[instrument(skip(position), fields(code = %mv))]
pub fn plan(position: &Snapshot, mv: &Move) -> Result<Plan, MoveError> {
    let way = mv.way();
    let before = position.line(way);
    let occupied = before.iter().any(|s| s.is_occupied());
    let sticky = !mv.force_unlock();

    let (after, locked) = match mv.operator() {
        Operator::Cut => {
            if !occupied {
                return Err(MoveError::EmptyWay(way));
            }
            (vec![Stone::Empty; way.len()], sticky)
        }
        Operator::Edit => (edit_line(way, &before, mv.stones())?, occupied && sticky),
        Operator::Shift(amount) => (shift_line(way, &before, amount.get())?, sticky),
        op @ (Operator::Not | Operator::NotLow | Operator::NotHigh) => {
            let source = unary_source(position, way, op)?;
            let mut after = before.clone();
            for (cell, src) in after.iter_mut().zip(position.line(source)) {
                if src.is_occupied() {
                    *cell = src.inverted();
                }
            }
            (after, occupied && sticky)
        }
        op => {
            if position.is_locked(way) && !mv.is_edit() {
                return Err(MoveError::WayLocked(way));
            }
            let (a, b) = input_ways(position, way)?;
            let mut after = before.clone();
            let mut written = false;
            for ((cell, x), y) in after.iter_mut().zip(position.line(a)).zip(position.line(b)) {
                let (Some(x), Some(y)) = (x.bit(), y.bit()) else {
                    continue;
                };
                let Some(bit) = op.eval(x, y) else {
                    continue;
                };
                *cell = Stone::from_bit(bit);
                written = true;
            }
            if !written {
                return Err(MoveError::NoValidInputPair(way));
            }
            (after, occupied && sticky)
        }
    };

    Ok(Plan {
        way,
        before,
        after,
        locked,
    })
}

/// Source way of a unary operator.
///
/// `Not` creates on an empty way and reads whichever neighbour is occupied,
/// the lower one first. `NotLow`/`NotHigh` modify an occupied way and read
/// the named neighbour.
///
/// # Errors
///
/// Returns [`MoveError::NoValidSource`] if the operator does not fit the
/// way's state or the neighbour it needs is empty or missing.
pub fn unary_source(position: &Snapshot, way: Way, op: Operator) -> Result<Way, MoveError> {
    let occupied = |w: Option<Way>| w.filter(|w| position.is_occupied(*w));
    let target_occupied = position.is_occupied(way);
    let source = match op {
        Operator::Not if !target_occupied => {
            occupied(way.low(1)).or_else(|| occupied(way.high(1)))
        }
        Operator::NotLow if target_occupied => occupied(way.low(1)),
        Operator::NotHigh if target_occupied => occupied(way.high(1)),
        _ => None,
    };
    source.ok_or(MoveError::NoValidSource(way))
}

/// Input ways of a binary operator.
///
/// An occupied way reads its two immediate neighbours. An empty way reads
/// the two nearest ways on its low side, or failing that on its high side.
///
/// # Errors
///
/// Returns [`MoveError::NoValidInputPair`] if no such pair is occupied.
pub fn input_ways(position: &Snapshot, way: Way) -> Result<(Way, Way), MoveError> {
    let occupied = |w: Option<Way>| w.filter(|w| position.is_occupied(*w));
    let pair = if position.is_occupied(way) {
        occupied(way.low(1)).zip(occupied(way.high(1)))
    } else {
        occupied(way.low(1))
            .zip(occupied(way.low(2)))
            .or_else(|| occupied(way.high(1)).zip(occupied(way.high(2))))
    };
    pair.ok_or(MoveError::NoValidInputPair(way))
}

fn edit_line(way: Way, before: &[Stone], stones: Option<&[Stone]>) -> Result<Vec<Stone>, MoveError> {
    let stones = stones.unwrap_or_default();
    if stones.len() == way.len() {
        return Ok(stones.to_vec());
    }
    match occupied_span(before) {
        Some(span) if span.len() == stones.len() => {
            let mut after = before.to_vec();
            after[span].copy_from_slice(stones);
            Ok(after)
        }
        _ => Err(MoveError::LengthMismatch {
            way,
            expected: way.len(),
            found: stones.len(),
        }),
    }
}

fn shift_line(way: Way, before: &[Stone], amount: u8) -> Result<Vec<Stone>, MoveError> {
    let span = occupied_span(before).ok_or(MoveError::EmptyWay(way))?;
    let invalid = || MoveError::InvalidShift {
        way,
        amount,
        run: span.len(),
    };
    if amount == 0 || amount as usize >= span.len() {
        return Err(invalid());
    }

    let mut after = before.to_vec();
    for from in span.clone() {
        let to = (from - span.start + amount as usize) % span.len() + span.start;
        after[to] = before[from];
    }

    // The rotated run must still start and end on a stone, otherwise the
    // complementary shift would act on a shorter run.
    if !after[span.start].is_occupied() || !after[span.end - 1].is_occupied() {
        return Err(invalid());
    }
    Ok(after)
}
