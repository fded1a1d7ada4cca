//! Inverse moves.

use crate::action::{Move, Operator, ShiftAmount};
use crate::error::MoveError;
use crate::execute::occupied_span;
use crate::types::Stone;
use tracing::instrument;

/// Computes the move that reverts `mv`, given the stones it overwrote.
///
/// The inverse is always force-unlocked and tagged as an editing move; the
/// caller restores the way's previous lock flag itself.
///
/// # Errors
///
/// Returns [`MoveError::NoInverseAvailable`] for `Cut` and `Edit`, which
/// keep no record that could rebuild the previous board.
#[instrument(skip(overwritten), fields(code = %mv))]
pub fn inverse(mv: &Move, overwritten: &[Stone]) -> Result<Move, MoveError> {
    let way = mv.way();
    let unavailable = || MoveError::NoInverseAvailable(mv.code());

    let inverse = match mv.operator() {
        Operator::Shift(amount) => {
            let run = occupied_span(overwritten).ok_or_else(unavailable)?.len();
            let back = u8::try_from(run)
                .ok()
                .and_then(|run| run.checked_sub(amount.get()))
                .and_then(ShiftAmount::new)
                .ok_or_else(unavailable)?;
            Move::new(way, Operator::Shift(back))
        }
        Operator::Not => Move::new(way, Operator::Cut),
        Operator::NotLow | Operator::NotHigh => restore(mv, overwritten),
        Operator::Cut | Operator::Edit => return Err(unavailable()),
        _ if overwritten.is_empty() => Move::new(way, Operator::Cut),
        _ => restore(mv, overwritten),
    };
    Ok(inverse.with_force_unlock().as_edit())
}

fn restore(mv: &Move, overwritten: &[Stone]) -> Move {
    Move::new(mv.way(), Operator::Edit).with_stones(overwritten.to_vec())
}
