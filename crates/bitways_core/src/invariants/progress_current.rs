//! Win progress stays current.

use super::Invariant;
use crate::board::Board;
use crate::rules::{Target, find_target};
use strum::IntoEnumIterator;

/// Invariant: every clear target present on the grid has its slot set.
pub struct ProgressCurrentInvariant;

impl Invariant<Board> for ProgressCurrentInvariant {
    fn holds(board: &Board) -> bool {
        Target::iter().all(|target| {
            find_target(board.position(), target).is_none()
                || board.progress().slot(target).is_some()
        })
    }

    fn description() -> &'static str {
        "Every clear target on the grid is recorded in the win progress"
    }
}
