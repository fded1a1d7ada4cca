//! Clear targets and win progress.
//!
//! Each colour has three clear targets. Black needs three in a row along a
//! rank, four on a diagonal and five along a file. White mirrors this with
//! three along a file, four on a diagonal and five along a rank.

use crate::coord::{FILES, RANKS, Square};
use crate::position::Snapshot;
use crate::types::Color;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Step along a rank (increasing file).
const ALONG_RANK: &[(i8, i8)] = &[(1, 0)];
/// Step along a file (increasing rank).
const ALONG_FILE: &[(i8, i8)] = &[(0, 1)];
/// Both diagonal steps.
const DIAGONAL: &[(i8, i8)] = &[(1, 1), (1, -1)];

/// One of the six clear targets, in progress-slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Target {
    /// Three Black stones in a row along a rank.
    B3,
    /// Four Black stones on a diagonal.
    B4,
    /// Five Black stones along a file.
    B5,
    /// Three White stones along a file.
    W3,
    /// Four White stones on a diagonal.
    W4,
    /// Five White stones in a row along a rank.
    W5,
}

impl Target {
    /// Colour whose stones form the target.
    pub fn color(self) -> Color {
        match self {
            Target::B3 | Target::B4 | Target::B5 => Color::Black,
            Target::W3 | Target::W4 | Target::W5 => Color::White,
        }
    }

    /// Number of stones in the line.
    pub fn length(self) -> usize {
        match self {
            Target::B3 | Target::W3 => 3,
            Target::B4 | Target::W4 => 4,
            Target::B5 | Target::W5 => 5,
        }
    }

    fn steps(self) -> &'static [(i8, i8)] {
        match self {
            Target::B3 | Target::W5 => ALONG_RANK,
            Target::B5 | Target::W3 => ALONG_FILE,
            Target::B4 | Target::W4 => DIAGONAL,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// First square (rank-major scan) starting a line that satisfies `target`.
#[instrument(skip(snapshot))]
pub fn find_target(snapshot: &Snapshot, target: Target) -> Option<Square> {
    let stone = target.color().stone();
    for rank in 0..RANKS {
        for file in 0..FILES {
            let start = Square::at(file, rank);
            for &(df, dr) in target.steps() {
                let complete = (0..target.length() as i8).all(|i| {
                    start
                        .offset(df * i, dr * i)
                        .is_some_and(|sq| snapshot.get(sq) == stone)
                });
                if complete {
                    return Some(start);
                }
            }
        }
    }
    None
}

/// Move number at which each clear target was first observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinProgress {
    slots: [Option<u32>; 6],
}

impl WinProgress {
    /// Progress with every slot unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move number recorded for a target.
    pub fn slot(&self, target: Target) -> Option<u32> {
        self.slots[target.slot()]
    }

    /// Whether all three targets of `color` are recorded.
    pub fn completed(&self, color: Color) -> bool {
        Target::iter()
            .filter(|t| t.color() == color)
            .all(|t| self.slot(t).is_some())
    }

    /// Records `at` for every unset target that now holds.
    ///
    /// Set slots are left alone, so forward play never clears progress.
    #[instrument(skip(self, snapshot))]
    pub fn scan(&mut self, snapshot: &Snapshot, at: u32) {
        for target in Target::iter() {
            if self.slot(target).is_some() {
                continue;
            }
            if let Some(square) = find_target(snapshot, target) {
                debug!(?target, %square, at, "Clear target reached");
                self.slots[target.slot()] = Some(at);
            }
        }
    }

    /// Unsets every slot recorded at move `number` or later.
    pub fn clear_from(&mut self, number: u32) {
        for slot in &mut self.slots {
            if slot.is_some_and(|at| at >= number) {
                *slot = None;
            }
        }
    }
}
