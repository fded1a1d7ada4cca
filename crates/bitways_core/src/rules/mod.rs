//! Game rules: clear targets and terminal states.
//!
//! Rules are pure functions over positions and win progress, kept apart
//! from board storage so the board and the policy layer can share them.

pub mod status;
pub mod win;

pub use status::{GameStatus, evaluate};
pub use win::{Target, WinProgress, find_target};
