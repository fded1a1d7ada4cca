//! Moves and the move-code grammar.
//!
//! A move code is
//!
//! ```text
//! &? [1-7a-f] stem #? ($[.01]+)?
//! ```
//!
//! where `&` marks an edit-only move, `#` forces the target way unlocked and
//! `$...` supplies explicit stones. Stems are matched longest first, so
//! `4no` is a NOR on file 4 and never NOT followed by garbage.

use crate::coord::Way;
use crate::error::ParseError;
use crate::types::{Stone, payload_to_stones, stones_to_payload};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

/// Number of input ways an operator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// No input way.
    Nullary,
    /// One input way, chosen by the operator.
    Unary,
    /// Two input ways.
    Binary,
}

/// What a move does to its target way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Clears the way. Editing and undo only.
    Cut,
    /// Overwrites the way with explicit stones.
    Edit,
    /// Rotates the occupied run by the given amount.
    Shift(ShiftAmount),
    /// Creates an inverted copy of the occupied neighbour.
    Not,
    /// Inverts the lower neighbour onto the occupied way.
    NotLow,
    /// Inverts the higher neighbour onto the occupied way.
    NotHigh,
    /// Bitwise AND of the inputs.
    And,
    /// Bitwise OR of the inputs.
    Or,
    /// Bitwise XOR of the inputs.
    Xor,
    /// Bitwise NAND of the inputs.
    Nand,
    /// Bitwise NOR of the inputs.
    Nor,
    /// Bitwise XNOR of the inputs.
    Xnor,
    /// Writes White wherever both inputs are present. Editing only.
    Zero,
    /// Writes Black wherever both inputs are present. Editing only.
    One,
}

/// Rotation distance of a shift, always in `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShiftAmount(u8);

impl ShiftAmount {
    /// Largest shift amount in the grammar.
    pub const MAX: u8 = 6;

    /// Checked constructor; `None` outside `1..=6`.
    pub fn new(amount: u8) -> Option<Self> {
        (1..=Self::MAX).contains(&amount).then_some(Self(amount))
    }

    /// Every amount, smallest first.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=Self::MAX).map(Self)
    }

    /// The amount as a number.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for ShiftAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

const SHIFT_STEMS: [&str; ShiftAmount::MAX as usize] = ["s1", "s2", "s3", "s4", "s5", "s6"];

/// Stems in matching order: every two-character stem precedes the
/// one-character stems it starts with.
const STEMS: [(&str, Operator); 19] = [
    ("na", Operator::Nand),
    ("nH", Operator::NotHigh),
    ("nL", Operator::NotLow),
    ("no", Operator::Nor),
    ("on", Operator::One),
    ("s1", Operator::Shift(ShiftAmount(1))),
    ("s2", Operator::Shift(ShiftAmount(2))),
    ("s3", Operator::Shift(ShiftAmount(3))),
    ("s4", Operator::Shift(ShiftAmount(4))),
    ("s5", Operator::Shift(ShiftAmount(5))),
    ("s6", Operator::Shift(ShiftAmount(6))),
    ("xn", Operator::Xnor),
    ("xo", Operator::Xor),
    ("ze", Operator::Zero),
    ("a", Operator::And),
    ("c", Operator::Cut),
    ("e", Operator::Edit),
    ("n", Operator::Not),
    ("o", Operator::Or),
];

impl Operator {
    /// Binary operators offered in play, in generation order.
    pub const PLAYABLE_BINARY: [Operator; 6] = [
        Operator::And,
        Operator::Or,
        Operator::Xor,
        Operator::Nand,
        Operator::Nor,
        Operator::Xnor,
    ];

    /// The operator's stem in a move code.
    pub fn stem(self) -> &'static str {
        match self {
            Operator::Cut => "c",
            Operator::Edit => "e",
            Operator::Shift(amount) => SHIFT_STEMS[usize::from(amount.0 - 1)],
            Operator::Not => "n",
            Operator::NotLow => "nL",
            Operator::NotHigh => "nH",
            Operator::And => "a",
            Operator::Or => "o",
            Operator::Xor => "xo",
            Operator::Nand => "na",
            Operator::Nor => "no",
            Operator::Xnor => "xn",
            Operator::Zero => "ze",
            Operator::One => "on",
        }
    }

    /// Number of inputs, derived from the stem.
    pub fn arity(self) -> Arity {
        match self {
            Operator::Cut | Operator::Edit | Operator::Shift(_) => Arity::Nullary,
            Operator::Not | Operator::NotLow | Operator::NotHigh => Arity::Unary,
            _ => Arity::Binary,
        }
    }

    /// Whether the operator is reserved for board editing.
    pub fn is_editing(self) -> bool {
        matches!(
            self,
            Operator::Cut | Operator::Edit | Operator::Zero | Operator::One
        )
    }

    /// Evaluates a binary operator on two bits. `None` for other arities.
    pub fn eval(self, a: bool, b: bool) -> Option<bool> {
        match self {
            Operator::And => Some(a & b),
            Operator::Or => Some(a | b),
            Operator::Xor => Some(a ^ b),
            Operator::Nand => Some(!(a & b)),
            Operator::Nor => Some(!(a | b)),
            Operator::Xnor => Some(!(a ^ b)),
            Operator::Zero => Some(false),
            Operator::One => Some(true),
            _ => None,
        }
    }
}

/// A parsed move.
///
/// `duplicate_of` is never set by parsing; the legal move generator fills it
/// when an earlier move in the same list reaches the same position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Move {
    way: Way,
    operator: Operator,
    force_unlock: bool,
    stones: Option<Vec<Stone>>,
    is_edit: bool,
    duplicate_of: Option<String>,
}

impl Move {
    /// Creates a playable move without flags or stones.
    #[instrument]
    pub fn new(way: Way, operator: Operator) -> Self {
        Self {
            way,
            operator,
            force_unlock: false,
            stones: None,
            is_edit: false,
            duplicate_of: None,
        }
    }

    /// Sets the force-unlock flag.
    pub fn with_force_unlock(mut self) -> Self {
        self.force_unlock = true;
        self
    }

    /// Attaches explicit stones.
    pub fn with_stones(mut self, stones: Vec<Stone>) -> Self {
        self.stones = Some(stones);
        self
    }

    /// Marks the move as edit-only.
    pub fn as_edit(mut self) -> Self {
        self.is_edit = true;
        self
    }

    pub(crate) fn set_duplicate_of(&mut self, code: String) {
        self.duplicate_of = Some(code);
    }

    pub(crate) fn clear_duplicate_of(&mut self) {
        self.duplicate_of = None;
    }

    /// Target way.
    pub fn way(&self) -> Way {
        self.way
    }

    /// Operator applied to the way.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// Whether the target way ends up unlocked.
    pub fn force_unlock(&self) -> bool {
        self.force_unlock
    }

    /// Explicit stones, if supplied.
    pub fn stones(&self) -> Option<&[Stone]> {
        self.stones.as_deref()
    }

    /// Whether the move is edit-only (bypasses the way lock).
    pub fn is_edit(&self) -> bool {
        self.is_edit
    }

    /// Code of an earlier move in the same legal list with the same result.
    pub fn duplicate_of(&self) -> Option<&str> {
        self.duplicate_of.as_deref()
    }

    /// Serialises the move to its code.
    pub fn code(&self) -> String {
        self.to_string()
    }

    /// Parses a move code.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::MalformedMove`] on any deviation from the grammar.
    #[instrument]
    pub fn parse(code: &str) -> Result<Self, ParseError> {
        let malformed = || ParseError::MalformedMove(code.to_string());

        let (is_edit, rest) = match code.strip_prefix('&') {
            Some(rest) => (true, rest),
            None => (false, code),
        };

        let mut chars = rest.chars();
        let symbol = chars.next().ok_or_else(malformed)?;
        let way = Way::from_symbol(symbol).map_err(|_| malformed())?;
        let rest = chars.as_str();

        let (stem, operator) = STEMS
            .iter()
            .find(|(stem, _)| rest.starts_with(*stem))
            .ok_or_else(malformed)?;
        let rest = &rest[stem.len()..];

        let (force_unlock, rest) = match rest.strip_prefix('#') {
            Some(rest) => (true, rest),
            None => (false, rest),
        };

        let stones = match rest.strip_prefix('$') {
            Some(payload) if !payload.is_empty() => {
                Some(payload_to_stones(payload).ok_or_else(malformed)?)
            }
            Some(_) => return Err(malformed()),
            None if rest.is_empty() => None,
            None => return Err(malformed()),
        };

        Ok(Self {
            way,
            operator: *operator,
            force_unlock,
            stones,
            is_edit,
            duplicate_of: None,
        })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_edit {
            write!(f, "&")?;
        }
        write!(f, "{}{}", self.way, self.operator.stem())?;
        if self.force_unlock {
            write!(f, "#")?;
        }
        if let Some(stones) = &self.stones {
            write!(f, "${}", stones_to_payload(stones))?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::parse(s)
    }
}

impl TryFrom<String> for Move {
    type Error = ParseError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Move::parse(&code)
    }
}

impl From<Move> for String {
    fn from(mv: Move) -> Self {
        mv.code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn way(ch: char) -> Way {
        Way::from_symbol(ch).unwrap()
    }

    #[test]
    fn test_round_trip_codes() {
        for code in [
            "4n", "4nL", "4nH", "ca", "co", "cxo", "cna", "cno", "cxn", "&3ze", "&3on",
            "2s1", "2s6#", "&5c", "&5c#", "&ae$10.1011", "&1e#$.0", "7a#",
        ] {
            let mv = Move::parse(code).unwrap();
            assert_eq!(mv.to_string(), code);
        }
    }

    #[test]
    fn test_longest_stem_wins() {
        assert_eq!(Move::parse("4no").unwrap().operator(), Operator::Nor);
        assert_eq!(Move::parse("4na").unwrap().operator(), Operator::Nand);
        assert_eq!(Move::parse("4on").unwrap().operator(), Operator::One);
        assert_eq!(Move::parse("4o").unwrap().operator(), Operator::Or);
        assert_eq!(Move::parse("4n").unwrap().operator(), Operator::Not);
    }

    #[test]
    fn test_flags_and_payload() {
        let mv = Move::parse("&be#$01.").unwrap();
        assert!(mv.is_edit());
        assert!(mv.force_unlock());
        assert_eq!(mv.way(), way('b'));
        assert_eq!(mv.operator(), Operator::Edit);
        assert_eq!(
            mv.stones(),
            Some(&[Stone::White, Stone::Black, Stone::Empty][..])
        );
        assert_eq!(mv.duplicate_of(), None);
    }

    #[test]
    fn test_malformed_codes() {
        for code in [
            "", "&", "4", "8n", "gn", "4s0", "4s7", "4x", "4n##", "4n$", "4n$2", "4n#x",
            "&&4n", "4e$01 ", "#4n",
        ] {
            assert!(
                matches!(Move::parse(code), Err(ParseError::MalformedMove(_))),
                "{code:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_shift_amount_is_checked() {
        assert_eq!(ShiftAmount::new(0), None);
        assert_eq!(ShiftAmount::new(7), None);
        assert_eq!(ShiftAmount::all().count(), 6);
        for amount in ShiftAmount::all() {
            let mv = Move::new(way('4'), Operator::Shift(amount));
            assert_eq!(mv.code(), format!("4s{amount}"));
            assert_eq!(Move::parse(&mv.code()), Ok(mv));
        }
    }

    #[test]
    fn test_arity_from_stem() {
        assert_eq!(Operator::Xor.arity(), Arity::Binary);
        assert_eq!(Operator::Zero.arity(), Arity::Binary);
        assert_eq!(Operator::NotHigh.arity(), Arity::Unary);
        assert_eq!(Operator::Shift(ShiftAmount(3)).arity(), Arity::Nullary);
        assert_eq!(Operator::Cut.arity(), Arity::Nullary);
    }

    #[test]
    fn test_truth_tables() {
        let table = |op: Operator| {
            [(false, false), (false, true), (true, false), (true, true)]
                .map(|(a, b)| op.eval(a, b).unwrap())
        };
        assert_eq!(table(Operator::And), [false, false, false, true]);
        assert_eq!(table(Operator::Or), [false, true, true, true]);
        assert_eq!(table(Operator::Xor), [false, true, true, false]);
        assert_eq!(table(Operator::Nand), [true, true, true, false]);
        assert_eq!(table(Operator::Nor), [true, false, false, false]);
        assert_eq!(table(Operator::Xnor), [true, false, false, true]);
        assert_eq!(table(Operator::Zero), [false; 4]);
        assert_eq!(table(Operator::One), [true; 4]);
        assert_eq!(Operator::Not.eval(true, true), None);
    }

    #[test]
    fn test_serde_uses_move_code() {
        let mv = Move::parse("&ce#$1.0").unwrap();
        let json = serde_json::to_string(&mv).unwrap();
        assert_eq!(json, "\"&ce#$1.0\"");
        let back: Move = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mv);
        assert!(serde_json::from_str::<Move>("\"9z\"").is_err());
    }
}
