use thiserror::Error;

/// Error produced when parsing a move token.
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash)]
pub enum InvalidMoveError {
    /// Token is empty
    #[error("empty move")]
    Empty,
    /// Leading character is not a recognized face or slice letter
    #[error("unknown face {face:?} in move {token:?}")]
    UnknownFace {
        /// Whole token.
        token: String,
        /// Offending leading character.
        face: char,
    },
    /// Token is longer than two characters
    #[error("move {token:?} is too long")]
    TooLong {
        /// Whole token.
        token: String,
    },
    /// Second character is not `'` or `2`
    #[error("bad modifier {modifier:?} in move {token:?}")]
    BadModifier {
        /// Whole token.
        token: String,
        /// Offending second character.
        modifier: char,
    },
}
