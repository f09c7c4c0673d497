//! Move notation parser, validator, and scramble generator for a 3x3x3 cube.
//!
//! A move token is a face or slice letter followed by an optional modifier:
//!
//! ```text
//! <Face>[Modifier]
//! Face     = U | D | L | R | F | B | M | E | S | X | Y | Z | u | d | l | r | f | b
//! Modifier = ' | 2
//! ```
//!
//! A scramble is a whitespace-separated list of move tokens.

mod describe;
mod errors;
mod moves;
mod scramble;

pub use errors::InvalidMoveError;
pub use moves::{Face, LayerKind, Modifier, Move};
pub use scramble::{
    DEFAULT_SCRAMBLE_LENGTH, SCRAMBLE_FACES, format_moves, parse_scramble, random_scramble,
    validate_scramble,
};

/// Parses a single move token such as `R`, `u'`, or `M2`.
pub fn parse(token: &str) -> Result<Move, InvalidMoveError> {
    token.parse()
}

#[cfg(test)]
mod tests;
