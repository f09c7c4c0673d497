//! Scramble parsing, validation, formatting, and generation.

use itertools::Itertools;
use rand::Rng;
use strum::VariantArray;

use crate::{Face, InvalidMoveError, Modifier, Move};

/// Number of moves in a generated scramble.
pub const DEFAULT_SCRAMBLE_LENGTH: usize = 20;

/// Faces used when generating random scrambles.
pub const SCRAMBLE_FACES: [Face; 6] = [Face::U, Face::D, Face::L, Face::R, Face::F, Face::B];

/// Parses a whitespace-separated sequence of moves.
///
/// Empty or whitespace-only input is a valid scramble with no moves.
pub fn parse_scramble(text: &str) -> Result<Vec<Move>, InvalidMoveError> {
    text.split_whitespace().map(str::parse).collect()
}

/// Returns whether every token in `text` is a valid move.
///
/// Stops at the first invalid token.
pub fn validate_scramble(text: &str) -> bool {
    text.split_whitespace()
        .all(|token| token.parse::<Move>().is_ok())
}

/// Formats a sequence of moves as a space-separated string.
pub fn format_moves<'a>(moves: impl IntoIterator<Item = &'a Move>) -> String {
    moves.into_iter().join(" ")
}

/// Generates a random scramble of `length` face turns.
///
/// Consecutive moves never turn the same face.
pub fn random_scramble(rng: &mut impl Rng, length: usize) -> Vec<Move> {
    let mut ret: Vec<Move> = Vec::with_capacity(length);
    while ret.len() < length {
        let face = SCRAMBLE_FACES[rng.random_range(0..SCRAMBLE_FACES.len())];
        if ret.last().is_some_and(|last| last.face == face) {
            continue;
        }
        let modifier = Modifier::VARIANTS[rng.random_range(0..Modifier::VARIANTS.len())];
        ret.push(Move::new(face, modifier));
    }
    ret
}
