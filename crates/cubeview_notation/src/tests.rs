use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::SeedableRng;
use strum::VariantArray;

use crate::*;

#[test]
fn test_parse_moves() {
    assert_eq!(parse("R"), Ok(Move::new(Face::R, Modifier::Clockwise)));
    assert_eq!(parse("U'"), Ok(Move::new(Face::U, Modifier::CounterClockwise)));
    assert_eq!(parse("M2"), Ok(Move::new(Face::M, Modifier::Double)));
    assert_eq!(parse("r'"), Ok(Move::new(Face::WideR, Modifier::CounterClockwise)));
    assert_eq!(parse("Z"), Ok(Move::new(Face::Z, Modifier::Clockwise)));
}

#[test]
fn test_parse_errors() {
    assert_eq!(parse(""), Err(InvalidMoveError::Empty));
    assert_eq!(
        parse("Q"),
        Err(InvalidMoveError::UnknownFace {
            token: "Q".to_owned(),
            face: 'Q',
        }),
    );
    assert_eq!(
        parse("R3"),
        Err(InvalidMoveError::BadModifier {
            token: "R3".to_owned(),
            modifier: '3',
        }),
    );
    assert_eq!(
        parse("R''"),
        Err(InvalidMoveError::TooLong {
            token: "R''".to_owned(),
        }),
    );
    // lowercase slices and rotations are not wide moves
    parse("m").expect_err("lowercase slice");
    parse("x").expect_err("lowercase rotation");
}

#[test]
fn test_validate_scramble() {
    assert!(validate_scramble("R U R' U' R U R'"));
    assert!(validate_scramble("  R2   u' M  "));
    assert!(validate_scramble(""));
    assert!(validate_scramble("   "));

    assert!(!validate_scramble("Q"));
    assert!(!validate_scramble("R3"));
    assert!(!validate_scramble("R''"));
    assert!(!validate_scramble("R U Q"));
}

#[test]
fn test_parse_scramble() {
    let moves = parse_scramble("R U2 f'").unwrap();
    assert_eq!(
        moves,
        vec![
            Move::new(Face::R, Modifier::Clockwise),
            Move::new(Face::U, Modifier::Double),
            Move::new(Face::WideF, Modifier::CounterClockwise),
        ],
    );
    assert_eq!(format_moves(&moves), "R U2 f'");
    assert_eq!(parse_scramble(" \t"), Ok(vec![]));
}

#[test]
fn test_inverse() {
    assert_eq!(parse("R").unwrap().inverse().to_string(), "R'");
    assert_eq!(parse("R'").unwrap().inverse().to_string(), "R");
    assert_eq!(parse("R2").unwrap().inverse().to_string(), "R2");
}

#[test]
fn test_descriptions() {
    assert_eq!(
        parse("R").unwrap().description(),
        "Turn the right face 90 degrees clockwise",
    );
    assert_eq!(
        parse("u2").unwrap().description(),
        "Turn the two top layers 180 degrees",
    );
    assert_eq!(
        parse("Y'").unwrap().description(),
        "Turn the whole cube 90 degrees anticlockwise",
    );
    assert_eq!(
        parse("M'").unwrap().inverse().description(),
        "Turn the middle slice 90 degrees clockwise",
    );
}

#[test]
fn test_modifier_degrees_match_quarter_turns() {
    for &modifier in Modifier::VARIANTS {
        let quarter_turns = u32::from(modifier.clockwise_quarter_turns().unsigned_abs());
        assert_eq!(modifier.degrees(), 90 * quarter_turns);
        assert_eq!(modifier.inverse().degrees(), modifier.degrees());
    }
}

#[test]
fn test_random_scramble_is_reproducible() {
    let a = random_scramble(&mut rand_chacha::ChaCha12Rng::seed_from_u64(7), 20);
    let b = random_scramble(&mut rand_chacha::ChaCha12Rng::seed_from_u64(7), 20);
    assert_eq!(a, b);
    assert_eq!(a.len(), DEFAULT_SCRAMBLE_LENGTH);
    for (m1, m2) in a.iter().zip(&a[1..]) {
        assert_ne!(m1.face, m2.face);
    }
    assert!(a.iter().all(|m| SCRAMBLE_FACES.contains(&m.face)));
    assert!(validate_scramble(&format_moves(&a)));
}

fn any_move() -> impl Strategy<Value = Move> {
    (
        proptest::sample::select(Face::VARIANTS),
        proptest::sample::select(Modifier::VARIANTS),
    )
        .prop_map(|(face, modifier)| Move::new(face, modifier))
}

proptest! {
    #[test]
    fn proptest_move_display_parses_back(m in any_move()) {
        prop_assert_eq!(parse(&m.to_string()), Ok(m));
    }

    #[test]
    fn proptest_inverse_is_involution(m in any_move()) {
        prop_assert_eq!(m.inverse().inverse(), m);
        prop_assert_eq!(m.inverse().face, m.face);
    }
}
