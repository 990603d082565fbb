use super::{
    Number, NumberError,
    codec::{push_payload, read_number, skip_number},
};
use crate::{
    codec::cursor::Cursor,
    error::{CodecError, ERR_NUMBER_DIGITS, ERR_NUMBER_MARKER},
};
use collatekey_primitives::{Polarity, TERMINATOR};
use proptest::prelude::*;
use std::cmp::Ordering;

fn num(text: &str) -> Number {
    text.parse().expect("test literal should parse")
}

fn payload(value: &Number) -> Vec<u8> {
    let mut out = Vec::new();
    let mut scratch = Vec::new();
    push_payload(&mut out, value, &mut scratch).expect("payload should encode");
    out.push(TERMINATOR);

    out
}

fn read_back(bytes: &[u8], polarity: Polarity) -> Result<Number, CodecError> {
    let mut cursor = Cursor::new(bytes);
    let mut scratch = Vec::new();
    let value = read_number(&mut cursor, polarity, &mut scratch)?;
    cursor.expect_terminator(polarity)?;
    assert!(cursor.is_empty(), "payload left trailing bytes");

    Ok(value)
}

#[test]
fn parse_normalizes_equivalent_literals() {
    assert_eq!(num("1.0"), num("1"));
    assert_eq!(num("100"), Number::new(1, 2));
    assert_eq!(num("1e2"), num("100"));
    assert_eq!(num("0.00"), Number::zero());
    assert_eq!(num("-0"), Number::zero());
    assert_eq!(num("+2.50"), Number::new(25, -1));
    assert_eq!(num(".5"), Number::new(5, -1));
    assert_eq!(num("5."), Number::from(5));
}

#[test]
fn parse_rejects_garbage() {
    for text in ["", "-", ".", "1..2", "1e", "e5", "abc", "1e+", "1 "] {
        assert!(
            matches!(text.parse::<Number>(), Err(NumberError::InvalidSyntax { .. })),
            "{text:?} should be rejected"
        );
    }

    assert_eq!(
        "1e99999999999999999999".parse::<Number>(),
        Err(NumberError::ExponentOverflow)
    );
}

#[test]
fn parse_rejects_exponent_overflow_from_trailing_zeros() {
    let max = num("1e9223372036854775807");
    assert_eq!(max.exponent(), i64::MAX);

    assert_eq!(
        "10e9223372036854775807".parse::<Number>(),
        Err(NumberError::ExponentOverflow)
    );
    assert_eq!(
        "-1000e9223372036854775805".parse::<Number>(),
        Err(NumberError::ExponentOverflow)
    );
    assert_eq!(num("100e9223372036854775805"), max);
    assert_eq!(max.to_string(), "1e9223372036854775807");
    assert!(num("9e9223372036854775806") < max);
    assert!(num("5e9223372036854775807") > num("9e9223372036854775806"));
}

#[test]
fn display_uses_plain_notation_when_short() {
    assert_eq!(num("0").to_string(), "0");
    assert_eq!(num("42").to_string(), "42");
    assert_eq!(num("-1500").to_string(), "-1500");
    assert_eq!(num("1.5").to_string(), "1.5");
    assert_eq!(num("-0.005").to_string(), "-0.005");
    assert_eq!(num("1e30").to_string(), "1e30");
    assert_eq!(num("1.25e-9").to_string(), "1.25e-9");
}

#[test]
fn float_conversion_is_exact_for_shortest_repr() {
    assert_eq!(Number::try_from(0.1).expect("finite"), num("0.1"));
    assert_eq!(Number::try_from(-2.5e-8).expect("finite"), num("-0.000000025"));
    assert_eq!(Number::try_from(f64::NAN), Err(NumberError::NonFinite));
    assert_eq!(num("0.25").to_f64(), Some(0.25));
}

#[test]
fn integer_accessors_require_exact_integers() {
    assert_eq!(num("12").to_usize(), Some(12));
    assert_eq!(num("-12").to_usize(), None);
    assert_eq!(num("-12").to_i64(), Some(-12));
    assert_eq!(num("1.5").to_i64(), None);
    assert_eq!(num("1e40").to_i64(), None);
    assert_eq!(Number::zero().to_usize(), Some(0));
}

#[test]
fn ordering_follows_numeric_value() {
    let ascending = [
        "-1e10", "-100", "-10.5", "-10", "-9", "-0.5", "-0.05", "0", "0.05", "0.5", "1", "1.01",
        "9", "10", "10.5", "100", "1e10",
    ];

    for pair in ascending.windows(2) {
        assert_eq!(num(pair[0]).cmp(&num(pair[1])), Ordering::Less, "{pair:?}");
    }
}

#[test]
fn payload_bytes_for_small_values() {
    assert_eq!(payload(&Number::zero()), vec![0x01, 0x00]);

    // 1 = 0.1e1: exponent 1 biased big-endian, then pair "10" => 11.
    assert_eq!(payload(&num("1")), vec![0x02, 0x80, 0x00, 0x00, 0x01, 11, 0x00]);

    // 123 = 0.123e3: pairs "12" "30".
    assert_eq!(
        payload(&num("123")),
        vec![0x02, 0x80, 0x00, 0x00, 0x03, 13, 31, 0x00]
    );

    // -1: inverted exponent, mirrored pair, end marker.
    assert_eq!(
        payload(&num("-1")),
        vec![0x00, 0x7F, 0xFF, 0xFF, 0xFE, 90, 0xFE, 0x00]
    );
}

#[test]
fn payload_order_matches_numeric_order() {
    let ascending = [
        "-1e10", "-123.45", "-100", "-99", "-1.5", "-1", "-0.123", "-0.12", "0", "0.12", "0.123",
        "1", "1.5", "99", "100", "123.45", "1e10",
    ];

    for pair in ascending.windows(2) {
        let (left, right) = (payload(&num(pair[0])), payload(&num(pair[1])));
        assert!(left < right, "{pair:?} bytes out of order");
    }
}

#[test]
fn payload_reads_back_in_both_polarities() {
    for text in ["0", "7", "-7", "10", "0.001", "-123.456", "98765432109876543210"] {
        let value = num(text);
        let bytes = payload(&value);
        assert_eq!(read_back(&bytes, Polarity::Normal), Ok(value.clone()));

        let flipped: Vec<u8> = bytes.iter().map(|byte| !byte).collect();
        assert_eq!(read_back(&flipped, Polarity::Complemented), Ok(value));
    }
}

#[test]
fn exponent_outside_i32_is_rejected() {
    let huge = Number::new(1, i32::MAX);
    let mut out = Vec::new();
    let mut scratch = Vec::new();

    assert_eq!(
        push_payload(&mut out, &huge, &mut scratch),
        Err(CodecError::NumberOutOfRange)
    );
}

#[test]
fn malformed_payloads_are_rejected() {
    let mut scratch = Vec::new();

    let mut cursor = Cursor::new(&[0x07]);
    assert_eq!(
        read_number(&mut cursor, Polarity::Normal, &mut scratch),
        Err(CodecError::malformed(0, ERR_NUMBER_MARKER))
    );

    // Positive number with no digit pairs.
    let mut cursor = Cursor::new(&[0x02, 0x80, 0x00, 0x00, 0x01, 0x00]);
    assert_eq!(
        read_number(&mut cursor, Polarity::Normal, &mut scratch),
        Err(CodecError::malformed(0, ERR_NUMBER_DIGITS))
    );

    // Leading zero digit.
    let mut cursor = Cursor::new(&[0x02, 0x80, 0x00, 0x00, 0x01, 2, 0x00]);
    assert_eq!(
        read_number(&mut cursor, Polarity::Normal, &mut scratch),
        Err(CodecError::malformed(0, ERR_NUMBER_DIGITS))
    );

    // Pair byte outside 1..=100.
    let mut cursor = Cursor::new(&[0x02, 0x80, 0x00, 0x00, 0x01, 150, 0x00]);
    assert_eq!(
        read_number(&mut cursor, Polarity::Normal, &mut scratch),
        Err(CodecError::malformed(5, ERR_NUMBER_DIGITS))
    );

    // Truncated negative run.
    let mut cursor = Cursor::new(&[0x00, 0x7F, 0xFF, 0xFF, 0xFE, 90]);
    assert!(read_number(&mut cursor, Polarity::Normal, &mut scratch).is_err());
}

#[test]
fn skip_consumes_exactly_the_payload() {
    let bytes = payload(&num("-42.5"));
    let mut cursor = Cursor::new(&bytes);
    skip_number(&mut cursor, Polarity::Normal).expect("payload should skip");

    assert_eq!(cursor.rest(), &[TERMINATOR]);
}

fn arb_number() -> impl Strategy<Value = Number> {
    (any::<i64>(), -40i32..40).prop_map(|(mantissa, exponent)| Number::new(mantissa, exponent))
}

proptest! {
    #[test]
    fn payload_bytes_sort_like_numbers(left in arb_number(), right in arb_number()) {
        prop_assert_eq!(payload(&left).cmp(&payload(&right)), left.cmp(&right));
    }

    #[test]
    fn payload_decodes_to_the_same_number(value in arb_number()) {
        prop_assert_eq!(read_back(&payload(&value), Polarity::Normal), Ok(value));
    }

    #[test]
    fn display_parses_back(value in arb_number()) {
        prop_assert_eq!(value.to_string().parse::<Number>(), Ok(value));
    }
}
