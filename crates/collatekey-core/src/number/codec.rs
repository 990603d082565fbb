//! Module: number::codec
//! Responsibility: order-preserving byte payload for `Number`.
//! Does not own: the number tag or the field terminator that follows.
//! Boundary: payload bytes compare in numeric order and no payload is a
//! proper prefix of another once the field terminator is appended.

use crate::{
    codec::cursor::Cursor,
    error::{CodecError, ERR_NUMBER_DIGITS, ERR_NUMBER_MARKER},
    number::{Number, digits::push_decimal_digits},
};
use collatekey_primitives::{Polarity, TERMINATOR};
use num_bigint::BigUint;

pub(crate) const NEGATIVE_MARKER: u8 = 0x00;
pub(crate) const ZERO_MARKER: u8 = 0x01;
pub(crate) const POSITIVE_MARKER: u8 = 0x02;

// Closes a negative digit run; above every mirrored pair byte so a longer
// magnitude sorts first.
pub(crate) const NEGATIVE_DIGITS_END: u8 = 0xFE;

// Pair bytes live in 1..=100; negatives store `MIRROR - byte`.
const MIRROR: u8 = 101;
const PAIR_MIN: u8 = 1;
const PAIR_MAX: u8 = 100;

pub(crate) const fn ordered_i32_bytes(value: i32) -> [u8; 4] {
    let biased = value.cast_unsigned() ^ (1u32 << 31);
    biased.to_be_bytes()
}

const fn ordered_i32_from_bytes(bytes: [u8; 4]) -> i32 {
    (u32::from_be_bytes(bytes) ^ (1u32 << 31)).cast_signed()
}

// Sign bucket + exponent of the leading digit + two-digit groups.
//
// zero:      [ZERO]
// positive:  [POSITIVE] exp  pair*
// negative:  [NEGATIVE] !exp (101 - pair)* [NEGATIVE_DIGITS_END]
pub(crate) fn push_payload(
    out: &mut Vec<u8>,
    value: &Number,
    scratch: &mut Vec<u8>,
) -> Result<(), CodecError> {
    if value.is_zero() {
        out.push(ZERO_MARKER);
        return Ok(());
    }

    scratch.clear();
    push_decimal_digits(scratch, value.mantissa().magnitude());
    let exponent = adjusted_exponent(value.exponent(), scratch.len())?;
    let exponent_bytes = ordered_i32_bytes(exponent);
    let negative = value.is_negative();

    if negative {
        out.push(NEGATIVE_MARKER);
        push_inverted(out, &exponent_bytes);
    } else {
        out.push(POSITIVE_MARKER);
        out.extend_from_slice(&exponent_bytes);
    }

    for pair in scratch.chunks(2) {
        let high = pair[0] - b'0';
        let low = pair.get(1).map_or(0, |digit| digit - b'0');
        let byte = pair_byte(high, low);
        out.push(if negative { MIRROR - byte } else { byte });
    }

    if negative {
        out.push(NEGATIVE_DIGITS_END);
    }

    Ok(())
}

fn push_inverted(out: &mut Vec<u8>, bytes: &[u8]) {
    for &byte in bytes {
        out.push(!byte);
    }
}

// Exponent such that value = 0.d1d2.. * 10^exponent.
fn adjusted_exponent(exponent: i64, digit_len: usize) -> Result<i32, CodecError> {
    let digit_count = i64::try_from(digit_len).map_err(|_| CodecError::NumberOutOfRange)?;
    let adjusted = exponent
        .checked_add(digit_count)
        .ok_or(CodecError::NumberOutOfRange)?;

    i32::try_from(adjusted).map_err(|_| CodecError::NumberOutOfRange)
}

const fn pair_byte(high: u8, low: u8) -> u8 {
    high * 10 + low + 1
}

/// Walk one number payload, reporting each two-digit group (0..=99) in
/// order. Returns `None` for zero, otherwise the sign and exponent.
///
/// A positive payload stops in front of the field terminator without
/// consuming it.
pub(crate) fn scan_payload(
    cursor: &mut Cursor<'_>,
    polarity: Polarity,
    mut on_pair: impl FnMut(u8),
) -> Result<Option<(bool, i32)>, CodecError> {
    let marker_at = cursor.offset();
    let negative = match cursor.next(polarity)? {
        ZERO_MARKER => return Ok(None),
        POSITIVE_MARKER => false,
        NEGATIVE_MARKER => true,
        _ => return Err(CodecError::malformed(marker_at, ERR_NUMBER_MARKER)),
    };

    let mut exponent_bytes = [0u8; 4];
    for slot in &mut exponent_bytes {
        let byte = cursor.next(polarity)?;
        *slot = if negative { !byte } else { byte };
    }

    let mut pairs = 0usize;
    loop {
        if !negative && cursor.peek(polarity) == Some(TERMINATOR) {
            break;
        }

        let at = cursor.offset();
        let byte = cursor.next(polarity)?;
        if negative && byte == NEGATIVE_DIGITS_END {
            break;
        }

        let stored = if negative {
            MIRROR.checked_sub(byte)
        } else {
            Some(byte)
        };
        match stored.filter(|byte| (PAIR_MIN..=PAIR_MAX).contains(byte)) {
            Some(byte) => on_pair(byte - 1),
            None => return Err(CodecError::malformed(at, ERR_NUMBER_DIGITS)),
        }
        pairs += 1;
    }

    if pairs == 0 {
        return Err(CodecError::malformed(marker_at, ERR_NUMBER_DIGITS));
    }

    Ok(Some((negative, ordered_i32_from_bytes(exponent_bytes))))
}

/// Decode one number payload. `scratch` holds the digit run.
pub(crate) fn read_number(
    cursor: &mut Cursor<'_>,
    polarity: Polarity,
    scratch: &mut Vec<u8>,
) -> Result<Number, CodecError> {
    let start = cursor.offset();
    scratch.clear();

    let Some((negative, exponent)) = scan_payload(cursor, polarity, |pair| {
        scratch.push(b'0' + pair / 10);
        scratch.push(b'0' + pair % 10);
    })?
    else {
        return Ok(Number::zero());
    };

    // One trailing zero may be padding; anything else is non-canonical.
    let invalid = || CodecError::malformed(start, ERR_NUMBER_DIGITS);
    if scratch.first() == Some(&b'0') {
        return Err(invalid());
    }
    if scratch.last() == Some(&b'0') {
        scratch.pop();
    }
    if scratch.last() == Some(&b'0') {
        return Err(invalid());
    }

    let magnitude = BigUint::parse_bytes(scratch, 10).ok_or_else(invalid)?;
    let digit_count = i64::try_from(scratch.len()).map_err(|_| invalid())?;

    Number::from_sign_magnitude(
        negative,
        magnitude,
        i64::from(exponent) - digit_count,
    )
    .map_err(|_| invalid())
}

/// Step over one number payload without materializing it.
pub(crate) fn skip_number(cursor: &mut Cursor<'_>, polarity: Polarity) -> Result<(), CodecError> {
    scan_payload(cursor, polarity, |_| {})?;

    Ok(())
}
