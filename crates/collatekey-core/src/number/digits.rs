use num_bigint::BigUint;

const DECIMAL_CHUNK_BASE: u64 = 1_000_000_000;
const DECIMAL_CHUNK_WIDTH: usize = 9;

// Append the ASCII decimal digits of `magnitude` (no sign, no leading zeros).
// Converts little-endian base-2^32 limbs to base-1e9 chunks without
// formatting through a String.
pub(super) fn push_decimal_digits(out: &mut Vec<u8>, magnitude: &BigUint) {
    let mut quotient = magnitude.to_u32_digits();
    trim_zero_limbs(&mut quotient);
    if quotient.is_empty() {
        out.push(b'0');
        return;
    }

    // base-2^32 and base-1e9 are close in radix width, so chunks are roughly
    // one-to-one with limbs.
    let mut chunks = Vec::with_capacity(quotient.len().saturating_add(1));
    while !quotient.is_empty() {
        let mut remainder = 0u64;
        for limb in quotient.iter_mut().rev() {
            let value = (remainder << 32) | u64::from(*limb);
            *limb = narrow(value / DECIMAL_CHUNK_BASE);
            remainder = value % DECIMAL_CHUNK_BASE;
        }

        chunks.push(narrow(remainder));
        trim_zero_limbs(&mut quotient);
    }

    out.reserve(chunks.len().saturating_mul(DECIMAL_CHUNK_WIDTH));
    if let Some(most_significant) = chunks.pop() {
        push_unpadded_chunk_digits(out, most_significant);
    }
    while let Some(chunk) = chunks.pop() {
        push_padded_chunk_digits(out, chunk);
    }
}

// Both the per-limb quotient and the chunk remainder are below 2^32.
#[expect(clippy::cast_possible_truncation)]
const fn narrow(value: u64) -> u32 {
    value as u32
}

fn trim_zero_limbs(limbs: &mut Vec<u32>) {
    while limbs.last().copied() == Some(0) {
        limbs.pop();
    }
}

fn push_unpadded_chunk_digits(out: &mut Vec<u8>, chunk: u32) {
    let mut scratch = [0u8; DECIMAL_CHUNK_WIDTH];
    let mut write_idx = DECIMAL_CHUNK_WIDTH;
    let mut value = chunk;

    loop {
        write_idx = write_idx.saturating_sub(1);
        scratch[write_idx] = digit_to_ascii(value % 10);
        value /= 10;
        if value == 0 {
            break;
        }
    }

    out.extend_from_slice(&scratch[write_idx..]);
}

fn push_padded_chunk_digits(out: &mut Vec<u8>, chunk: u32) {
    let mut divisor = 100_000_000u32;
    for _ in 0..DECIMAL_CHUNK_WIDTH {
        out.push(digit_to_ascii((chunk / divisor) % 10));
        divisor = if divisor > 1 { divisor / 10 } else { 1 };
    }
}

#[expect(clippy::cast_possible_truncation)]
const fn digit_to_ascii(value: u32) -> u8 {
    debug_assert!(value <= 9, "decimal digit must be in 0..=9");

    b'0' + (value % 10) as u8
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn render(magnitude: &BigUint) -> String {
        let mut out = Vec::new();
        push_decimal_digits(&mut out, magnitude);

        String::from_utf8(out).expect("digits are ascii")
    }

    #[test]
    fn digits_match_display_across_chunk_boundaries() {
        let cases = [
            BigUint::from(0u8),
            BigUint::from(7u8),
            BigUint::from(999_999_999u32),
            BigUint::from(1_000_000_000u64),
            BigUint::from(u64::MAX),
            BigUint::from(u128::MAX),
            BigUint::from(10u8).pow(40),
            BigUint::from(10u8).pow(40) + BigUint::from(1u8),
        ];

        for magnitude in cases {
            assert_eq!(render(&magnitude), magnitude.to_string());
        }
    }

    #[test]
    fn digits_append_after_existing_bytes() {
        let mut out = b"x".to_vec();
        push_decimal_digits(&mut out, &BigUint::from(1_000_000_007u64));

        assert_eq!(out, b"x1000000007");
    }
}
