use crate::{
    codec::{extract::field_ranges, walk::Walker},
    error::CodecError,
};

/// Complement every field `i` with `desc[i] == true`. Self-inverse.
///
/// All field boundaries are located before any byte changes, so an error
/// leaves `key` untouched. Returns the number of fields flipped.
pub(crate) fn reverse_collate(
    walker: &Walker<'_>,
    key: &mut [u8],
    desc: &[bool],
) -> Result<usize, CodecError> {
    let ranges = field_ranges(walker, key)?;
    if desc.len() > ranges.len() {
        return Err(CodecError::FieldPositionOutOfRange {
            position: desc.len(),
            available: ranges.len(),
        });
    }

    let mut flipped = 0;
    for (range, _) in ranges.into_iter().zip(desc).filter(|(_, desc)| **desc) {
        flip_bits(&mut key[range]);
        flipped += 1;
    }

    Ok(flipped)
}

fn flip_bits(bytes: &mut [u8]) {
    for byte in bytes {
        *byte = !*byte;
    }
}
