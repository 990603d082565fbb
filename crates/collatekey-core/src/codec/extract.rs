//! Module: codec::extract
//! Responsibility: byte ranges of top-level fields and structural elements.
//! Does not own: value materialization.
//! Boundary: positions are 1-based; nothing here allocates except the
//! pooled scratch used to parse a count.

use crate::{
    codec::{cursor::Cursor, walk::Walker},
    error::{CodecError, ERR_TRAILING_BYTES},
};
use collatekey_primitives::TypeTag;
use std::{cmp::Ordering, ops::Range};

/// First field of `bytes` and everything after it.
pub(crate) fn split_field<'a>(
    walker: &Walker<'_>,
    bytes: &'a [u8],
) -> Result<(&'a [u8], &'a [u8]), CodecError> {
    let mut cursor = Cursor::new(bytes);
    walker.skip_field(&mut cursor, 0)?;

    Ok((cursor.since(0), cursor.rest()))
}

/// The `position`-th top-level field and the bytes after it.
pub(crate) fn extract_field<'a>(
    walker: &Walker<'_>,
    key: &'a [u8],
    position: usize,
) -> Result<(&'a [u8], &'a [u8]), CodecError> {
    let mut cursor = Cursor::new(key);
    let mut seen = 0;

    while !cursor.is_empty() {
        let start = cursor.offset();
        walker.skip_field(&mut cursor, 0)?;
        seen += 1;

        if seen == position {
            return Ok((cursor.since(start), cursor.rest()));
        }
    }

    Err(CodecError::FieldPositionOutOfRange {
        position,
        available: seen,
    })
}

/// The `position`-th element of an array field (or pair of an object field)
/// and the remaining elements up to the structure's closing terminator.
///
/// `field` must hold exactly one field; trailing bytes are an error.
pub(crate) fn extract_element<'a>(
    walker: &Walker<'_>,
    field: &'a [u8],
    position: usize,
) -> Result<(&'a [u8], &'a [u8]), CodecError> {
    let mut cursor = Cursor::new(field);
    let (tag, _) = cursor.read_tag()?;
    if !matches!(tag, TypeTag::Array | TypeTag::Object) {
        return Err(CodecError::FieldPositionOutOfRange {
            position,
            available: 0,
        });
    }

    let mut seen = 0;
    let mut found = None;
    let close = walker.walk_structure(&mut cursor, tag, |cursor| {
        let start = cursor.offset();
        walker.skip_element(cursor, tag, 1)?;
        seen += 1;

        if seen == position {
            found = Some(start..cursor.offset());
        }

        Ok(())
    })?;
    if !cursor.is_empty() {
        return Err(cursor.malformed(ERR_TRAILING_BYTES));
    }

    match found {
        Some(element) => Ok((&field[element.clone()], &field[element.end..close])),
        None => Err(CodecError::FieldPositionOutOfRange {
            position,
            available: seen,
        }),
    }
}

/// Byte range of every top-level field, in order.
pub(crate) fn field_ranges(
    walker: &Walker<'_>,
    key: &[u8],
) -> Result<Vec<Range<usize>>, CodecError> {
    let mut cursor = Cursor::new(key);
    let mut ranges = Vec::new();

    while !cursor.is_empty() {
        let start = cursor.offset();
        walker.skip_field(&mut cursor, 0)?;
        ranges.push(start..cursor.offset());
    }

    Ok(ranges)
}

pub(crate) fn field_count(walker: &Walker<'_>, key: &[u8]) -> Result<usize, CodecError> {
    let mut cursor = Cursor::new(key);
    let mut count = 0;

    while !cursor.is_empty() {
        walker.skip_field(&mut cursor, 0)?;
        count += 1;
    }

    Ok(count)
}

/// Compare the `position`-th fields of two keys without decoding them.
pub(crate) fn compare_field(
    walker: &Walker<'_>,
    left: &[u8],
    right: &[u8],
    position: usize,
) -> Result<Ordering, CodecError> {
    let (left, _) = extract_field(walker, left, position)?;
    let (right, _) = extract_field(walker, right, position)?;

    Ok(left.cmp(right))
}
