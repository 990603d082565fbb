//! Module: codec::walk
//! Responsibility: the single recursive reader over encoded fields, shared by
//! decoding and navigation.
//! Does not own: field-position bookkeeping (see `codec::extract`).
//! Boundary: every tag is accepted in either polarity; a field's polarity is
//! fixed by its own tag byte.

use crate::{
    codec::{cursor::Cursor, encode::STRING_ESCAPE, enter_structure},
    config::CodecConfig,
    error::{
        CodecError, ERR_COUNT_EXCEEDS_INPUT, ERR_COUNT_NUMBER, ERR_COUNT_TAG, ERR_COUNT_VALUE,
        ERR_OBJECT_KEY, ERR_STRING_ESCAPE, ERR_STRING_UNTERMINATED, ERR_UNEXPECTED_LENGTH,
        ERR_UNTERMINATED_STRUCTURE,
    },
    number::codec::{read_number, skip_number},
    pool::BufferPool,
    value::Value,
};
use collatekey_primitives::{Polarity, TERMINATOR, TypeTag};

///
/// Walker
///

pub(crate) struct Walker<'c> {
    config: CodecConfig,
    pool: &'c BufferPool,
}

impl<'c> Walker<'c> {
    pub(crate) const fn new(config: CodecConfig, pool: &'c BufferPool) -> Self {
        Self { config, pool }
    }

    /// Step over one complete field.
    pub(crate) fn skip_field(&self, cursor: &mut Cursor<'_>, depth: usize) -> Result<(), CodecError> {
        let start = cursor.offset();
        let (tag, polarity) = cursor.read_tag()?;

        match tag {
            TypeTag::Missing | TypeTag::Null | TypeTag::False | TypeTag::True => {}
            TypeTag::Number => skip_number(cursor, polarity)?,
            TypeTag::String => scan_string(cursor, polarity, |_| {})?,
            TypeTag::Length => return Err(CodecError::malformed(start, ERR_UNEXPECTED_LENGTH)),
            TypeTag::Array | TypeTag::Object => {
                let depth = enter_structure(depth)?;
                self.walk_structure(cursor, tag, |cursor| {
                    self.skip_element(cursor, tag, depth)
                })?;
                return Ok(());
            }
        }

        cursor.expect_terminator(polarity)
    }

    /// Decode one complete field.
    pub(crate) fn decode_field(
        &self,
        cursor: &mut Cursor<'_>,
        depth: usize,
    ) -> Result<Value, CodecError> {
        let start = cursor.offset();
        let (tag, polarity) = cursor.read_tag()?;

        let value = match tag {
            TypeTag::Missing => Value::Missing,
            TypeTag::Null => Value::Null,
            TypeTag::False => Value::Bool(false),
            TypeTag::True => Value::Bool(true),
            TypeTag::Number => {
                let mut scratch = self.pool.acquire();
                Value::Number(read_number(cursor, polarity, &mut scratch)?)
            }
            TypeTag::String => {
                let mut bytes = Vec::new();
                scan_string(cursor, polarity, |byte| bytes.push(byte))?;
                Value::String(bytes)
            }
            TypeTag::Length => return Err(CodecError::malformed(start, ERR_UNEXPECTED_LENGTH)),
            TypeTag::Array => {
                let depth = enter_structure(depth)?;
                let mut items = Vec::new();
                self.walk_structure(cursor, tag, |cursor| {
                    items.push(self.decode_field(cursor, depth)?);
                    Ok(())
                })?;
                return Ok(Value::Array(items));
            }
            TypeTag::Object => {
                let depth = enter_structure(depth)?;
                let mut pairs = Vec::new();
                self.walk_structure(cursor, tag, |cursor| {
                    let key = read_key(cursor)?;
                    pairs.push((key, self.decode_field(cursor, depth)?));
                    Ok(())
                })?;
                return Ok(Value::Object(pairs));
            }
        };

        cursor.expect_terminator(polarity)?;

        Ok(value)
    }

    /// Step over one structural element: a single field for arrays, a key
    /// field plus a value field for objects.
    pub(crate) fn skip_element(
        &self,
        cursor: &mut Cursor<'_>,
        tag: TypeTag,
        depth: usize,
    ) -> Result<(), CodecError> {
        if tag == TypeTag::Object {
            skip_key(cursor)?;
        }

        self.skip_field(cursor, depth)
    }

    /// Walk the elements of a structure whose tag was just consumed, calling
    /// `each` once per element, then consume the closing terminator.
    ///
    /// Returns the offset of the closing terminator.
    pub(crate) fn walk_structure(
        &self,
        cursor: &mut Cursor<'_>,
        tag: TypeTag,
        mut each: impl FnMut(&mut Cursor<'_>) -> Result<(), CodecError>,
    ) -> Result<usize, CodecError> {
        let len_prefixed = match tag {
            TypeTag::Array => self.config.array_len_prefix,
            TypeTag::Object => self.config.property_len_prefix,
            _ => false,
        };

        if len_prefixed {
            let count = self.read_count(cursor)?;
            for _ in 0..count {
                each(cursor)?;
            }

            let close = cursor.offset();
            cursor
                .expect_any_terminator()
                .map_err(|_| CodecError::malformed(close, ERR_UNTERMINATED_STRUCTURE))?;

            return Ok(close);
        }

        loop {
            if cursor.at_any_terminator() {
                let close = cursor.offset();
                cursor.advance(1)?;
                return Ok(close);
            }
            if cursor.is_empty() {
                return Err(cursor.malformed(ERR_UNTERMINATED_STRUCTURE));
            }

            each(cursor)?;
        }
    }

    // Length field in either polarity holding a non-negative integer count.
    fn read_count(&self, cursor: &mut Cursor<'_>) -> Result<usize, CodecError> {
        let start = cursor.offset();
        let count_error = |reason| CodecError::count(start, reason);

        let (tag, polarity) = cursor.read_tag().map_err(|_| count_error(ERR_COUNT_TAG))?;
        if tag != TypeTag::Length {
            return Err(count_error(ERR_COUNT_TAG));
        }

        let mut scratch = self.pool.acquire();
        let count = read_number(cursor, polarity, &mut scratch)
            .and_then(|number| cursor.expect_terminator(polarity).map(|()| number))
            .map_err(|_| count_error(ERR_COUNT_NUMBER))?
            .to_usize()
            .ok_or_else(|| count_error(ERR_COUNT_VALUE))?;

        // Every element needs at least two bytes.
        if count > cursor.remaining() / 2 {
            return Err(count_error(ERR_COUNT_EXCEEDS_INPUT));
        }

        Ok(count)
    }
}

fn read_key(cursor: &mut Cursor<'_>) -> Result<Vec<u8>, CodecError> {
    let polarity = key_polarity(cursor)?;
    let mut key = Vec::new();
    scan_string(cursor, polarity, |byte| key.push(byte))?;
    cursor.expect_terminator(polarity)?;

    Ok(key)
}

fn skip_key(cursor: &mut Cursor<'_>) -> Result<(), CodecError> {
    let polarity = key_polarity(cursor)?;
    scan_string(cursor, polarity, |_| {})?;

    cursor.expect_terminator(polarity)
}

fn key_polarity(cursor: &mut Cursor<'_>) -> Result<Polarity, CodecError> {
    let start = cursor.offset();
    match cursor.read_tag()? {
        (TypeTag::String, polarity) => Ok(polarity),
        _ => Err(CodecError::malformed(start, ERR_OBJECT_KEY)),
    }
}

/// Walk a string payload up to (not including) the field terminator,
/// reporting each unescaped byte.
pub(crate) fn scan_string(
    cursor: &mut Cursor<'_>,
    polarity: Polarity,
    mut on_byte: impl FnMut(u8),
) -> Result<(), CodecError> {
    loop {
        let at = cursor.offset();
        let byte = cursor
            .next(polarity)
            .map_err(|_| CodecError::suffix(at, ERR_STRING_UNTERMINATED))?;
        if byte != TERMINATOR {
            on_byte(byte);
            continue;
        }

        match cursor.peek(polarity) {
            Some(TERMINATOR) => return Ok(()),
            Some(STRING_ESCAPE) => {
                cursor.advance(1)?;
                on_byte(TERMINATOR);
            }
            Some(_) => return Err(CodecError::suffix(at, ERR_STRING_ESCAPE)),
            None => return Err(CodecError::suffix(at, ERR_STRING_UNTERMINATED)),
        }
    }
}
