use crate::error::{
    CodecError, ERR_MISSING_TERMINATOR, ERR_TRUNCATED_FIELD, ERR_UNKNOWN_TAG,
};
use collatekey_primitives::{Polarity, TERMINATOR, TypeTag};

///
/// Cursor
///
/// Forward-only reader over stored key bytes. Offsets in errors are absolute
/// positions into the slice the cursor was built from.
///

#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub(crate) const fn offset(&self) -> usize {
        self.pos
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    pub(crate) const fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.pos)
    }

    pub(crate) fn peek_raw(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Next byte mapped to normal polarity, without consuming it.
    pub(crate) fn peek(&self, polarity: Polarity) -> Option<u8> {
        self.peek_raw().map(|byte| polarity.apply(byte))
    }

    /// Consume one byte and map it to normal polarity.
    pub(crate) fn next(&mut self, polarity: Polarity) -> Result<u8, CodecError> {
        let byte = self
            .peek(polarity)
            .ok_or_else(|| self.malformed(ERR_TRUNCATED_FIELD))?;
        self.pos += 1;

        Ok(byte)
    }

    pub(crate) fn advance(&mut self, count: usize) -> Result<(), CodecError> {
        if count > self.remaining() {
            return Err(CodecError::malformed(self.bytes.len(), ERR_TRUNCATED_FIELD));
        }
        self.pos += count;

        Ok(())
    }

    /// Consume a field-opening tag byte in whichever polarity it is stored.
    pub(crate) fn read_tag(&mut self) -> Result<(TypeTag, Polarity), CodecError> {
        let byte = self
            .peek_raw()
            .ok_or_else(|| self.malformed(ERR_TRUNCATED_FIELD))?;
        let classified = TypeTag::classify(byte).ok_or_else(|| self.malformed(ERR_UNKNOWN_TAG))?;
        self.pos += 1;

        Ok(classified)
    }

    /// Consume the terminator closing a scalar field of the given polarity.
    pub(crate) fn expect_terminator(&mut self, polarity: Polarity) -> Result<(), CodecError> {
        match self.peek(polarity) {
            Some(TERMINATOR) => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(self.malformed(ERR_MISSING_TERMINATOR)),
            None => Err(self.malformed(ERR_TRUNCATED_FIELD)),
        }
    }

    /// Consume a structure-closing terminator stored in either polarity.
    pub(crate) fn expect_any_terminator(&mut self) -> Result<Polarity, CodecError> {
        let byte = self
            .peek_raw()
            .ok_or_else(|| self.malformed(ERR_TRUNCATED_FIELD))?;
        let polarity =
            Polarity::of_terminator(byte).ok_or_else(|| self.malformed(ERR_MISSING_TERMINATOR))?;
        self.pos += 1;

        Ok(polarity)
    }

    /// Whether the next byte closes a structure (terminator in either polarity).
    pub(crate) fn at_any_terminator(&self) -> bool {
        self.peek_raw()
            .is_some_and(|byte| Polarity::of_terminator(byte).is_some())
    }

    pub(crate) const fn malformed(&self, reason: &'static str) -> CodecError {
        CodecError::malformed(self.pos, reason)
    }

    /// Bytes consumed since `start`.
    pub(crate) fn since(&self, start: usize) -> &'a [u8] {
        &self.bytes[start..self.pos]
    }

    /// Unconsumed bytes.
    pub(crate) fn rest(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }
}
