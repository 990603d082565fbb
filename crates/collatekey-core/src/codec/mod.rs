//! Module: codec
//! Responsibility: public entry points for encoding, decoding, navigation,
//! and order reversal of collation keys.
//! Does not own: the type-order model (collatekey-primitives) or number
//! payload layout (`number::codec`).
//! Boundary: every operation is pure over caller buffers; the only shared
//! state is the injected buffer pool and metrics sink.

pub(crate) mod cursor;
mod encode;
mod extract;
mod reverse;
mod walk;


use crate::{
    MAX_NESTING_DEPTH,
    config::{CodecConfig, DescVector},
    error::{CodecError, ERR_TRAILING_BYTES},
    key::EncodedKey,
    obs::{CodecOp, GlobalMetricsSink, MetricsEvent, MetricsSink},
    pool::BufferPool,
    value::Value,
};
use cursor::Cursor;
use encode::Encoder;
use std::{cmp::Ordering, fmt, ops::Range, sync::Arc};
use walk::Walker;

// Depth for the children of a structure entered at `depth`.
pub(crate) const fn enter_structure(depth: usize) -> Result<usize, CodecError> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(CodecError::NestingTooDeep {
            limit: MAX_NESTING_DEPTH,
        });
    }

    Ok(depth + 1)
}

///
/// Codec
///
/// Collation codec bound to one `CodecConfig`. Cheap to clone; clones share
/// the buffer pool and metrics sink.
///

#[derive(Clone)]
pub struct Codec {
    config: CodecConfig,
    pool: Arc<BufferPool>,
    sink: Arc<dyn MetricsSink>,
}

impl Codec {
    #[must_use]
    pub fn new(config: CodecConfig) -> Self {
        Self::with_pool(config, Arc::new(BufferPool::new()))
    }

    #[must_use]
    pub fn with_pool(config: CodecConfig, pool: Arc<BufferPool>) -> Self {
        Self {
            config,
            pool,
            sink: Arc::new(GlobalMetricsSink),
        }
    }

    /// Replace the metrics sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn MetricsSink>) -> Self {
        self.sink = sink;
        self
    }

    #[must_use]
    pub const fn config(&self) -> CodecConfig {
        self.config
    }

    #[must_use]
    pub const fn pool(&self) -> &Arc<BufferPool> {
        &self.pool
    }

    fn encoder(&self) -> Encoder<'_> {
        Encoder::new(self.config, &self.pool)
    }

    fn walker(&self) -> Walker<'_> {
        Walker::new(self.config, &self.pool)
    }

    // ------------------------------------------------------------------
    // Encoding
    // ------------------------------------------------------------------

    pub fn encode(&self, value: &Value) -> Result<EncodedKey, CodecError> {
        let mut out = Vec::new();
        self.encode_into(value, &mut out)?;

        Ok(out.into())
    }

    /// Encode each value as one top-level field of a composite key.
    pub fn encode_composite(&self, values: &[Value]) -> Result<EncodedKey, CodecError> {
        let encoder = self.encoder();
        let mut out = Vec::new();
        let result = values
            .iter()
            .try_for_each(|value| encoder.encode_field(&mut out, value, 0));

        self.observe(CodecOp::Encode, out.len(), result)?;

        Ok(out.into())
    }

    /// Append one field to `out`. On error `out` is restored to its
    /// original length.
    pub fn encode_into(&self, value: &Value, out: &mut Vec<u8>) -> Result<(), CodecError> {
        let start = out.len();
        let result = self.encoder().encode_field(out, value, 0);
        if result.is_err() {
            out.truncate(start);
        }

        self.observe(CodecOp::Encode, out.len() - start, result)
    }

    // ------------------------------------------------------------------
    // Decoding
    // ------------------------------------------------------------------

    /// Decode exactly one field; trailing bytes are an error.
    pub fn decode(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        let result = self.decode_single(bytes);

        self.observe(CodecOp::Decode, bytes.len(), result)
    }

    /// Decode every top-level field of a composite key.
    pub fn decode_composite(&self, bytes: &[u8]) -> Result<Vec<Value>, CodecError> {
        let result = self.decode_fields(bytes);

        self.observe(CodecOp::Decode, bytes.len(), result)
    }

    fn decode_single(&self, bytes: &[u8]) -> Result<Value, CodecError> {
        let mut cursor = Cursor::new(bytes);
        let value = self.walker().decode_field(&mut cursor, 0)?;
        if !cursor.is_empty() {
            return Err(cursor.malformed(ERR_TRAILING_BYTES));
        }

        Ok(value)
    }

    fn decode_fields(&self, bytes: &[u8]) -> Result<Vec<Value>, CodecError> {
        let walker = self.walker();
        let mut cursor = Cursor::new(bytes);
        let mut values = Vec::new();
        while !cursor.is_empty() {
            values.push(walker.decode_field(&mut cursor, 0)?);
        }

        Ok(values)
    }

    /// Parse JSON text and encode it as one field.
    pub fn encode_json(&self, text: &str) -> Result<EncodedKey, CodecError> {
        let value = Value::from_json_str(text)?;

        self.encode(&value)
    }

    /// Decode one field and render it as JSON text.
    pub fn decode_json(&self, bytes: &[u8]) -> Result<String, CodecError> {
        Ok(self.decode(bytes)?.to_json_string()?)
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// First field of `bytes` and the bytes after it.
    pub fn split_field<'a>(&self, bytes: &'a [u8]) -> Result<(&'a [u8], &'a [u8]), CodecError> {
        let result = extract::split_field(&self.walker(), bytes);

        self.observe(CodecOp::Extract, bytes.len(), result)
    }

    /// The `position`-th (1-based) top-level field and the bytes after it.
    pub fn extract_field<'a>(
        &self,
        key: &'a [u8],
        position: usize,
    ) -> Result<(&'a [u8], &'a [u8]), CodecError> {
        let result = extract::extract_field(&self.walker(), key, position);

        self.observe(CodecOp::Extract, key.len(), result)
    }

    /// The `position`-th (1-based) element of an array field, or pair of an
    /// object field, and the elements after it inside the structure.
    pub fn extract_element<'a>(
        &self,
        field: &'a [u8],
        position: usize,
    ) -> Result<(&'a [u8], &'a [u8]), CodecError> {
        let result = extract::extract_element(&self.walker(), field, position);

        self.observe(CodecOp::Extract, field.len(), result)
    }

    /// Byte range of every top-level field.
    pub fn field_ranges(&self, key: &[u8]) -> Result<Vec<Range<usize>>, CodecError> {
        let result = extract::field_ranges(&self.walker(), key);

        self.observe(CodecOp::Extract, key.len(), result)
    }

    pub fn field_count(&self, key: &[u8]) -> Result<usize, CodecError> {
        let result = extract::field_count(&self.walker(), key);

        self.observe(CodecOp::Extract, key.len(), result)
    }

    /// Order two keys by their `position`-th fields alone.
    pub fn compare_field(
        &self,
        left: &[u8],
        right: &[u8],
        position: usize,
    ) -> Result<Ordering, CodecError> {
        let result = extract::compare_field(&self.walker(), left, right, position);

        self.observe(CodecOp::Extract, left.len() + right.len(), result)
    }

    // ------------------------------------------------------------------
    // Order reversal
    // ------------------------------------------------------------------

    /// Complement the fields flagged in `desc`, in place. Returns the number
    /// of fields flipped; on error `key` is unchanged.
    pub fn reverse_collate(&self, key: &mut [u8], desc: &[bool]) -> Result<usize, CodecError> {
        let result = reverse::reverse_collate(&self.walker(), key, desc);
        if let Ok(fields) = result {
            self.sink.record(MetricsEvent::FieldsReversed {
                fields: saturating_u64(fields),
            });
        }

        self.observe(CodecOp::Reverse, key.len(), result)
    }

    /// Owned form of `reverse_collate`.
    pub fn apply_desc(&self, key: EncodedKey, desc: &DescVector) -> Result<EncodedKey, CodecError> {
        let mut bytes = key.into_bytes();
        self.reverse_collate(&mut bytes, desc)?;

        Ok(bytes.into())
    }

    // Report one operation outcome to the sink; decode-side failures are
    // also traced.
    fn observe<T>(
        &self,
        op: CodecOp,
        bytes: usize,
        result: Result<T, CodecError>,
    ) -> Result<T, CodecError> {
        match &result {
            Ok(_) => self.sink.record(MetricsEvent::Completed {
                op,
                bytes: saturating_u64(bytes),
            }),
            Err(err) => {
                self.sink.record(MetricsEvent::Failed {
                    op,
                    kind: err.kind(),
                });
                if op != CodecOp::Encode {
                    tracing::debug!(
                        op = op.label(),
                        offset = ?err.offset(),
                        class = %err.class(),
                        error = %err,
                        "collation key rejected"
                    );
                }
            }
        }

        result
    }
}

fn saturating_u64(value: usize) -> u64 {
    u64::try_from(value).unwrap_or(u64::MAX)
}

impl Default for Codec {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl fmt::Debug for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec")
            .field("config", &self.config)
            .field("pool", &self.pool.stats())
            .finish_non_exhaustive()
    }
}
