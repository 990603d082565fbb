use crate::{config::CodecConfig, value::Value};
use std::cmp::Ordering;

/// Total order over values that encoded keys reproduce bytewise under
/// `config`.
///
/// Categories compare by tag first. Within a length-prefixed structure the
/// element (or pair) count decides before any element does.
#[must_use]
pub fn collate(left: &Value, right: &Value, config: CodecConfig) -> Ordering {
    let by_tag = left.type_tag().to_u8().cmp(&right.type_tag().to_u8());
    if by_tag != Ordering::Equal {
        return by_tag;
    }

    match (left, right) {
        (Value::Number(left), Value::Number(right)) => left.cmp(right),
        (Value::String(left), Value::String(right)) => left.cmp(right),
        (Value::Array(left), Value::Array(right)) => {
            if config.array_len_prefix {
                let by_len = left.len().cmp(&right.len());
                if by_len != Ordering::Equal {
                    return by_len;
                }
            }

            left.iter()
                .zip(right)
                .map(|(left, right)| collate(left, right, config))
                .find(|ordering| *ordering != Ordering::Equal)
                .unwrap_or_else(|| left.len().cmp(&right.len()))
        }
        (Value::Object(left), Value::Object(right)) => {
            if config.property_len_prefix {
                let by_len = left.len().cmp(&right.len());
                if by_len != Ordering::Equal {
                    return by_len;
                }
            }

            left.iter()
                .zip(right)
                .map(|((left_key, left_value), (right_key, right_value))| {
                    left_key
                        .cmp(right_key)
                        .then_with(|| collate(left_value, right_value, config))
                })
                .find(|ordering| *ordering != Ordering::Equal)
                .unwrap_or_else(|| left.len().cmp(&right.len()))
        }
        // Same tag and no payload: Missing, Null, and each boolean.
        _ => Ordering::Equal,
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        collate(self, other, CodecConfig::default())
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
