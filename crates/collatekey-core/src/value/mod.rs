mod compare;


use crate::number::Number;
use collatekey_primitives::TypeTag;
use thiserror::Error as ThisError;

// re-exports
pub use compare::collate;

///
/// ObjectError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ObjectError {
    #[error("duplicate object key '{}'", String::from_utf8_lossy(.key))]
    DuplicateKey { key: Vec<u8> },
}

///
/// Value
///
/// One member of the collatable JSON universe. Strings and object keys are
/// raw bytes; the codec does not require UTF-8.
///
/// Object pairs are kept in the order given. `Value::object` is the
/// normalizing constructor (sorted keys, no duplicates).
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Value {
    Missing,
    Null,
    Bool(bool),
    Number(Number),
    String(Vec<u8>),
    Array(Vec<Self>),
    Object(Vec<(Vec<u8>, Self)>),
}

impl Value {
    /// Build an object with pairs sorted by key bytes.
    pub fn object<K>(pairs: impl IntoIterator<Item = (K, Self)>) -> Result<Self, ObjectError>
    where
        K: Into<Vec<u8>>,
    {
        let mut pairs: Vec<(Vec<u8>, Self)> = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        pairs.sort_by(|left, right| left.0.cmp(&right.0));

        if let Some(window) = pairs.windows(2).find(|window| window[0].0 == window[1].0) {
            return Err(ObjectError::DuplicateKey {
                key: window[0].0.clone(),
            });
        }

        Ok(Self::Object(pairs))
    }

    /// Tag this value is encoded under.
    #[must_use]
    pub const fn type_tag(&self) -> TypeTag {
        match self {
            Self::Missing => TypeTag::Missing,
            Self::Null => TypeTag::Null,
            Self::Bool(false) => TypeTag::False,
            Self::Bool(true) => TypeTag::True,
            Self::Number(_) => TypeTag::Number,
            Self::String(_) => TypeTag::String,
            Self::Array(_) => TypeTag::Array,
            Self::Object(_) => TypeTag::Object,
        }
    }

    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Self::Number(number) => Some(number),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::String(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Look up an object member by key.
    #[must_use]
    pub fn get(&self, key: &[u8]) -> Option<&Self> {
        match self {
            Self::Object(pairs) => pairs
                .iter()
                .find(|(candidate, _)| candidate.as_slice() == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.as_bytes().to_vec())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value.into_bytes())
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::Array(items)
    }
}

impl<T: Into<Self>> FromIterator<T> for Value {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::Array(iter.into_iter().map(Into::into).collect())
    }
}

macro_rules! impl_value_from_int {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Number(Number::from(value))
                }
            }
        )*
    };
}

impl_value_from_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize);
