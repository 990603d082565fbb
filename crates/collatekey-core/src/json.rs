//! Module: json
//! Responsibility: conversion between `Value` and JSON documents.
//! Does not own: JSON text parsing (delegated to serde_json).
//! Boundary: `Missing` and non-UTF-8 strings have no JSON form.

use crate::{
    number::{Number, NumberError},
    value::{ObjectError, Value},
};
use serde_json::{Map, Value as JsonValue};
use thiserror::Error as ThisError;

///
/// JsonError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum JsonError {
    #[error("invalid JSON text: {message}")]
    Parse { message: String },

    #[error("missing values have no JSON form")]
    Missing,

    #[error("string is not valid UTF-8")]
    NonUtf8,

    #[error("number {number} has no finite JSON form")]
    NumberRange { number: String },

    #[error(transparent)]
    Number(#[from] NumberError),

    #[error(transparent)]
    Object(#[from] ObjectError),
}

impl TryFrom<&JsonValue> for Value {
    type Error = JsonError;

    fn try_from(json: &JsonValue) -> Result<Self, Self::Error> {
        let value = match json {
            JsonValue::Null => Self::Null,
            JsonValue::Bool(flag) => Self::Bool(*flag),
            // Textual form keeps every digit serde_json parsed.
            JsonValue::Number(number) => Self::Number(number.to_string().parse()?),
            JsonValue::String(text) => Self::from(text.as_str()),
            JsonValue::Array(items) => items
                .iter()
                .map(Self::try_from)
                .collect::<Result<Vec<_>, _>>()?
                .into(),
            JsonValue::Object(members) => Self::object(
                members
                    .iter()
                    .map(|(key, value)| Ok((key.as_str(), Self::try_from(value)?)))
                    .collect::<Result<Vec<_>, JsonError>>()?,
            )?,
        };

        Ok(value)
    }
}

impl TryFrom<JsonValue> for Value {
    type Error = JsonError;

    fn try_from(json: JsonValue) -> Result<Self, Self::Error> {
        Self::try_from(&json)
    }
}

impl Value {
    /// Parse JSON text into a value.
    pub fn from_json_str(text: &str) -> Result<Self, JsonError> {
        let json: JsonValue = serde_json::from_str(text).map_err(|err| JsonError::Parse {
            message: err.to_string(),
        })?;

        Self::try_from(&json)
    }

    /// Convert to a JSON document.
    pub fn to_json(&self) -> Result<JsonValue, JsonError> {
        let json = match self {
            Self::Missing => return Err(JsonError::Missing),
            Self::Null => JsonValue::Null,
            Self::Bool(flag) => JsonValue::Bool(*flag),
            Self::Number(number) => JsonValue::Number(json_number(number)?),
            Self::String(bytes) => JsonValue::String(utf8(bytes)?),
            Self::Array(items) => JsonValue::Array(
                items
                    .iter()
                    .map(Self::to_json)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Self::Object(pairs) => {
                let mut members = Map::new();
                for (key, value) in pairs {
                    members.insert(utf8(key)?, value.to_json()?);
                }
                JsonValue::Object(members)
            }
        };

        Ok(json)
    }

    /// Render as compact JSON text.
    pub fn to_json_string(&self) -> Result<String, JsonError> {
        Ok(self.to_json()?.to_string())
    }
}

fn json_number(number: &Number) -> Result<serde_json::Number, JsonError> {
    if let Some(integer) = number.to_i64() {
        return Ok(integer.into());
    }

    number
        .to_f64()
        .and_then(serde_json::Number::from_f64)
        .ok_or_else(|| JsonError::NumberRange {
            number: number.to_string(),
        })
}

fn utf8(bytes: &[u8]) -> Result<String, JsonError> {
    String::from_utf8(bytes.to_vec()).map_err(|_| JsonError::NonUtf8)
}

///
/// TESTS
///
