// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dynamic values exchanged with the embedding JavaScript runtime.

use std::collections::BTreeMap;

use dummy_detector_core::Detection;
use serde_json::{Map, Number, Value};

/// A JavaScript value as seen from Rust.
///
/// Mirrors what a JSI host function can receive: numbers are always `f64`,
/// and typed arrays arrive as `Bytes`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HostValue {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Bytes(Vec<u8>),
    Array(Vec<HostValue>),
    Object(BTreeMap<String, HostValue>),
}

impl HostValue {
    /// The number, if this is a `Number`. No string-to-number coercion.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[HostValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Look up a property on an `Object`.
    pub fn get(&self, key: &str) -> Option<&HostValue> {
        match self {
            Self::Object(map) => map.get(key),
            _ => None,
        }
    }

    /// `null` or `undefined`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }
}

impl From<&Detection> for HostValue {
    fn from(det: &Detection) -> Self {
        let mut obj = BTreeMap::new();
        obj.insert("x1".to_owned(), Self::Number(det.x1));
        obj.insert("y1".to_owned(), Self::Number(det.y1));
        obj.insert("x2".to_owned(), Self::Number(det.x2));
        obj.insert("y2".to_owned(), Self::Number(det.y2));
        obj.insert("score".to_owned(), Self::Number(det.score));
        obj.insert("label".to_owned(), Self::String(det.label.clone()));
        Self::Object(obj)
    }
}

impl From<&[Detection]> for HostValue {
    fn from(dets: &[Detection]) -> Self {
        Self::Array(dets.iter().map(Self::from).collect())
    }
}

impl From<Value> for HostValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<HostValue> for Value {
    fn from(value: HostValue) -> Self {
        match value {
            HostValue::Undefined | HostValue::Null => Value::Null,
            HostValue::Bool(b) => Value::Bool(b),
            HostValue::Number(n) => Number::from_f64(n).map_or(Value::Null, Value::Number),
            HostValue::String(s) => Value::String(s),
            HostValue::Bytes(bytes) => Value::Array(bytes.into_iter().map(Value::from).collect()),
            HostValue::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
            HostValue::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}
