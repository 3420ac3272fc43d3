// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! JSON rendition of host lists.
//!
//! Lets data and initial values live in plain files:
//!
//! ```json
//! {
//!   "N": 3,
//!   "y": [1.2, null, 0.7],
//!   "Y": { "value": [1, 2, 3, 4, 5, 6], "dim": [3, 2], "dimnames": ["subject", "time"] }
//! }
//! ```
//!
//! Numbers and `null` map to double scalars (`null` is missing), booleans to
//! logical, strings to character, arrays to vectors of one kind, and objects
//! with a `value` key to dimensioned arrays. Any other object is a nested
//! list.
//!
//! The mapping is lossy in two places. Non-finite doubles have no JSON form
//! and are written as `null`, so `NaN` and infinities read back as missing.
//! JSON objects have unique keys, so when a host list repeats a name the last
//! entry under that name is the one written.

use serde_json::{Map, Number, Value};

use crate::codec::{HostArray, HostList, HostValue, HostVector};
use crate::errors::InputError;

/// Parse a JSON document into a host list.
pub fn host_list_from_str(text: &str) -> Result<HostList, InputError> {
    let value: Value = serde_json::from_str(text).map_err(|e| InputError::Json(e.to_string()))?;
    host_list_from_json(&value)
}

/// Map a JSON object onto a named host list.
pub fn host_list_from_json(value: &Value) -> Result<HostList, InputError> {
    let object = value
        .as_object()
        .ok_or_else(|| InputError::Json(format!("expected an object, found {}", kind(value))))?;

    let mut list = HostList::new();
    for (name, entry) in object {
        list.push(name.clone(), host_value_from_json(name, entry)?);
    }
    Ok(list)
}

fn host_value_from_json(name: &str, value: &Value) -> Result<HostValue, InputError> {
    match value {
        Value::Null => Ok(HostArray::new(HostVector::Double(vec![None])).into()),
        Value::Bool(b) => Ok(HostArray::new(HostVector::Logical(vec![Some(*b)])).into()),
        Value::Number(n) => Ok(HostArray::new(HostVector::Double(vec![n.as_f64()])).into()),
        Value::String(s) => Ok(HostValue::string(s.clone())),
        Value::Array(items) => Ok(HostArray::new(vector_from_json(name, items)?).into()),
        Value::Object(object) if object.contains_key("value") => {
            array_from_json(name, object).map(HostValue::Array)
        }
        Value::Object(_) => host_list_from_json(value).map(HostValue::List),
    }
}

fn array_from_json(name: &str, object: &Map<String, Value>) -> Result<HostArray, InputError> {
    let data = match object.get("value") {
        Some(Value::Array(items)) => vector_from_json(name, items)?,
        Some(scalar) => match host_value_from_json(name, scalar)? {
            HostValue::Array(array) => array.data,
            _ => return Err(entry_error(name, "'value' must be a vector")),
        },
        None => return Err(entry_error(name, "missing 'value'")),
    };

    let mut array = HostArray::new(data);

    if let Some(dim) = object.get("dim") {
        let dim = dim
            .as_array()
            .ok_or_else(|| entry_error(name, "'dim' must be an array"))?
            .iter()
            .map(|d| {
                d.as_u64()
                    .map(|d| d as usize)
                    .ok_or_else(|| entry_error(name, "'dim' entries must be non-negative integers"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        array = array.with_dim(dim);
    }

    if let Some(names) = object.get("dimnames") {
        let names = names
            .as_array()
            .ok_or_else(|| entry_error(name, "'dimnames' must be an array"))?
            .iter()
            .map(|n| {
                n.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| entry_error(name, "'dimnames' entries must be strings"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        array = array.with_dim_names(names);
    }

    Ok(array)
}

fn vector_from_json(name: &str, items: &[Value]) -> Result<HostVector, InputError> {
    let first = items.iter().find(|v| !v.is_null());
    match first {
        None | Some(Value::Number(_)) => items
            .iter()
            .map(|v| match v {
                Value::Null => Ok(None),
                Value::Number(n) => Ok(n.as_f64()),
                other => Err(mixed(name, "number", other)),
            })
            .collect::<Result<_, _>>()
            .map(HostVector::Double),
        Some(Value::Bool(_)) => items
            .iter()
            .map(|v| match v {
                Value::Null => Ok(None),
                Value::Bool(b) => Ok(Some(*b)),
                other => Err(mixed(name, "boolean", other)),
            })
            .collect::<Result<_, _>>()
            .map(HostVector::Logical),
        Some(Value::String(_)) => items
            .iter()
            .map(|v| match v {
                Value::Null => Ok(None),
                Value::String(s) => Ok(Some(s.clone())),
                other => Err(mixed(name, "string", other)),
            })
            .collect::<Result<_, _>>()
            .map(HostVector::Character),
        Some(other) => Err(entry_error(
            name,
            &format!("vectors cannot hold {}", kind(other)),
        )),
    }
}

/// Render a host list as a JSON object.
///
/// Unnamed entries are keyed by their 1-based position. A repeated name
/// keeps only its last entry.
pub fn host_list_to_json(list: &HostList) -> Value {
    let mut object = Map::new();
    for (i, value) in list.values.iter().enumerate() {
        let key = list
            .names
            .as_ref()
            .and_then(|names| names.get(i))
            .cloned()
            .unwrap_or_else(|| (i + 1).to_string());
        object.insert(key, host_value_to_json(value));
    }
    Value::Object(object)
}

fn host_value_to_json(value: &HostValue) -> Value {
    match value {
        HostValue::Null => Value::Null,
        HostValue::List(list) => host_list_to_json(list),
        HostValue::Array(array) => {
            let elements = vector_to_json(&array.data);
            match &array.dim {
                None if elements.len() == 1 => elements.into_iter().next().unwrap_or(Value::Null),
                None => Value::Array(elements),
                Some(dim) => {
                    let mut object = Map::new();
                    object.insert("value".to_string(), Value::Array(elements));
                    object.insert(
                        "dim".to_string(),
                        Value::Array(dim.iter().map(|&d| Value::from(d)).collect()),
                    );
                    if let Some(names) = &array.dim_names {
                        object.insert(
                            "dimnames".to_string(),
                            Value::Array(names.iter().map(|n| Value::from(n.as_str())).collect()),
                        );
                    }
                    Value::Object(object)
                }
            }
        }
    }
}

fn vector_to_json(vector: &HostVector) -> Vec<Value> {
    match vector {
        HostVector::Logical(v) => v.iter().map(|b| b.map_or(Value::Null, Value::Bool)).collect(),
        HostVector::Integer(v) => v.iter().map(|i| i.map_or(Value::Null, Value::from)).collect(),
        HostVector::Double(v) => v
            .iter()
            .map(|d| d.and_then(Number::from_f64).map_or(Value::Null, Value::Number))
            .collect(),
        HostVector::Character(v) => v
            .iter()
            .map(|s| s.as_ref().map_or(Value::Null, |s| Value::from(s.as_str())))
            .collect(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn mixed(name: &str, expected: &str, found: &Value) -> InputError {
    entry_error(
        name,
        &format!("mixes {} elements with {}", expected, kind(found)),
    )
}

fn entry_error(name: &str, reason: &str) -> InputError {
    InputError::Json(format!("entry '{}': {}", name, reason))
}
