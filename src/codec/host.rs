// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed model of the host environment's generic list structure.
//!
//! Hosts hand the binding a named list whose entries are atomic vectors,
//! optionally carrying `dim` and per-dimension name attributes. Each element
//! is an `Option`, and `None` is the host's missing-value marker.

/// An atomic host vector.
#[derive(Debug, Clone, PartialEq)]
pub enum HostVector {
    Logical(Vec<Option<bool>>),
    Integer(Vec<Option<i32>>),
    Double(Vec<Option<f64>>),
    Character(Vec<Option<String>>),
}

impl HostVector {
    pub fn len(&self) -> usize {
        match self {
            HostVector::Logical(v) => v.len(),
            HostVector::Integer(v) => v.len(),
            HostVector::Double(v) => v.len(),
            HostVector::Character(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Host-facing name of the storage type.
    pub fn type_name(&self) -> &'static str {
        match self {
            HostVector::Logical(_) => "logical",
            HostVector::Integer(_) => "integer",
            HostVector::Double(_) => "double",
            HostVector::Character(_) => "character",
        }
    }

    /// Coerce to doubles, keeping missing elements missing.
    ///
    /// Character data has no numeric reading and yields `None`.
    pub fn to_numeric(&self) -> Option<Vec<Option<f64>>> {
        match self {
            HostVector::Logical(v) => Some(
                v.iter()
                    .map(|b| b.map(|b| if b { 1.0 } else { 0.0 }))
                    .collect(),
            ),
            HostVector::Integer(v) => Some(v.iter().map(|i| i.map(f64::from)).collect()),
            HostVector::Double(v) => Some(v.clone()),
            HostVector::Character(_) => None,
        }
    }
}

/// A host vector plus its dimension attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct HostArray {
    pub data: HostVector,
    pub dim: Option<Vec<usize>>,
    pub dim_names: Option<Vec<String>>,
}

impl HostArray {
    /// A plain vector without dimension attributes.
    pub fn new(data: HostVector) -> Self {
        Self {
            data,
            dim: None,
            dim_names: None,
        }
    }

    /// A double vector with no missing elements.
    pub fn doubles(values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(HostVector::Double(values.into_iter().map(Some).collect()))
    }

    pub fn with_dim(mut self, dim: Vec<usize>) -> Self {
        self.dim = Some(dim);
        self
    }

    pub fn with_dim_names(mut self, names: Vec<String>) -> Self {
        self.dim_names = Some(names);
        self
    }
}

/// One entry of a host list.
#[derive(Debug, Clone, PartialEq)]
pub enum HostValue {
    Null,
    Array(HostArray),
    List(HostList),
}

impl HostValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            HostValue::Null => "NULL",
            HostValue::Array(array) => array.data.type_name(),
            HostValue::List(_) => "list",
        }
    }

    pub fn as_array(&self) -> Option<&HostArray> {
        match self {
            HostValue::Array(array) => Some(array),
            _ => None,
        }
    }

    /// A single character string, as used for the RNG name of a chain state.
    pub fn string(value: impl Into<String>) -> Self {
        HostValue::Array(HostArray::new(HostVector::Character(vec![Some(value.into())])))
    }
}

impl From<HostArray> for HostValue {
    fn from(array: HostArray) -> Self {
        HostValue::Array(array)
    }
}

impl From<HostList> for HostValue {
    fn from(list: HostList) -> Self {
        HostValue::List(list)
    }
}

/// A generic host list with optional names.
///
/// Lists built through [`HostList::new`] and [`HostList::push`] are always
/// fully named. Lists arriving from a host may carry no names or a mismatched
/// name vector, which the codec rejects.
#[derive(Debug, Clone, PartialEq)]
pub struct HostList {
    pub names: Option<Vec<String>>,
    pub values: Vec<HostValue>,
}

impl HostList {
    /// Create an empty named list
    pub fn new() -> Self {
        Self {
            names: Some(Vec::new()),
            values: Vec::new(),
        }
    }

    /// Create a list without a names attribute
    pub fn unnamed(values: Vec<HostValue>) -> Self {
        Self {
            names: None,
            values,
        }
    }

    /// Append a named entry
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<HostValue>) {
        self.names.get_or_insert_with(Vec::new).push(name.into());
        self.values.push(value.into());
    }

    /// Builder form of [`HostList::push`]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<HostValue>) -> Self {
        self.push(name, value);
        self
    }

    /// First entry carrying `name`
    pub fn get(&self, name: &str) -> Option<&HostValue> {
        let names = self.names.as_ref()?;
        names
            .iter()
            .position(|n| n == name)
            .and_then(|i| self.values.get(i))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entry names, empty when the list is unnamed
    pub fn names(&self) -> &[String] {
        self.names.as_deref().unwrap_or(&[])
    }
}

impl Default for HostList {
    fn default() -> Self {
        Self::new()
    }
}
