// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use std::collections::btree_map;
use std::collections::BTreeMap;

use crate::array::TypedArray;
use crate::errors::ArrayError;

/// Named typed arrays exchanged with the engine.
///
/// Names are unique and non-empty. Iteration is lexicographic by name, so
/// every conversion of the same table produces the same output order.
/// Tables are assembled with [`DataTable::insert`] and treated as read-only
/// once handed to an engine operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DataTable(BTreeMap<String, TypedArray>);

impl DataTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add a named array, rejecting empty and duplicate names
    pub fn insert(&mut self, name: impl Into<String>, array: TypedArray) -> Result<(), ArrayError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ArrayError::EmptyName);
        }
        match self.0.entry(name) {
            btree_map::Entry::Occupied(entry) => Err(ArrayError::DuplicateName(entry.key().clone())),
            btree_map::Entry::Vacant(entry) => {
                entry.insert(array);
                Ok(())
            }
        }
    }

    /// Get an array by name
    pub fn get(&self, name: &str) -> Option<&TypedArray> {
        self.0.get(name)
    }

    /// Check if a variable exists
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Variable names in iteration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, TypedArray> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a DataTable {
    type Item = (&'a String, &'a TypedArray);
    type IntoIter = btree_map::Iter<'a, String, TypedArray>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for DataTable {
    type Item = (String, TypedArray);
    type IntoIter = btree_map::IntoIter<String, TypedArray>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<DataTable> for BTreeMap<String, TypedArray> {
    fn from(table: DataTable) -> Self {
        table.0
    }
}
