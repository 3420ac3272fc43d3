// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;

use crate::array::consts::is_engine_na;
use crate::errors::ArrayError;

/// A dimensioned array of doubles in the engine's representation.
///
/// Values are stored in column-major order, the layout both the engine and
/// typical statistical hosts use. Missing elements hold
/// [`ENGINE_NA`](crate::array::ENGINE_NA).
///
/// An empty shape marks a flat vector whose only dimension is its length;
/// otherwise `product(shape) == values.len()` always holds.
///
/// # Example
/// ```
/// use gibbs_bridge::array::TypedArray;
///
/// let array = TypedArray::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], vec![2, 3])?
///     .with_dim_names(vec!["row".to_string(), "col".to_string()])?;
///
/// assert_eq!(array.dims(), vec![2, 3]);
/// assert_eq!(array.get(&[1, 2]), Some(6.0));
/// # Ok::<(), gibbs_bridge::errors::ArrayError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypedArray {
    values: Vec<f64>,
    shape: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dim_names: Option<Vec<String>>,
}

impl TypedArray {
    /// Build a flat vector.
    pub fn vector(values: Vec<f64>) -> Self {
        Self {
            values,
            shape: Vec::new(),
            dim_names: None,
        }
    }

    /// Build an array with an explicit shape.
    ///
    /// An empty shape is accepted and yields a flat vector. Every dimension
    /// must be positive and the shape must account for every value.
    pub fn new(values: Vec<f64>, shape: Vec<usize>) -> Result<Self, ArrayError> {
        if let Some(axis) = shape.iter().position(|&d| d == 0) {
            return Err(ArrayError::ZeroDimension { shape, axis });
        }
        if !shape.is_empty() {
            let expected: usize = shape.iter().product();
            if expected != values.len() {
                return Err(ArrayError::ShapeMismatch {
                    shape,
                    expected,
                    actual: values.len(),
                });
            }
        }
        Ok(Self {
            values,
            shape,
            dim_names: None,
        })
    }

    /// Attach one label per dimension.
    pub fn with_dim_names(mut self, names: Vec<String>) -> Result<Self, ArrayError> {
        let dims = self.ndim();
        if names.len() != dims {
            return Err(ArrayError::DimNamesMismatch {
                names: names.len(),
                dims,
            });
        }
        self.dim_names = Some(names);
        Ok(self)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The shape as supplied, which is empty for flat vectors.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// The effective dimensions: the shape, or `[len]` for a flat vector.
    pub fn dims(&self) -> Vec<usize> {
        if self.shape.is_empty() {
            vec![self.values.len()]
        } else {
            self.shape.clone()
        }
    }

    /// Number of effective dimensions, never zero.
    pub fn ndim(&self) -> usize {
        self.shape.len().max(1)
    }

    pub fn dim_names(&self) -> Option<&[String]> {
        self.dim_names.as_deref()
    }

    /// Element at a column-major multi-index, or `None` when out of range.
    pub fn get(&self, index: &[usize]) -> Option<f64> {
        let dims = self.dims();
        if index.len() != dims.len() {
            return None;
        }
        let mut offset = 0;
        let mut stride = 1;
        for (&i, &d) in index.iter().zip(dims.iter()) {
            if i >= d {
                return None;
            }
            offset += i * stride;
            stride *= d;
        }
        self.values.get(offset).copied()
    }

    /// True when the element at flat position `i` holds the missing sentinel.
    pub fn is_missing(&self, i: usize) -> bool {
        self.values.get(i).is_some_and(|&v| is_engine_na(v))
    }

    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|&&v| is_engine_na(v)).count()
    }
}
