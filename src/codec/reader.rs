// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Host list to data table conversion.

use crate::array::{DataTable, TypedArray, ENGINE_NA};
use crate::codec::{HostList, HostValue};
use crate::errors::{ArrayError, InputError};
use crate::observability::messages::codec::{EntryDropped, TableDecoded};
use crate::observability::messages::StructuredLog;

/// Convert a named host list into a data table.
///
/// * every name must be present and non-empty, one per entry
/// * logical and integer entries are coerced to double; character data and
///   nested lists are rejected
/// * an entry's `dim` becomes the array shape, otherwise it is a flat vector
/// * zero-length entries (including `NULL`) are left out of the table
/// * host missing elements become [`ENGINE_NA`]
///
/// # Example
/// ```
/// use gibbs_bridge::codec::{read_data_table, HostArray, HostList, HostVector};
///
/// let data = HostList::new()
///     .with("x", HostArray::new(HostVector::Double(vec![Some(1.0), None, Some(3.0)])))
///     .with("empty", HostArray::doubles([]));
///
/// let table = read_data_table(&data)?;
/// assert_eq!(table.len(), 1);
/// assert!(table.get("x").unwrap().is_missing(1));
/// # Ok::<(), gibbs_bridge::errors::InputError>(())
/// ```
pub fn read_data_table(list: &HostList) -> Result<DataTable, InputError> {
    let names = match &list.names {
        Some(names) if names.len() == list.values.len() => names,
        other => {
            return Err(InputError::NotNamed {
                names: other.as_ref().map_or(0, Vec::len),
                entries: list.values.len(),
            })
        }
    };

    let mut table = DataTable::new();
    let mut dropped = 0;
    let mut missing = 0;

    for (name, value) in names.iter().zip(list.values.iter()) {
        if name.is_empty() {
            return Err(InputError::Array {
                name: name.clone(),
                source: ArrayError::EmptyName,
            });
        }

        let array = match value {
            HostValue::Null => {
                EntryDropped {
                    name,
                    host_type: value.type_name(),
                }
                .log();
                dropped += 1;
                continue;
            }
            HostValue::List(_) => {
                return Err(InputError::NotNumeric {
                    name: name.clone(),
                    found: value.type_name(),
                })
            }
            HostValue::Array(array) => array,
        };

        let numeric = array.data.to_numeric().ok_or_else(|| InputError::NotNumeric {
            name: name.clone(),
            found: array.data.type_name(),
        })?;

        if numeric.is_empty() {
            EntryDropped {
                name,
                host_type: array.data.type_name(),
            }
            .log();
            dropped += 1;
            continue;
        }

        let values: Vec<f64> = numeric
            .into_iter()
            .map(|v| {
                v.unwrap_or_else(|| {
                    missing += 1;
                    ENGINE_NA
                })
            })
            .collect();

        let typed = build_array(values, array.dim.as_ref(), array.dim_names.as_ref()).map_err(
            |source| InputError::Array {
                name: name.clone(),
                source,
            },
        )?;

        table.insert(name.clone(), typed).map_err(|source| InputError::Array {
            name: name.clone(),
            source,
        })?;
    }

    TableDecoded {
        entries: table.len(),
        dropped,
        missing,
    }
    .log();

    Ok(table)
}

fn build_array(
    values: Vec<f64>,
    dim: Option<&Vec<usize>>,
    dim_names: Option<&Vec<String>>,
) -> Result<TypedArray, ArrayError> {
    let array = match dim {
        Some(dim) => TypedArray::new(values, dim.clone())?,
        None => TypedArray::vector(values),
    };
    match dim_names {
        Some(names) => array.with_dim_names(names.clone()),
        None => Ok(array),
    }
}

impl TryFrom<&HostList> for DataTable {
    type Error = InputError;

    fn try_from(list: &HostList) -> Result<Self, Self::Error> {
        read_data_table(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{HostArray, HostVector};

    #[test]
    fn test_scalar_and_vector_become_flat_arrays() {
        let data = HostList::new()
            .with("n", HostArray::doubles([10.0]))
            .with("x", HostArray::doubles([1.0, 2.0, 3.0]));

        let table = read_data_table(&data).unwrap();
        assert_eq!(table.get("n").unwrap().dims(), vec![1]);
        assert_eq!(table.get("x").unwrap().values(), &[1.0, 2.0, 3.0]);
        assert!(table.get("x").unwrap().shape().is_empty());
    }

    #[test]
    fn test_dim_attribute_becomes_shape() {
        let data = HostList::new().with(
            "Y",
            HostArray::doubles([1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
                .with_dim(vec![3, 2])
                .with_dim_names(vec!["subject".to_string(), "time".to_string()]),
        );

        let table = read_data_table(&data).unwrap();
        let y = table.get("Y").unwrap();
        assert_eq!(y.shape(), &[3, 2]);
        assert_eq!(y.get(&[2, 1]), Some(6.0));
        assert_eq!(y.dim_names().unwrap()[1], "time");
    }

    #[test]
    fn test_missing_elements_become_sentinel() {
        let data = HostList::new().with(
            "y",
            HostArray::new(HostVector::Integer(vec![Some(1), None, Some(3)])),
        );

        let table = read_data_table(&data).unwrap();
        assert_eq!(table.get("y").unwrap().values(), &[1.0, ENGINE_NA, 3.0]);
    }

    #[test]
    fn test_nan_is_not_treated_as_missing() {
        let data = HostList::new().with(
            "y",
            HostArray::new(HostVector::Double(vec![Some(f64::NAN)])),
        );

        let table = read_data_table(&data).unwrap();
        let y = table.get("y").unwrap();
        assert!(y.values()[0].is_nan());
        assert_eq!(y.missing_count(), 0);
    }

    #[test]
    fn test_zero_length_and_null_entries_are_dropped() {
        let data = HostList::new()
            .with("empty", HostArray::doubles([]))
            .with("nothing", HostValue::Null)
            .with("kept", HostArray::doubles([1.0]));

        let table = read_data_table(&data).unwrap();
        assert_eq!(table.len(), 1);
        assert!(!table.contains("empty"));
        assert!(!table.contains("nothing"));
    }

    #[test]
    fn test_unnamed_list_is_rejected() {
        let data = HostList::unnamed(vec![HostValue::Array(HostArray::doubles([1.0]))]);
        assert_eq!(
            read_data_table(&data),
            Err(InputError::NotNamed {
                names: 0,
                entries: 1
            })
        );
    }

    #[test]
    fn test_name_count_must_match_entry_count() {
        let data = HostList {
            names: Some(vec!["a".to_string()]),
            values: vec![
                HostValue::Array(HostArray::doubles([1.0])),
                HostValue::Array(HostArray::doubles([2.0])),
            ],
        };
        assert!(matches!(
            read_data_table(&data),
            Err(InputError::NotNamed {
                names: 1,
                entries: 2
            })
        ));
    }

    #[test]
    fn test_character_and_list_entries_are_rejected() {
        let data = HostList::new().with(
            "label",
            HostArray::new(HostVector::Character(vec![Some("a".to_string())])),
        );
        assert_eq!(
            read_data_table(&data),
            Err(InputError::NotNumeric {
                name: "label".to_string(),
                found: "character"
            })
        );

        let nested = HostList::new().with("inner", HostList::new());
        assert!(matches!(
            read_data_table(&nested),
            Err(InputError::NotNumeric { found: "list", .. })
        ));
    }

    #[test]
    fn test_inconsistent_dim_is_rejected() {
        let data = HostList::new().with("m", HostArray::doubles([1.0, 2.0, 3.0]).with_dim(vec![2, 2]));
        assert!(matches!(
            read_data_table(&data),
            Err(InputError::Array {
                source: ArrayError::ShapeMismatch { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_and_empty_names_are_rejected() {
        let data = HostList::new()
            .with("x", HostArray::doubles([1.0]))
            .with("x", HostArray::doubles([2.0]));
        assert!(matches!(
            read_data_table(&data),
            Err(InputError::Array {
                source: ArrayError::DuplicateName(_),
                ..
            })
        ));

        let data = HostList::new().with("", HostArray::doubles([1.0]));
        assert!(matches!(
            read_data_table(&data),
            Err(InputError::Array {
                source: ArrayError::EmptyName,
                ..
            })
        ));
    }
}
