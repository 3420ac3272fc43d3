// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Data table to host list conversion.

use crate::array::{is_engine_na, DataTable, TypedArray};
use crate::codec::{HostArray, HostList, HostValue, HostVector};
use crate::traits::SamplerInfo;

/// Entry name carrying a chain's RNG name in a host state list.
pub const RNG_NAME_ENTRY: &str = ".RNG.name";

/// Convert a data table into a named host list.
///
/// Entries follow the table's name order. Arrays with more than one
/// dimension carry `dim` and, when labelled, `dim_names`; flat arrays become
/// plain vectors. [`ENGINE_NA`](crate::array::ENGINE_NA) becomes the host
/// missing marker. This direction cannot fail.
pub fn write_data_table(table: &DataTable) -> HostList {
    let mut list = HostList::new();
    for (name, array) in table {
        list.push(name.clone(), write_array(array));
    }
    list
}

fn write_array(array: &TypedArray) -> HostArray {
    let values = array
        .values()
        .iter()
        .map(|&v| if is_engine_na(v) { None } else { Some(v) })
        .collect();

    let mut host = HostArray::new(HostVector::Double(values));
    if array.ndim() > 1 {
        host.dim = Some(array.dims());
        host.dim_names = array.dim_names().map(<[String]>::to_vec);
    }
    host
}

/// Host form of one chain's state: the parameter entries followed by
/// [`RNG_NAME_ENTRY`].
pub fn write_chain_state(parameters: &DataTable, rng_name: &str) -> HostList {
    let mut list = write_data_table(parameters);
    list.push(RNG_NAME_ENTRY, HostValue::string(rng_name));
    list
}

/// Host form of the sampler report: one character vector of node names per
/// sampler, named by the sampler.
pub fn write_samplers(samplers: &[SamplerInfo]) -> HostList {
    let mut list = HostList::new();
    for sampler in samplers {
        let nodes = sampler.nodes.iter().cloned().map(Some).collect();
        list.push(
            sampler.name.clone(),
            HostArray::new(HostVector::Character(nodes)),
        );
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::ENGINE_NA;

    #[test]
    fn test_explicit_one_dimensional_dim_is_not_written_back() {
        let host = HostList::new().with(
            "x",
            HostArray::doubles([1.0, 2.0])
                .with_dim(vec![2])
                .with_dim_names(vec!["i".to_string()]),
        );

        let table = crate::codec::read_data_table(&host).unwrap();
        assert_eq!(table.get("x").unwrap().dims(), vec![2]);

        let back = write_data_table(&table);
        let x = back.get("x").unwrap().as_array().unwrap();
        assert_eq!(x.data, HostVector::Double(vec![Some(1.0), Some(2.0)]));
        assert_eq!(x.dim, None);
        assert_eq!(x.dim_names, None);
    }

    #[test]
    fn test_flat_array_has_no_dim() {
        let mut table = DataTable::new();
        table
            .insert("x", TypedArray::vector(vec![1.0, ENGINE_NA]))
            .unwrap();

        let list = write_data_table(&table);
        let x = list.get("x").unwrap().as_array().unwrap();
        assert_eq!(x.data, HostVector::Double(vec![Some(1.0), None]));
        assert_eq!(x.dim, None);
        assert_eq!(x.dim_names, None);
    }

    #[test]
    fn test_single_dimension_shape_is_written_as_plain_vector() {
        let mut table = DataTable::new();
        table
            .insert("x", TypedArray::new(vec![1.0, 2.0], vec![2]).unwrap())
            .unwrap();

        let list = write_data_table(&table);
        assert_eq!(list.get("x").unwrap().as_array().unwrap().dim, None);
    }

    #[test]
    fn test_matrix_carries_dim_and_dim_names() {
        let array = TypedArray::new(vec![0.5; 6], vec![3, 2])
            .unwrap()
            .with_dim_names(vec!["iteration".to_string(), "chain".to_string()])
            .unwrap();
        let mut table = DataTable::new();
        table.insert("mu", array).unwrap();

        let list = write_data_table(&table);
        let mu = list.get("mu").unwrap().as_array().unwrap();
        assert_eq!(mu.dim, Some(vec![3, 2]));
        assert_eq!(
            mu.dim_names,
            Some(vec!["iteration".to_string(), "chain".to_string()])
        );
    }

    #[test]
    fn test_output_follows_table_order() {
        let mut table = DataTable::new();
        table.insert("zeta", TypedArray::vector(vec![1.0])).unwrap();
        table.insert("beta", TypedArray::vector(vec![2.0])).unwrap();

        let list = write_data_table(&table);
        assert_eq!(list.names(), &["beta".to_string(), "zeta".to_string()]);
    }

    #[test]
    fn test_chain_state_appends_rng_name_last() {
        let mut table = DataTable::new();
        table.insert("tau", TypedArray::vector(vec![2.0])).unwrap();

        let list = write_chain_state(&table, "base::Mersenne-Twister");
        assert_eq!(list.names(), &["tau".to_string(), ".RNG.name".to_string()]);
        assert_eq!(
            list.get(RNG_NAME_ENTRY),
            Some(&HostValue::string("base::Mersenne-Twister"))
        );
    }

    #[test]
    fn test_samplers_become_named_character_vectors() {
        let samplers = vec![
            SamplerInfo {
                name: "base::RealSlicer".to_string(),
                nodes: vec!["mu".to_string()],
            },
            SamplerInfo {
                name: "glm::Generic".to_string(),
                nodes: vec!["b[1]".to_string(), "b[2]".to_string()],
            },
        ];

        let list = write_samplers(&samplers);
        assert_eq!(list.len(), 2);
        assert_eq!(
            list.get("glm::Generic").unwrap().as_array().unwrap().data,
            HostVector::Character(vec![Some("b[1]".to_string()), Some("b[2]".to_string())])
        );
    }
}
