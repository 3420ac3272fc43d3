// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Engine-side array representation.
//!
//! * [`TypedArray`] - column-major doubles with a shape, optional dimension
//!   labels, and [`ENGINE_NA`] marking missing elements
//! * [`DataTable`] - name-ordered collection of typed arrays, the unit of
//!   exchange for data, parameters, monitor dumps and state dumps

pub mod consts;
mod data_table;
mod typed_array;

pub use consts::{is_engine_na, ENGINE_NA};
pub use data_table::DataTable;
pub use typed_array::TypedArray;
