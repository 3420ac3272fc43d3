// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Array codec: host lists in, data tables out, and back.
//!
//! The host side is modelled by [`HostList`] and friends, where `None` is
//! the host's missing marker. The engine side is [`DataTable`] with
//! [`ENGINE_NA`] as its sentinel. Conversion translates between the two
//! markers at every crossing and leaves every other element untouched.
//!
//! [`DataTable`]: crate::array::DataTable
//! [`ENGINE_NA`]: crate::array::ENGINE_NA

mod host;
pub mod json;
mod reader;
mod writer;


pub use host::{HostArray, HostList, HostValue, HostVector};
pub use reader::read_data_table;
pub use writer::{write_chain_state, write_data_table, write_samplers, RNG_NAME_ENTRY};
