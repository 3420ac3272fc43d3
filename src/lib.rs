// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod array;         // typed arrays + data tables
pub mod backends;      // engine backends
pub mod codec;         // host list <-> data table
pub mod config;        // session + run configuration
pub mod engine;        // session protocol + update driver
pub mod errors;        // error handling
pub mod observability;
pub mod traits;        // engine, interrupt and progress seams
