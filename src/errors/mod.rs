// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod array;
mod config;
mod input;
mod session;

pub use array::ArrayError;
pub use config::{ConfigError, ValidationError};
pub use input::InputError;
pub use session::{SessionError, SessionResult};
