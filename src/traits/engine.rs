// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::array::DataTable;
use crate::engine::MessageSink;

/// Which slice of a chain's state a dump returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpKind {
    /// Observed data supplied at compile time plus any generated data.
    Data,
    /// Current values of the unobserved stochastic parameters.
    Parameters,
}

/// One chain's dumped state.
#[derive(Debug, Clone, PartialEq)]
pub struct StateDump {
    pub table: DataTable,
    pub rng_name: String,
}

/// A sampler and the variables it updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplerInfo {
    pub name: String,
    pub nodes: Vec<String>,
}

/// The external inference engine as seen by a session.
///
/// Every staged operation reports a boolean status and writes its
/// diagnostics into the caller's [`MessageSink`]. An operation returning
/// `false` (or `None`) with an empty error buffer is an internal failure.
/// Engines are never called concurrently and never see a chain index outside
/// `1..=chain_count()`.
pub trait Engine {
    /// Parse model source text.
    fn check_model(&mut self, source: &str, sink: &mut MessageSink) -> bool;

    fn compile(
        &mut self,
        data: &DataTable,
        chains: u32,
        generate_data: bool,
        sink: &mut MessageSink,
    ) -> bool;

    fn set_parameters(&mut self, parameters: &DataTable, chain: u32, sink: &mut MessageSink)
        -> bool;

    fn set_rng_name(&mut self, name: &str, chain: u32, sink: &mut MessageSink) -> bool;

    fn initialize(&mut self, sink: &mut MessageSink) -> bool;

    /// Advance every chain by `iterations`.
    fn update(&mut self, iterations: u32, sink: &mut MessageSink) -> bool;

    fn is_adapting(&self) -> bool;

    /// Leave adaptive mode. Returns `false` when adaptation did not converge;
    /// this is never an error.
    fn adapt_off(&mut self, sink: &mut MessageSink) -> bool;

    fn set_monitor(
        &mut self,
        name: &str,
        thin: u32,
        monitor_type: &str,
        sink: &mut MessageSink,
    ) -> bool;

    fn clear_monitor(&mut self, name: &str, monitor_type: &str, sink: &mut MessageSink) -> bool;

    fn set_default_monitors(
        &mut self,
        monitor_type: &str,
        thin: u32,
        sink: &mut MessageSink,
    ) -> bool;

    fn clear_default_monitors(&mut self, monitor_type: &str, sink: &mut MessageSink) -> bool;

    fn dump_monitors(&mut self, monitor_type: &str, sink: &mut MessageSink) -> Option<DataTable>;

    fn dump_state(
        &mut self,
        kind: DumpKind,
        chain: u32,
        sink: &mut MessageSink,
    ) -> Option<StateDump>;

    /// Variable names of the compiled model, in model order.
    fn variable_names(&self) -> Vec<String>;

    fn dump_samplers(&mut self, sink: &mut MessageSink) -> Option<Vec<SamplerInfo>>;

    fn iteration(&self) -> u32;

    /// Zero until a model is compiled.
    fn chain_count(&self) -> u32;

    /// Release engine-side resources. Called exactly once.
    fn release(&mut self) {}
}
