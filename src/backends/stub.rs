// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tokio_util::sync::CancellationToken;

use crate::array::{DataTable, TypedArray};
use crate::engine::MessageSink;
use crate::traits::{DumpKind, Engine, SamplerInfo, StateDump};

/// An engine call as recorded by [`ScriptedEngine`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CheckModel,
    Compile { chains: u32, generate_data: bool },
    SetParameters { chain: u32 },
    SetRngName { chain: u32, name: String },
    Initialize,
    Update(u32),
    AdaptOff,
    SetMonitor { name: String, thin: u32, monitor_type: String },
    ClearMonitor { name: String, monitor_type: String },
    SetDefaultMonitors { monitor_type: String, thin: u32 },
    ClearDefaultMonitors { monitor_type: String },
    DumpMonitors(String),
    DumpState { kind: DumpKind, chain: u32 },
    DumpSamplers,
    Release,
}

/// Shared view of the calls an engine received, readable after the engine
/// has been moved into a session.
pub type CallLog = Rc<RefCell<Vec<Call>>>;

struct Monitor {
    name: String,
    thin: u32,
    monitor_type: String,
    samples: Vec<f64>,
}

/// In-memory engine with scripted outcomes for protocol tests.
///
/// Failures, informational text and warnings are attached per operation
/// name (`"check_model"`, `"compile"`, `"update"`, ...). Monitored values
/// are the iteration numbers at which they were recorded.
pub struct ScriptedEngine {
    log: CallLog,
    variables: Vec<String>,
    adaptive: bool,
    adapting: bool,
    converges: bool,
    chains: u32,
    iteration: u32,
    updates: usize,
    data: DataTable,
    parameters: Vec<DataTable>,
    rng_names: Vec<String>,
    monitors: Vec<Monitor>,
    failures: HashMap<&'static str, Option<String>>,
    failing_update: Option<(usize, Option<String>)>,
    info: HashMap<&'static str, String>,
    warnings: HashMap<&'static str, String>,
    cancel_after: Option<(usize, CancellationToken)>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self {
            log: CallLog::default(),
            variables: vec!["x".to_string(), "mu".to_string(), "tau".to_string()],
            adaptive: false,
            adapting: false,
            converges: true,
            chains: 0,
            iteration: 0,
            updates: 0,
            data: DataTable::new(),
            parameters: Vec::new(),
            rng_names: Vec::new(),
            monitors: Vec::new(),
            failures: HashMap::new(),
            failing_update: None,
            info: HashMap::new(),
            warnings: HashMap::new(),
            cancel_after: None,
        }
    }

    /// Handle on the call log.
    pub fn log(&self) -> CallLog {
        Rc::clone(&self.log)
    }

    pub fn with_variables(mut self, variables: &[&str]) -> Self {
        self.variables = variables.iter().map(|v| v.to_string()).collect();
        self
    }

    /// Chains start adapting at initialization.
    pub fn adaptive(mut self) -> Self {
        self.adaptive = true;
        self
    }

    /// Adaptation ends unconverged.
    pub fn unconverged(mut self) -> Self {
        self.converges = false;
        self
    }

    /// Make `operation` report failure, with `text` in the error buffer.
    pub fn fail(mut self, operation: &'static str, text: Option<&str>) -> Self {
        self.failures.insert(operation, text.map(str::to_string));
        self
    }

    /// Make the `nth` update call (1-based) report failure.
    pub fn fail_update(mut self, nth: usize, text: Option<&str>) -> Self {
        self.failing_update = Some((nth, text.map(str::to_string)));
        self
    }

    pub fn info(mut self, operation: &'static str, text: &str) -> Self {
        self.info.insert(operation, text.to_string());
        self
    }

    /// Error text written by an operation that still succeeds.
    pub fn warn(mut self, operation: &'static str, text: &str) -> Self {
        self.warnings.insert(operation, text.to_string());
        self
    }

    /// Cancel `token` during the `nth` update call.
    pub fn cancel_after(mut self, nth: usize, token: CancellationToken) -> Self {
        self.cancel_after = Some((nth, token));
        self
    }

    fn record(&self, call: Call) {
        self.log.borrow_mut().push(call);
    }

    /// Apply the script for `operation`; false when it should fail.
    fn script(&self, operation: &'static str, sink: &mut MessageSink) -> bool {
        if let Some(text) = self.info.get(operation) {
            sink.push_info(text);
        }
        if let Some(text) = self.warnings.get(operation) {
            sink.push_error(text);
        }
        match self.failures.get(operation) {
            Some(text) => {
                if let Some(text) = text {
                    sink.push_error(text);
                }
                false
            }
            None => true,
        }
    }

    fn is_variable(&self, name: &str) -> bool {
        self.variables.iter().any(|v| v == name)
    }
}

impl Default for ScriptedEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for ScriptedEngine {
    fn check_model(&mut self, _source: &str, sink: &mut MessageSink) -> bool {
        self.record(Call::CheckModel);
        self.chains = 0;
        self.script("check_model", sink)
    }

    fn compile(
        &mut self,
        data: &DataTable,
        chains: u32,
        generate_data: bool,
        sink: &mut MessageSink,
    ) -> bool {
        self.record(Call::Compile {
            chains,
            generate_data,
        });
        if !self.script("compile", sink) {
            return false;
        }
        for name in data.names() {
            if !self.is_variable(name) {
                sink.push_error(&format!("Unused variable \"{}\" in data\n", name));
            }
        }
        self.chains = chains;
        self.data = data.clone();
        self.parameters = vec![DataTable::new(); chains as usize];
        self.rng_names = (1..=chains)
            .map(|chain| format!("base::Mersenne-Twister.{}", chain))
            .collect();
        true
    }

    fn set_parameters(
        &mut self,
        parameters: &DataTable,
        chain: u32,
        sink: &mut MessageSink,
    ) -> bool {
        self.record(Call::SetParameters { chain });
        if !self.script("set_parameters", sink) {
            return false;
        }
        if let Some(name) = parameters.names().find(|name| !self.is_variable(name)) {
            sink.push_error(&format!("Unknown parameter {}\n", name));
            return false;
        }
        self.parameters[chain as usize - 1] = parameters.clone();
        true
    }

    fn set_rng_name(&mut self, name: &str, chain: u32, sink: &mut MessageSink) -> bool {
        self.record(Call::SetRngName {
            chain,
            name: name.to_string(),
        });
        if !self.script("set_rng_name", sink) {
            return false;
        }
        self.rng_names[chain as usize - 1] = name.to_string();
        true
    }

    fn initialize(&mut self, sink: &mut MessageSink) -> bool {
        self.record(Call::Initialize);
        if !self.script("initialize", sink) {
            return false;
        }
        self.adapting = self.adaptive;
        true
    }

    fn update(&mut self, iterations: u32, sink: &mut MessageSink) -> bool {
        self.record(Call::Update(iterations));
        self.updates += 1;

        if let Some((nth, text)) = &self.failing_update {
            if *nth == self.updates {
                if let Some(text) = text {
                    sink.push_error(text);
                }
                return false;
            }
        }
        if !self.script("update", sink) {
            return false;
        }

        for _ in 0..iterations {
            self.iteration += 1;
            for monitor in &mut self.monitors {
                if self.iteration % monitor.thin == 0 {
                    monitor.samples.push(f64::from(self.iteration));
                }
            }
        }

        if let Some((nth, token)) = &self.cancel_after {
            if *nth == self.updates {
                token.cancel();
            }
        }
        true
    }

    fn is_adapting(&self) -> bool {
        self.adapting
    }

    fn adapt_off(&mut self, _sink: &mut MessageSink) -> bool {
        self.record(Call::AdaptOff);
        self.adapting = false;
        self.converges
    }

    fn set_monitor(
        &mut self,
        name: &str,
        thin: u32,
        monitor_type: &str,
        sink: &mut MessageSink,
    ) -> bool {
        self.record(Call::SetMonitor {
            name: name.to_string(),
            thin,
            monitor_type: monitor_type.to_string(),
        });
        if !self.script("set_monitor", sink) {
            return false;
        }
        if !self.is_variable(name) {
            sink.push_error(&format!("Failed to set {} monitor for node {}\n", monitor_type, name));
            return false;
        }
        self.monitors.push(Monitor {
            name: name.to_string(),
            thin,
            monitor_type: monitor_type.to_string(),
            samples: Vec::new(),
        });
        true
    }

    fn clear_monitor(&mut self, name: &str, monitor_type: &str, sink: &mut MessageSink) -> bool {
        self.record(Call::ClearMonitor {
            name: name.to_string(),
            monitor_type: monitor_type.to_string(),
        });
        let before = self.monitors.len();
        self.monitors
            .retain(|m| !(m.name == name && m.monitor_type == monitor_type));
        if self.monitors.len() == before {
            sink.push_error(&format!("No {} monitor for node {}\n", monitor_type, name));
            return false;
        }
        true
    }

    fn set_default_monitors(
        &mut self,
        monitor_type: &str,
        thin: u32,
        sink: &mut MessageSink,
    ) -> bool {
        self.record(Call::SetDefaultMonitors {
            monitor_type: monitor_type.to_string(),
            thin,
        });
        self.script("set_default_monitors", sink)
    }

    fn clear_default_monitors(&mut self, monitor_type: &str, sink: &mut MessageSink) -> bool {
        self.record(Call::ClearDefaultMonitors {
            monitor_type: monitor_type.to_string(),
        });
        self.script("clear_default_monitors", sink)
    }

    fn dump_monitors(&mut self, monitor_type: &str, sink: &mut MessageSink) -> Option<DataTable> {
        self.record(Call::DumpMonitors(monitor_type.to_string()));
        if !self.script("dump_monitors", sink) {
            return None;
        }
        let mut table = DataTable::new();
        for monitor in self.monitors.iter().filter(|m| m.monitor_type == monitor_type) {
            let samples = monitor.samples.len();
            if samples == 0 {
                continue;
            }
            let values: Vec<f64> = (0..self.chains)
                .flat_map(|_| monitor.samples.iter().copied())
                .collect();
            let array = TypedArray::new(values, vec![samples, self.chains as usize])
                .and_then(|a| a.with_dim_names(vec!["iteration".into(), "chain".into()]))
                .ok()?;
            table.insert(monitor.name.clone(), array).ok()?;
        }
        Some(table)
    }

    fn dump_state(
        &mut self,
        kind: DumpKind,
        chain: u32,
        sink: &mut MessageSink,
    ) -> Option<StateDump> {
        self.record(Call::DumpState { kind, chain });
        if !self.script("dump_state", sink) {
            return None;
        }
        let index = chain as usize - 1;
        let table = match kind {
            DumpKind::Data => self.data.clone(),
            DumpKind::Parameters => self.parameters[index].clone(),
        };
        Some(StateDump {
            table,
            rng_name: self.rng_names[index].clone(),
        })
    }

    fn variable_names(&self) -> Vec<String> {
        self.variables.clone()
    }

    fn dump_samplers(&mut self, sink: &mut MessageSink) -> Option<Vec<SamplerInfo>> {
        self.record(Call::DumpSamplers);
        if !self.script("dump_samplers", sink) {
            return None;
        }
        Some(vec![SamplerInfo {
            name: "RealSlicer".to_string(),
            nodes: self.variables.clone(),
        }])
    }

    fn iteration(&self) -> u32 {
        self.iteration
    }

    fn chain_count(&self) -> u32 {
        self.chains
    }

    fn release(&mut self) {
        self.record(Call::Release);
    }
}
