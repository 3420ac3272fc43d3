// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Engine session: the staged control protocol around one engine instance.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use tokio_util::sync::CancellationToken;

use crate::array::DataTable;
use crate::codec::{read_data_table, write_chain_state, HostList};
use crate::config::{SessionConfig, UpdateOptions};
use crate::engine::progress::{SilentProgress, TextProgress};
use crate::engine::update::{UpdateDriver, UpdateSummary};
use crate::engine::{MessageSink, Notice, SessionState};
use crate::errors::{InputError, SessionError, SessionResult};
use crate::observability::messages::session::{
    EngineNotice, EngineWarning, OperationCompleted, OperationFailed, OperationStarted,
    SessionCreated, SessionReleased, StateChanged,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{DumpKind, Engine, InterruptCheck, ProgressReporter, SamplerInfo};

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// One chain's parameter values and RNG name.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainState {
    /// 1-based chain index.
    pub chain: u32,
    pub parameters: DataTable,
    pub rng_name: String,
}

impl ChainState {
    /// Host form: the parameters followed by a `.RNG.name` entry.
    pub fn to_host(&self) -> HostList {
        write_chain_state(&self.parameters, &self.rng_name)
    }
}

enum Interrupt {
    Token(CancellationToken),
    Custom(Box<dyn InterruptCheck>),
}

impl Interrupt {
    fn check(&self) -> &dyn InterruptCheck {
        match self {
            Interrupt::Token(token) => token,
            Interrupt::Custom(check) => &**check,
        }
    }

    fn reset(&mut self) {
        match self {
            Interrupt::Token(token) => *token = CancellationToken::new(),
            Interrupt::Custom(check) => check.reset(),
        }
    }
}

/// Exclusive handle on one external engine instance.
///
/// Operations follow the protocol order
/// `check_model → compile → [set_parameters] → initialize → update/monitor`.
/// Each one either succeeds, possibly leaving [`Notice`]s for
/// [`Session::take_notices`], or fails with a [`SessionError`] that aborts
/// only that operation. The engine is released exactly once, by
/// [`Session::release`] or on drop.
///
/// # Example
/// ```no_run
/// # fn engine() -> Box<dyn gibbs_bridge::traits::Engine> { unimplemented!() }
/// use gibbs_bridge::array::{DataTable, TypedArray};
/// use gibbs_bridge::engine::Session;
///
/// let mut session = Session::new(engine());
/// session.check_model("line.bug")?;
///
/// let mut data = DataTable::new();
/// data.insert("x", TypedArray::vector(vec![1.0, 2.0, 3.0]))?;
/// session.compile(&data, 1, false)?;
/// session.initialize()?;
/// session.update(1000)?;
///
/// for notice in session.take_notices() {
///     println!("{}", notice);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Session {
    id: u64,
    engine: Option<Box<dyn Engine>>,
    state: SessionState,
    sink: MessageSink,
    notices: Vec<Notice>,
    update_options: UpdateOptions,
    progress: Box<dyn ProgressReporter>,
    interrupt: Interrupt,
}

impl Session {
    /// Wrap an engine with default settings: text progress on stdout and a
    /// cancellation token as the interrupt check.
    pub fn new(engine: Box<dyn Engine>) -> Self {
        Self::with_config(engine, &SessionConfig::default())
    }

    pub fn with_config(engine: Box<dyn Engine>, config: &SessionConfig) -> Self {
        let progress: Box<dyn ProgressReporter> = if config.update.progress {
            Box::new(TextProgress::stdout())
        } else {
            Box::new(SilentProgress)
        };

        let id = NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed);
        SessionCreated { session_id: id }.log();

        Self {
            id,
            engine: Some(engine),
            state: SessionState::Created,
            sink: MessageSink::new(),
            notices: Vec::new(),
            update_options: config.update.clone(),
            progress,
            interrupt: Interrupt::Token(CancellationToken::new()),
        }
    }

    /// Replace the progress reporter.
    pub fn with_progress(mut self, progress: impl ProgressReporter + 'static) -> Self {
        self.progress = Box::new(progress);
        self
    }

    /// Replace the cancellation token with a custom interrupt check.
    pub fn with_interrupt(mut self, interrupt: impl InterruptCheck + 'static) -> Self {
        self.interrupt = Interrupt::Custom(Box::new(interrupt));
        self
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_released(&self) -> bool {
        self.state == SessionState::Released
    }

    /// Token that cancels the running update at its next chunk boundary.
    ///
    /// A cancelled token is replaced once the update stops, so fetch a fresh
    /// one before the next update. `None` when a custom interrupt check is
    /// installed.
    pub fn cancellation_token(&self) -> Option<CancellationToken> {
        match &self.interrupt {
            Interrupt::Token(token) => Some(token.clone()),
            Interrupt::Custom(_) => None,
        }
    }

    /// Notices collected since the last call, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Read and parse a model file.
    pub fn check_model(&mut self, path: impl AsRef<Path>) -> SessionResult<()> {
        let path = path.as_ref();
        self.run("check_model", |session| {
            session.require_live("check_model")?;
            let source = fs::read_to_string(path).map_err(|_| {
                SessionError::Model(format!("Failed to open file {}", path.display()))
            })?;
            session.load_model(&source)
        })
    }

    /// Parse model source text directly.
    pub fn check_model_source(&mut self, source: &str) -> SessionResult<()> {
        self.run("check_model", |session| {
            session.require_live("check_model")?;
            session.load_model(source)
        })
    }

    fn load_model(&mut self, source: &str) -> SessionResult<()> {
        let operation = "check_model";
        let ok = self.call(operation, |engine, sink| engine.check_model(source, sink))?;
        // the engine discards any previous model before parsing
        let outcome = self.conclude(operation, ok, SessionError::Model);
        if outcome.is_ok() {
            self.transition(SessionState::ModelLoaded);
        } else {
            self.transition(SessionState::Created);
        }
        outcome
    }

    /// Compile the loaded model against `data` with `chains` chains.
    pub fn compile(
        &mut self,
        data: &DataTable,
        chains: u32,
        generate_data: bool,
    ) -> SessionResult<()> {
        let operation = "compile";
        self.run(operation, |session| {
            session.require_live(operation)?;
            if chains == 0 {
                return Err(InputError::ChainCount(chains).into());
            }
            session.require(operation, SessionState::ModelLoaded)?;
            if session.state > SessionState::ModelLoaded {
                return Err(SessionError::InvalidState {
                    operation,
                    required: SessionState::ModelLoaded,
                    actual: session.state,
                });
            }

            let ok = session.call(operation, |engine, sink| {
                engine.compile(data, chains, generate_data, sink)
            })?;
            session.conclude(operation, ok, SessionError::Compile)?;
            session.transition(SessionState::Compiled);
            Ok(())
        })
    }

    /// [`Session::compile`] with host data, validated before the engine
    /// sees it.
    pub fn compile_host(
        &mut self,
        data: &HostList,
        chains: u32,
        generate_data: bool,
    ) -> SessionResult<()> {
        let table = read_data_table(data)?;
        self.compile(&table, chains, generate_data)
    }

    /// Set initial values for one chain.
    pub fn set_parameters(&mut self, parameters: &DataTable, chain: u32) -> SessionResult<()> {
        let operation = "set_parameters";
        self.run(operation, |session| {
            session.require_chain(operation, chain)?;
            let ok = session.call(operation, |engine, sink| {
                engine.set_parameters(parameters, chain, sink)
            })?;
            session.conclude(operation, ok, SessionError::Parameter)?;
            if session.state == SessionState::Compiled {
                session.transition(SessionState::ParametersSet);
            }
            Ok(())
        })
    }

    pub fn set_parameters_host(&mut self, parameters: &HostList, chain: u32) -> SessionResult<()> {
        let table = read_data_table(parameters)?;
        self.set_parameters(&table, chain)
    }

    /// Choose the RNG for one chain.
    pub fn set_rng_name(&mut self, name: &str, chain: u32) -> SessionResult<()> {
        let operation = "set_rng_name";
        self.run(operation, |session| {
            if name.is_empty() {
                return Err(InputError::Empty("RNG name").into());
            }
            session.require_chain(operation, chain)?;
            let ok = session.call(operation, |engine, sink| engine.set_rng_name(name, chain, sink))?;
            session.conclude(operation, ok, SessionError::Parameter)
        })
    }

    pub fn initialize(&mut self) -> SessionResult<()> {
        let operation = "initialize";
        self.run(operation, |session| {
            session.require(operation, SessionState::Compiled)?;
            let ok = session.call(operation, |engine, sink| engine.initialize(sink))?;
            session.conclude(operation, ok, SessionError::Init)?;
            session.transition(SessionState::Initialized);
            Ok(())
        })
    }

    /// Advance every chain by `iterations`, in chunks.
    ///
    /// See [`UpdateDriver`] for chunking, adaptation and cancellation. An
    /// adaptation that did not converge leaves a warning notice.
    pub fn update(&mut self, iterations: u32) -> SessionResult<UpdateSummary> {
        let operation = "update";
        self.run(operation, |session| {
            session.require(operation, SessionState::Initialized)?;

            // pending engine chatter goes out before the progress header
            if let Some(text) = session.sink.take_info() {
                session.notice(operation, text);
            }

            let engine = session
                .engine
                .as_mut()
                .ok_or(SessionError::Released { operation })?;
            let result = UpdateDriver::new(
                &mut **engine,
                &mut session.sink,
                &mut *session.progress,
                session.interrupt.check(),
            )
            .with_width(session.update_options.width)
            .with_refresh(session.update_options.refresh)
            .run(iterations);

            match result {
                Ok(summary) => {
                    if !summary.adaptation_complete {
                        session
                            .notices
                            .push(Notice::warning(operation, "Adaptation incomplete"));
                    }
                    session.conclude(operation, true, |message| {
                        SessionError::EngineFailure { operation, message }
                    })?;
                    Ok(summary)
                }
                Err(error) => {
                    if matches!(error, SessionError::Cancelled { .. }) {
                        session.interrupt.reset();
                    }
                    session.surface(operation);
                    Err(error)
                }
            }
        })
    }

    /// True while any chain is still adapting.
    pub fn is_adapting(&self) -> SessionResult<bool> {
        Ok(self.engine_ref("is_adapting")?.is_adapting())
    }

    /// Record every `thin`-th value of `name`.
    pub fn set_monitor(&mut self, name: &str, thin: u32, monitor_type: &str) -> SessionResult<()> {
        let operation = "set_monitor";
        self.run(operation, |session| {
            validate_monitor_args(name, thin)?;
            session.require(operation, SessionState::Initialized)?;
            let ok = session.call(operation, |engine, sink| {
                engine.set_monitor(name, thin, monitor_type, sink)
            })?;
            session.conclude(operation, ok, |message| SessionError::Monitor {
                target: name.to_string(),
                message,
            })
        })
    }

    pub fn clear_monitor(&mut self, name: &str, monitor_type: &str) -> SessionResult<()> {
        let operation = "clear_monitor";
        self.run(operation, |session| {
            if name.is_empty() {
                return Err(InputError::Empty("monitor name").into());
            }
            session.require(operation, SessionState::Initialized)?;
            let ok = session.call(operation, |engine, sink| {
                engine.clear_monitor(name, monitor_type, sink)
            })?;
            session.conclude(operation, ok, |message| SessionError::Monitor {
                target: name.to_string(),
                message,
            })
        })
    }

    /// Monitor the engine's default variable set.
    pub fn set_default_monitors(&mut self, monitor_type: &str, thin: u32) -> SessionResult<()> {
        let operation = "set_default_monitors";
        self.run(operation, |session| {
            if thin == 0 {
                return Err(InputError::Thinning.into());
            }
            session.require(operation, SessionState::Initialized)?;
            let ok = session.call(operation, |engine, sink| {
                engine.set_default_monitors(monitor_type, thin, sink)
            })?;
            session.conclude(operation, ok, |message| SessionError::Monitor {
                target: format!("default {} monitors", monitor_type),
                message,
            })
        })
    }

    pub fn clear_default_monitors(&mut self, monitor_type: &str) -> SessionResult<()> {
        let operation = "clear_default_monitors";
        self.run(operation, |session| {
            session.require(operation, SessionState::Initialized)?;
            let ok = session.call(operation, |engine, sink| {
                engine.clear_default_monitors(monitor_type, sink)
            })?;
            session.conclude(operation, ok, |message| SessionError::Monitor {
                target: format!("default {} monitors", monitor_type),
                message,
            })
        })
    }

    /// Values recorded by every monitor of `monitor_type`. Empty when none
    /// is set.
    pub fn monitored_values(&mut self, monitor_type: &str) -> SessionResult<DataTable> {
        let operation = "dump_monitors";
        self.run(operation, |session| {
            session.require(operation, SessionState::Initialized)?;
            let dump = session.call(operation, |engine, sink| {
                engine.dump_monitors(monitor_type, sink)
            })?;
            session.conclude_dump(operation, dump)
        })
    }

    /// Observed and generated data, as held by chain 1.
    pub fn data(&mut self) -> SessionResult<DataTable> {
        let operation = "dump_data";
        self.run(operation, |session| {
            session.require(operation, SessionState::Compiled)?;
            let dump = session.call(operation, |engine, sink| {
                engine.dump_state(DumpKind::Data, 1, sink)
            })?;
            session.conclude_dump(operation, dump).map(|dump| dump.table)
        })
    }

    /// Parameter values and RNG name of every chain. Empty before compile.
    pub fn state_dump(&mut self) -> SessionResult<Vec<ChainState>> {
        let operation = "dump_state";
        self.run(operation, |session| {
            let chains = session.engine_ref(operation)?.chain_count();
            let mut states = Vec::with_capacity(chains as usize);
            for chain in 1..=chains {
                let dump = session.call(operation, |engine, sink| {
                    engine.dump_state(DumpKind::Parameters, chain, sink)
                })?;
                let dump = session.conclude_dump(operation, dump)?;
                states.push(ChainState {
                    chain,
                    parameters: dump.table,
                    rng_name: dump.rng_name,
                });
            }
            Ok(states)
        })
    }

    /// Variable names of the compiled model, in model order.
    pub fn variable_names(&self) -> SessionResult<Vec<String>> {
        Ok(self.engine_ref("variable_names")?.variable_names())
    }

    pub fn samplers(&mut self) -> SessionResult<Vec<SamplerInfo>> {
        let operation = "dump_samplers";
        self.run(operation, |session| {
            session.require(operation, SessionState::Initialized)?;
            let dump = session.call(operation, |engine, sink| engine.dump_samplers(sink))?;
            session.conclude_dump(operation, dump)
        })
    }

    pub fn iteration(&self) -> SessionResult<u32> {
        Ok(self.engine_ref("iteration")?.iteration())
    }

    pub fn chain_count(&self) -> SessionResult<u32> {
        Ok(self.engine_ref("chain_count")?.chain_count())
    }

    /// Release the engine. Later calls are no-ops.
    pub fn release(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            let iterations = engine.iteration();
            engine.release();
            self.transition(SessionState::Released);
            SessionReleased {
                session_id: self.id,
                iterations,
            }
            .log();
        }
    }

    fn run<T>(
        &mut self,
        operation: &'static str,
        body: impl FnOnce(&mut Self) -> SessionResult<T>,
    ) -> SessionResult<T> {
        let start_msg = OperationStarted {
            session_id: self.id,
            operation,
        };
        let span = start_msg.span(operation);
        let _guard = span.enter();
        start_msg.log();

        let started = Instant::now();
        let result = body(self);

        match &result {
            Ok(_) => OperationCompleted {
                session_id: self.id,
                operation,
                duration: started.elapsed(),
            }
            .log(),
            Err(error) => OperationFailed {
                session_id: self.id,
                operation,
                error,
            }
            .log(),
        }
        result
    }

    fn call<T>(
        &mut self,
        operation: &'static str,
        f: impl FnOnce(&mut Box<dyn Engine>, &mut MessageSink) -> T,
    ) -> SessionResult<T> {
        let engine = self
            .engine
            .as_mut()
            .ok_or(SessionError::Released { operation })?;
        Ok(f(engine, &mut self.sink))
    }

    fn engine_ref(&self, operation: &'static str) -> SessionResult<&dyn Engine> {
        self.engine
            .as_deref()
            .ok_or(SessionError::Released { operation })
    }

    fn require_live(&self, operation: &'static str) -> SessionResult<()> {
        if self.is_released() {
            Err(SessionError::Released { operation })
        } else {
            Ok(())
        }
    }

    fn require(&self, operation: &'static str, required: SessionState) -> SessionResult<()> {
        self.require_live(operation)?;
        if self.state.satisfies(required) {
            Ok(())
        } else {
            Err(SessionError::InvalidState {
                operation,
                required,
                actual: self.state,
            })
        }
    }

    fn require_chain(&self, operation: &'static str, chain: u32) -> SessionResult<()> {
        self.require(operation, SessionState::Compiled)?;
        let chains = self.engine_ref(operation)?.chain_count();
        if chain == 0 || chain > chains {
            return Err(InputError::ChainIndex { chain, chains }.into());
        }
        Ok(())
    }

    fn transition(&mut self, to: SessionState) {
        if self.state != to {
            StateChanged {
                session_id: self.id,
                from: self.state,
                to,
            }
            .log();
            self.state = to;
        }
    }

    fn notice(&mut self, operation: &'static str, text: String) {
        EngineNotice {
            session_id: self.id,
            operation,
            text: &text,
        }
        .log();
        self.notices.push(Notice::info(operation, text));
    }

    fn warning(&mut self, operation: &'static str, text: String) {
        EngineWarning {
            session_id: self.id,
            operation,
            text: &text,
        }
        .log();
        self.notices.push(Notice::warning(operation, text));
    }

    /// Turn whatever is buffered into notices.
    fn surface(&mut self, operation: &'static str) {
        let drained = self.sink.drain();
        if let Some(text) = drained.info {
            self.notice(operation, text);
        }
        if let Some(text) = drained.error {
            self.warning(operation, text);
        }
    }

    /// Drain the sink after an engine call reporting `ok`.
    ///
    /// Error text fails the operation through `on_failure` when `ok` is
    /// false and becomes a warning otherwise. A failure with no error text
    /// is [`SessionError::Internal`].
    fn conclude(
        &mut self,
        operation: &'static str,
        ok: bool,
        on_failure: impl FnOnce(String) -> SessionError,
    ) -> SessionResult<()> {
        if ok {
            self.surface(operation);
            return Ok(());
        }

        if let Some(text) = self.sink.take_info() {
            self.notice(operation, text);
        }
        match self.sink.take_error() {
            Some(message) => Err(on_failure(message)),
            None => Err(SessionError::Internal { operation }),
        }
    }

    fn conclude_dump<T>(&mut self, operation: &'static str, dump: Option<T>) -> SessionResult<T> {
        let ok = dump.is_some();
        self.conclude(operation, ok, |message| SessionError::EngineFailure {
            operation,
            message,
        })?;
        dump.ok_or(SessionError::Internal { operation })
    }
}

fn validate_monitor_args(name: &str, thin: u32) -> Result<(), InputError> {
    if name.is_empty() {
        return Err(InputError::Empty("monitor name"));
    }
    if thin == 0 {
        return Err(InputError::Thinning);
    }
    Ok(())
}

impl Drop for Session {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("pending_notices", &self.notices.len())
            .finish()
    }
}
