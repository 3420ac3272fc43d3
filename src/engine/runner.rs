// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Declarative model runs driven by a [`RunConfig`].

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::array::DataTable;
use crate::codec::json::host_list_from_str;
use crate::codec::read_data_table;
use crate::config::RunConfig;
use crate::engine::{ChainState, Notice, Session};
use crate::errors::SessionResult;
use crate::traits::Engine;

/// Everything a finished run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    /// Monitored values keyed by monitor type.
    pub monitors: BTreeMap<String, DataTable>,
    /// Final state of every chain.
    pub states: Vec<ChainState>,
    /// Notices from every stage, oldest first.
    pub notices: Vec<Notice>,
}

/// Run the full protocol described by `config` against `engine`.
///
/// Stages run in order: check model, compile, per-chain initial values and
/// RNG names, initialize, adaptation (only while the chains adapt), burn-in,
/// monitors, sampling, then one dump per monitor type. The engine is
/// released when the run ends, whether or not it succeeded.
pub fn run_model(engine: Box<dyn Engine>, config: &RunConfig) -> SessionResult<RunOutput> {
    let mut session = Session::with_config(engine, &config.session);
    let result = drive(&mut session, config);
    session.release();
    result
}

/// [`run_model`] on a caller-built session, which is left open afterwards.
pub fn drive(session: &mut Session, config: &RunConfig) -> SessionResult<RunOutput> {
    session.check_model(&config.model)?;

    let data = match &config.data {
        Some(path) => read_table(path)?,
        None => DataTable::new(),
    };
    session.compile(&data, config.chains, config.generate_data)?;

    for (chain, path) in (1..).zip(&config.inits) {
        let inits = read_table(path)?;
        session.set_parameters(&inits, chain)?;
    }
    for (chain, name) in (1..).zip(&config.rng_names) {
        session.set_rng_name(name, chain)?;
    }

    session.initialize()?;

    if config.adapt > 0 && session.is_adapting()? {
        session.update(config.adapt)?;
    }
    if config.burn_in > 0 {
        session.update(config.burn_in)?;
    }

    let defaults = &config.session.monitors;
    for monitor in &config.monitors {
        session.set_monitor(
            &monitor.variable,
            monitor.thin_or(defaults),
            monitor.type_or(defaults),
        )?;
    }

    session.update(config.iterations)?;

    let mut monitors = BTreeMap::new();
    for monitor_type in config.monitor_types() {
        let values = session.monitored_values(&monitor_type)?;
        monitors.insert(monitor_type, values);
    }

    let states = session.state_dump()?;

    Ok(RunOutput {
        monitors,
        states,
        notices: session.take_notices(),
    })
}

fn read_table(path: &Path) -> SessionResult<DataTable> {
    let text = fs::read_to_string(path)?;
    Ok(read_data_table(&host_list_from_str(&text)?)?)
}
