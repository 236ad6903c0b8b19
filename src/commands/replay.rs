use std::{cell::RefCell, rc::Rc};

use anyhow::Result;
use serde::Serialize;
use tracing::info;

use crate::cli::{Cli, ReplayArgs};
use crate::config::EngineConfig;
use crate::types::QuotationSite;
use crate::view::{Dispatcher, MapEvent, MapView, ScriptStep, ViewSnapshot};

use super::{load_config, read_json, write_json};

/// Everything a replay produced: the event log and the final view state.
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub events: Vec<MapEvent>,
    pub snapshot: ViewSnapshot,
}

/// Drive a fresh view through `steps` and collect what it emitted.
pub fn replay(records: Vec<QuotationSite>, steps: Vec<ScriptStep>, config: EngineConfig) -> ReplayReport {
    let events: Rc<RefCell<Vec<MapEvent>>> = Rc::default();

    let mut dispatcher = Dispatcher::new();
    {
        let events = events.clone();
        dispatcher.on_any(move |event| events.borrow_mut().push(event.clone()));
    }

    let mut view = MapView::new(records, config, dispatcher);
    for step in steps {
        step.apply(&mut view);
    }

    let snapshot = view.snapshot();
    let events = events.take();
    ReplayReport { events, snapshot }
}

pub fn run(cli: &Cli, args: &ReplayArgs) -> Result<()> {
    let config = load_config(cli)?;
    let records: Vec<QuotationSite> = read_json(&args.records)?;
    let steps: Vec<ScriptStep> = read_json(&args.script)?;
    info!(records = records.len(), steps = steps.len(), "[replay] starting");

    let report = replay(records, steps, config);
    info!(
        events = report.events.len(),
        regions = report.snapshot.regions.len(),
        markers = report.snapshot.markers.len(),
        "[replay] done"
    );

    write_json(&report, args.output.as_deref(), args.pretty)
}
