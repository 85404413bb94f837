use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use engine_logging::{engine_debug, engine_info};
use formfill_core::{update, AppState, Msg, RoundTripView};
use formfill_engine::{
    fill_page, scan_page, ControlState, FillMapping, FillOutcome, HeuristicSettings, Page,
    ScanReport,
};
use serde::Serialize;

use crate::cli::{Cli, Commands};
use crate::effects::EffectRunner;
use crate::matcher::{HttpMatcher, MatchService};
use crate::pages::{load_page, PageSource};
use crate::settings::{load_settings, AppSettings};

/// What `fill` prints: the outcome plus the live state of every control the
/// fill touched, in every frame.
#[derive(Debug, Serialize)]
pub struct FillReport {
    pub outcome: FillOutcome,
    pub controls: Vec<ControlState>,
}

pub async fn run(cli: Cli) -> Result<()> {
    let mut settings = load_settings(cli.config.as_deref())?;
    let output = match cli.command {
        Commands::Scan { page } => {
            let page = load_page(&page.into())?;
            serde_json::to_string_pretty(&run_scan(&page, &settings.heuristics)?)?
        }
        Commands::Fill { page, mapping } => {
            let mapping = read_mapping(&mapping)?;
            let mut page = load_page(&page.into())?;
            serde_json::to_string_pretty(&run_fill(&mut page, &mapping, &settings.heuristics))?
        }
        Commands::Autofill {
            page,
            matcher,
            user_id,
            timeout_secs,
        } => {
            settings.matcher.override_with(matcher, user_id, timeout_secs);
            let source: PageSource = page.into();
            serde_json::to_string_pretty(&run_autofill(&source, &settings).await?)?
        }
    };
    println!("{output}");
    Ok(())
}

pub fn run_scan(page: &Page, heuristics: &HeuristicSettings) -> Result<ScanReport> {
    Ok(scan_page(page, heuristics)?)
}

pub fn run_fill(page: &mut Page, mapping: &FillMapping, heuristics: &HeuristicSettings) -> FillReport {
    let outcome = fill_page(page, mapping, heuristics);
    FillReport {
        outcome,
        controls: touched_controls(page),
    }
}

pub async fn run_autofill(source: &PageSource, settings: &AppSettings) -> Result<RoundTripView> {
    let mut page = load_page(source)?;
    let matcher = HttpMatcher::new(&settings.matcher).context("building matcher client")?;
    engine_info!("autofill against {}", matcher.url());
    let deadline = Duration::from_secs(settings.matcher.timeout_secs);
    let mut runner = EffectRunner::new(&mut page, &settings.heuristics, &matcher, deadline);
    Ok(drive_round_trip(&mut runner).await.view())
}

/// Runs one scan → match → fill round trip to completion, feeding every
/// effect's result back into the state machine.
pub async fn drive_round_trip(runner: &mut EffectRunner<'_>) -> AppState {
    let mut state = AppState::new();
    let mut inbox = VecDeque::from([Msg::ScanRequested]);
    while let Some(msg) = inbox.pop_front() {
        let (next, effects) = update(state, msg);
        state = next;
        if state.consume_dirty() {
            engine_debug!("round trip is now {:?}", state.phase());
        }
        for effect in effects {
            inbox.push_back(runner.run(effect).await);
        }
    }
    state
}

/// Same round trip with a caller-supplied matcher, for hosts that bring
/// their own transport.
pub async fn autofill_with(
    page: &mut Page,
    heuristics: &HeuristicSettings,
    matcher: &dyn MatchService,
    deadline: Duration,
) -> AppState {
    let mut runner = EffectRunner::new(page, heuristics, matcher, deadline);
    drive_round_trip(&mut runner).await
}

fn read_mapping(path: &Path) -> Result<FillMapping> {
    let text = fs::read_to_string(path).with_context(|| format!("reading mapping {path:?}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing mapping {path:?}"))
}

fn touched_controls(page: &Page) -> Vec<ControlState> {
    page.frames()
        .filter_map(|frame| frame.document())
        .flat_map(|doc| doc.touched_controls())
        .collect()
}
