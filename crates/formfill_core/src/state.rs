use formfill_engine::{FillOutcome, ScanReport};
use serde::Serialize;

use crate::view_model::RoundTripView;
use crate::MissingField;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Scanning,
    Matching,
    Filling,
    Done,
    Failed,
}

impl Phase {
    /// Whether a new round trip may start from here.
    pub fn is_settled(self) -> bool {
        matches!(self, Phase::Idle | Phase::Done | Phase::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    phase: Phase,
    report: Option<ScanReport>,
    missing_fields: Vec<MissingField>,
    outcome: Option<FillOutcome>,
    error: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn report(&self) -> Option<&ScanReport> {
        self.report.as_ref()
    }

    pub fn outcome(&self) -> Option<&FillOutcome> {
        self.outcome.as_ref()
    }

    pub fn view(&self) -> RoundTripView {
        let (company_name, job_title) = self
            .report
            .as_ref()
            .map(|report| {
                (
                    report.metadata.company_name.clone(),
                    report.metadata.job_title.clone(),
                )
            })
            .unwrap_or_default();
        let outcome = self.outcome.clone().unwrap_or_default();
        RoundTripView {
            phase: self.phase,
            field_count: self.report.as_ref().map_or(0, |report| report.fields.len()),
            company_name,
            job_title,
            filled: outcome.filled,
            consented: outcome.consented,
            missing_fields: self
                .missing_fields
                .iter()
                .map(|missing| missing.label().to_string())
                .collect(),
            error: self.error.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_scan(&mut self) {
        *self = Self {
            phase: Phase::Scanning,
            dirty: true,
            ..Self::default()
        };
    }

    pub(crate) fn set_report(&mut self, report: ScanReport) {
        self.report = Some(report);
        self.dirty = true;
    }

    pub(crate) fn set_missing_fields(&mut self, missing: Vec<MissingField>) {
        self.missing_fields = missing;
        self.dirty = true;
    }

    pub(crate) fn set_outcome(&mut self, outcome: FillOutcome) {
        self.outcome = Some(outcome);
        self.dirty = true;
    }

    pub(crate) fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        self.dirty = true;
    }

    pub(crate) fn fail(&mut self, error: String) {
        self.error = Some(error);
        self.enter(Phase::Failed);
    }

    pub(crate) fn reset(&mut self) {
        *self = Self {
            dirty: true,
            ..Self::default()
        };
    }
}
