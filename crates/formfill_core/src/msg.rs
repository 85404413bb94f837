use formfill_engine::{FillOutcome, ScanReport};

use crate::MatchResponse;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User asked for a fresh round trip over the current page.
    ScanRequested,
    /// Scanner finished over every frame.
    ScanCompleted(ScanReport),
    /// Top-level document refused injection.
    ScanFailed(String),
    /// Matcher answered with a mapping.
    MatchCompleted(MatchResponse),
    /// Transport, status or deadline failure talking to the matcher.
    MatchFailed(String),
    /// Injector finished over every frame.
    FillCompleted(FillOutcome),
    /// Drop all results and return to idle.
    Reset,
    NoOp,
}
