use formfill_engine::FillOutcome;

use crate::{AppState, Effect, MatchRequest, Msg, Phase};

/// Pure update function: applies a message to state and returns any effects.
///
/// A message that does not belong to the current phase (a late matcher reply,
/// a duplicate completion) leaves the state untouched.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match (state.phase(), msg) {
        (phase, Msg::ScanRequested) if phase.is_settled() => {
            state.begin_scan();
            vec![Effect::RunScan]
        }
        (Phase::Scanning, Msg::ScanCompleted(report)) => {
            let request = MatchRequest::from_report(&report);
            state.set_report(report);
            if request.fields.is_empty() {
                state.set_outcome(FillOutcome::default());
                state.enter(Phase::Done);
                Vec::new()
            } else {
                state.enter(Phase::Matching);
                vec![Effect::RequestMatch(request)]
            }
        }
        (Phase::Scanning, Msg::ScanFailed(error)) | (Phase::Matching, Msg::MatchFailed(error)) => {
            state.fail(error);
            Vec::new()
        }
        (Phase::Matching, Msg::MatchCompleted(response)) => {
            // An empty mapping still fills: the consent pass runs regardless.
            state.set_missing_fields(response.missing_fields);
            state.enter(Phase::Filling);
            vec![Effect::RunFill(response.mappings)]
        }
        (Phase::Filling, Msg::FillCompleted(outcome)) => {
            state.set_outcome(outcome);
            state.enter(Phase::Done);
            Vec::new()
        }
        (_, Msg::Reset) => {
            state.reset();
            Vec::new()
        }
        _ => Vec::new(),
    };

    (state, effects)
}
