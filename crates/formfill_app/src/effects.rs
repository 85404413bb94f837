use std::time::Duration;

use engine_logging::{engine_info, engine_warn};
use formfill_core::{Effect, Msg};
use formfill_engine::{fill_page, scan_page, HeuristicSettings, Page};

use crate::matcher::MatchService;

/// Performs the effects the round-trip state machine asks for, against one
/// loaded page.
pub struct EffectRunner<'a> {
    page: &'a mut Page,
    heuristics: &'a HeuristicSettings,
    matcher: &'a dyn MatchService,
    deadline: Duration,
}

impl<'a> EffectRunner<'a> {
    pub fn new(
        page: &'a mut Page,
        heuristics: &'a HeuristicSettings,
        matcher: &'a dyn MatchService,
        deadline: Duration,
    ) -> Self {
        Self {
            page,
            heuristics,
            matcher,
            deadline,
        }
    }

    pub async fn run(&mut self, effect: Effect) -> Msg {
        match effect {
            Effect::RunScan => match scan_page(self.page, self.heuristics) {
                Ok(report) => {
                    engine_info!(
                        "RunScan found {} fields in {} frames",
                        report.fields.len(),
                        report.frames_scanned
                    );
                    Msg::ScanCompleted(report)
                }
                Err(err) => {
                    engine_warn!("RunScan failed: {}", err);
                    Msg::ScanFailed(err.to_string())
                }
            },
            Effect::RequestMatch(request) => {
                let call = self.matcher.request_match(&request);
                match tokio::time::timeout(self.deadline, call).await {
                    Ok(Ok(response)) => {
                        engine_info!(
                            "RequestMatch mapped {} fields, {} missing",
                            response.mappings.len(),
                            response.missing_fields.len()
                        );
                        Msg::MatchCompleted(response)
                    }
                    Ok(Err(err)) => {
                        engine_warn!("RequestMatch failed: {}", err);
                        Msg::MatchFailed(err.to_string())
                    }
                    Err(_) => {
                        engine_warn!("RequestMatch exceeded {:?}", self.deadline);
                        Msg::MatchFailed(format!(
                            "matcher did not answer within {:?}",
                            self.deadline
                        ))
                    }
                }
            }
            Effect::RunFill(mapping) => {
                Msg::FillCompleted(fill_page(self.page, &mapping, self.heuristics))
            }
        }
    }
}
