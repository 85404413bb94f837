use formfill_engine::FillMapping;

use crate::MatchRequest;

/// Work the host must perform; its result comes back as a [`crate::Msg`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    RunScan,
    RequestMatch(MatchRequest),
    RunFill(FillMapping),
}
