use serde::Serialize;

use crate::Phase;

/// Flattened snapshot of a round trip, as printed by the host.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RoundTripView {
    pub phase: Phase,
    pub field_count: usize,
    pub company_name: String,
    pub job_title: String,
    pub filled: usize,
    pub consented: usize,
    pub missing_fields: Vec<String>,
    pub error: Option<String>,
    #[serde(skip)]
    pub dirty: bool,
}
