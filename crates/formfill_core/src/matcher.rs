use formfill_engine::{FieldDescriptor, FillMapping, ScanReport};
use serde::{Deserialize, Serialize};

/// Body of `POST {endpoint}/autofill`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRequest {
    pub fields: Vec<FieldDescriptor>,
    pub company_name: String,
    pub job_title: String,
}

impl MatchRequest {
    pub fn from_report(report: &ScanReport) -> Self {
        Self {
            fields: report.fields.clone(),
            company_name: report.metadata.company_name.clone(),
            job_title: report.metadata.job_title.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResponse {
    #[serde(default)]
    pub mappings: FillMapping,
    #[serde(default)]
    pub missing_fields: Vec<MissingField>,
}

/// A field the matcher had no answer for. Older services send a bare field
/// id, newer ones a label plus the profile question that would answer it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MissingField {
    Id(String),
    Question {
        field_label: String,
        #[serde(default)]
        suggested_question_key: Option<String>,
    },
}

impl MissingField {
    pub fn label(&self) -> &str {
        match self {
            MissingField::Id(id) => id,
            MissingField::Question { field_label, .. } => field_label,
        }
    }
}
