use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One detected fillable control (a whole group, for radios).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub id: String,
    pub name: String,
    pub label: String,
    pub placeholder: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub context: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub job_title: String,
}

impl FieldDescriptor {
    /// Whether the descriptor carries anything a matcher could key on.
    pub fn has_signal(&self, min_context_chars: usize) -> bool {
        !self.label.trim().is_empty()
            || !self.placeholder.trim().is_empty()
            || (!self.context.is_empty() && self.context.chars().count() >= min_context_chars)
    }
}

/// Page-level facts shared by every descriptor of one scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub company_name: String,
    pub job_title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub fields: Vec<FieldDescriptor>,
    pub metadata: PageMetadata,
    pub frames_scanned: usize,
    pub frames_denied: usize,
}

/// Descriptor id → value to write, as produced by the matcher.
///
/// Non-string JSON values are kept in their serialized form; nulls are
/// dropped. Iteration is in id order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Value>",
    into = "BTreeMap<String, String>"
)]
pub struct FillMapping {
    entries: BTreeMap<String, String>,
}

impl FillMapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(id.into(), value.into());
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(id, value)| (id.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<BTreeMap<String, Value>> for FillMapping {
    fn from(raw: BTreeMap<String, Value>) -> Self {
        let entries = raw
            .into_iter()
            .filter_map(|(id, value)| {
                let value = match value {
                    Value::Null => return None,
                    Value::String(text) => text,
                    other => other.to_string(),
                };
                Some((id, value))
            })
            .collect();
        Self { entries }
    }
}

impl From<FillMapping> for BTreeMap<String, String> {
    fn from(mapping: FillMapping) -> Self {
        mapping.entries
    }
}

impl<K, V> FromIterator<(K, V)> for FillMapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (id, value) in iter {
            mapping.insert(id, value);
        }
        mapping
    }
}

/// Result of one fill pass over a page.
///
/// `unresolved` and `unapplied` are diagnostics only; a field missing from
/// the live DOM is an expected outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillOutcome {
    pub filled: usize,
    pub consented: usize,
    pub unresolved: Vec<String>,
    pub unapplied: Vec<String>,
}

impl FillOutcome {
    /// Total confirmed writes: mapping-driven fills plus consent boxes.
    pub fn count(&self) -> usize {
        self.filled + self.consented
    }
}
