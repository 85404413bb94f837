use serde::{Deserialize, Serialize};

/// Heuristic tunables shared by the scanner and the injector.
///
/// Every field has a default, so a settings file only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicSettings {
    /// Container text is only taken as a label when shorter than this.
    pub label_fallback_max_chars: usize,
    /// Upper bound on descriptor context, in characters.
    pub context_max_chars: usize,
    /// Context shorter than this does not count as an identifying signal.
    pub min_context_chars: usize,
    /// Tags that delimit a control's surrounding context.
    pub container_tags: Vec<String>,
    /// Class fragments (lowercase) marking form-group-like wrappers.
    pub container_class_markers: Vec<String>,
    /// Lowercase fragments that mark a checkbox as a consent/terms box.
    pub consent_keywords: Vec<String>,
    /// CSS selectors tried in order to find the hiring company's name.
    pub company_selectors: Vec<String>,
}

impl Default for HeuristicSettings {
    fn default() -> Self {
        Self {
            label_fallback_max_chars: 100,
            context_max_chars: 500,
            min_context_chars: 3,
            container_tags: to_strings(&["div", "section", "fieldset"]),
            container_class_markers: to_strings(&["form-group", "form-field", "field", "question"]),
            consent_keywords: to_strings(&[
                "agree",
                "consent",
                "privacy",
                "terms",
                "policy",
                "acknowledge",
                "data processing",
                "gdpr",
            ]),
            company_selectors: to_strings(&[
                "[data-company]",
                "[itemprop='hiringOrganization'] [itemprop='name']",
                "[class*='company-name']",
                "[class*='companyName']",
                "[class*='company']",
                "meta[property='og:site_name']",
            ]),
        }
    }
}

impl HeuristicSettings {
    /// True when the lowercase `haystack` mentions any consent keyword at the
    /// start of a word: "agreement" counts, "disagree" does not.
    pub fn mentions_consent(&self, haystack: &str) -> bool {
        self.consent_keywords
            .iter()
            .filter(|keyword| !keyword.is_empty())
            .any(|keyword| starts_a_word(haystack, &keyword.to_lowercase()))
    }
}

fn starts_a_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(at, _)| {
        haystack[..at]
            .chars()
            .next_back()
            .map_or(true, |previous| !previous.is_alphanumeric())
    })
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}
