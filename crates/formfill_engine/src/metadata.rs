use engine_logging::engine_warn;
use scraper::{ElementRef, Selector};

use crate::dom::Document;
use crate::settings::HeuristicSettings;
use crate::text::{compact_whitespace, rendered_text};
use crate::types::PageMetadata;

/// Company name and job title of the page. Only ever called on the top-level
/// document; sub-frames do not contribute metadata.
pub fn extract_metadata(doc: &Document, settings: &HeuristicSettings) -> PageMetadata {
    PageMetadata {
        company_name: company_name(doc, settings),
        job_title: job_title(doc),
    }
}

fn company_name(doc: &Document, settings: &HeuristicSettings) -> String {
    for raw in &settings.company_selectors {
        let selector = match Selector::parse(raw) {
            Ok(selector) => selector,
            Err(err) => {
                engine_warn!("ignoring invalid company selector {raw:?}: {err}");
                continue;
            }
        };
        let found = doc
            .html()
            .select(&selector)
            .find_map(|el| company_text(el, settings.label_fallback_max_chars));
        if let Some(name) = found {
            return name;
        }
    }
    doc.url()
        .and_then(|url| url.host_str())
        .map(str::to_string)
        .unwrap_or_default()
}

fn company_text(element: ElementRef<'_>, max_chars: usize) -> Option<String> {
    let attrs = element.value();
    let explicit = attrs
        .attr("data-company")
        .or_else(|| attrs.attr("content"))
        .map(str::trim)
        .filter(|value| !value.is_empty());
    if let Some(value) = explicit {
        return Some(value.to_string());
    }
    let text = rendered_text(element);
    let first_line = text.lines().next()?.trim();
    (!first_line.is_empty() && first_line.chars().count() < max_chars)
        .then(|| first_line.to_string())
}

fn job_title(doc: &Document) -> String {
    doc.elements()
        .filter(|el| el.value().name() == "h1")
        .map(|heading| compact_whitespace(&rendered_text(heading)))
        .find(|text| !text.is_empty())
        .or_else(|| doc.title())
        .unwrap_or_default()
}
