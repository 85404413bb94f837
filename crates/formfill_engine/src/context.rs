use scraper::ElementRef;

use crate::settings::HeuristicSettings;
use crate::text::{compact_whitespace, rendered_text, truncate_chars};

/// Whether `element` is the kind of wrapper that groups a control with its
/// prose: a container tag or a form-group-like class.
pub fn is_container(element: ElementRef<'_>, settings: &HeuristicSettings) -> bool {
    let attrs = element.value();
    if settings
        .container_tags
        .iter()
        .any(|tag| tag.eq_ignore_ascii_case(attrs.name()))
    {
        return true;
    }
    attrs.classes().any(|class| {
        let class = class.to_ascii_lowercase();
        settings
            .container_class_markers
            .iter()
            .filter(|marker| !marker.is_empty())
            .any(|marker| class.contains(marker.as_str()))
    })
}

/// Closest ancestor (never the element itself) that is a container.
pub fn nearest_container<'a>(
    element: ElementRef<'a>,
    settings: &HeuristicSettings,
) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| is_container(*ancestor, settings))
}

/// Single-spaced text of the nearest container, capped at
/// `context_max_chars` characters.
pub fn extract_context(element: ElementRef<'_>, settings: &HeuristicSettings) -> String {
    let Some(container) = nearest_container(element, settings) else {
        return String::new();
    };
    let compact = compact_whitespace(&rendered_text(container));
    truncate_chars(&compact, settings.context_max_chars)
        .trim_end()
        .to_string()
}
