//! Label inference.
//!
//! Labels come from an ordered table of pure extractors. The first extractor
//! that yields non-blank text wins, so each rule can be tested on its own and
//! the priority order is visible in one place.

use scraper::ElementRef;

use crate::context::{is_container, nearest_container};
use crate::dom::{radio_group, Document};
use crate::settings::HeuristicSettings;
use crate::text::rendered_text;

/// Which rule produced a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSource {
    GroupLegend,
    AriaLabel,
    AriaLabelledBy,
    LabelFor,
    WrappingLabel,
    SiblingLabel,
    ContainerText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferredLabel {
    pub source: LabelSource,
    pub text: String,
}

struct LabelQuery<'a> {
    doc: &'a Document,
    element: ElementRef<'a>,
    settings: &'a HeuristicSettings,
}

type Extractor = fn(&LabelQuery<'_>) -> Option<String>;

const FIELD_CASCADE: &[(LabelSource, Extractor)] = &[
    (LabelSource::AriaLabel, aria_label),
    (LabelSource::AriaLabelledBy, aria_labelledby),
    (LabelSource::LabelFor, label_for),
    (LabelSource::WrappingLabel, wrapping_label),
    (LabelSource::SiblingLabel, sibling_label),
    (LabelSource::ContainerText, container_first_line),
];

/// Used for individual radios and checkboxes, where container text would
/// describe the whole group rather than the option.
const OPTION_CASCADE: &[(LabelSource, Extractor)] = &[
    (LabelSource::AriaLabel, aria_label),
    (LabelSource::LabelFor, label_for),
    (LabelSource::WrappingLabel, wrapping_label),
];

const GROUP_CASCADE: &[(LabelSource, Extractor)] = &[
    (LabelSource::GroupLegend, group_question),
    (LabelSource::ContainerText, group_container_first_line),
];

/// Full cascade for a scanned control.
pub fn infer_label(
    doc: &Document,
    element: ElementRef<'_>,
    settings: &HeuristicSettings,
) -> Option<InferredLabel> {
    run_cascade(FIELD_CASCADE, doc, element, settings)
}

/// Abbreviated cascade: aria-label, then `label[for]`, then an enclosing label.
pub fn infer_option_label(
    doc: &Document,
    element: ElementRef<'_>,
    settings: &HeuristicSettings,
) -> Option<InferredLabel> {
    run_cascade(OPTION_CASCADE, doc, element, settings)
}

/// The question a radio group answers: the nearest `fieldset` legend or
/// `role="radiogroup"` accessible name, else the first line of the nearest
/// container holding the whole group.
pub fn infer_group_label(
    doc: &Document,
    element: ElementRef<'_>,
    settings: &HeuristicSettings,
) -> Option<InferredLabel> {
    run_cascade(GROUP_CASCADE, doc, element, settings)
}

fn run_cascade(
    cascade: &[(LabelSource, Extractor)],
    doc: &Document,
    element: ElementRef<'_>,
    settings: &HeuristicSettings,
) -> Option<InferredLabel> {
    let query = LabelQuery {
        doc,
        element,
        settings,
    };
    cascade.iter().find_map(|(source, extract)| {
        extract(&query)
            .filter(|text| !text.trim().is_empty())
            .map(|text| InferredLabel {
                source: *source,
                text,
            })
    })
}

fn aria_label(query: &LabelQuery<'_>) -> Option<String> {
    query.element.value().attr("aria-label").map(str::to_string)
}

fn aria_labelledby(query: &LabelQuery<'_>) -> Option<String> {
    let ids = query.element.value().attr("aria-labelledby")?;
    Some(labelledby_text(query.doc, ids))
}

fn label_for(query: &LabelQuery<'_>) -> Option<String> {
    let id = query.element.value().id().filter(|id| !id.is_empty())?;
    let label = query
        .doc
        .elements()
        .find(|el| el.value().name() == "label" && el.value().attr("for") == Some(id))?;
    Some(rendered_text(label).trim().to_string())
}

fn wrapping_label(query: &LabelQuery<'_>) -> Option<String> {
    let label = query
        .element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "label")?;
    Some(rendered_text(label).trim().to_string())
}

/// Nearest preceding `<label>` among the element's siblings, skipping labels
/// explicitly bound to some other control.
fn sibling_label(query: &LabelQuery<'_>) -> Option<String> {
    let own_id = query.element.value().id();
    let label = query
        .element
        .prev_siblings()
        .filter_map(ElementRef::wrap)
        .filter(|sibling| sibling.value().name() == "label")
        .find(|label| match label.value().attr("for") {
            Some(target) if !target.is_empty() => Some(target) == own_id,
            _ => true,
        })?;
    Some(rendered_text(label).trim().to_string())
}

fn container_first_line(query: &LabelQuery<'_>) -> Option<String> {
    let container = nearest_container(query.element, query.settings)?;
    short_first_line(container, query.settings)
}

/// Like [`container_first_line`], but the container must enclose every radio
/// sharing the element's name, so a per-option wrapper is never taken for the
/// question.
fn group_container_first_line(query: &LabelQuery<'_>) -> Option<String> {
    let members = radio_group(query.doc, query.element);
    let container = query
        .element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .filter(|ancestor| is_container(*ancestor, query.settings))
        .find(|container| {
            members
                .iter()
                .all(|member| member.ancestors().any(|node| node.id() == container.id()))
        })?;
    short_first_line(container, query.settings)
}

fn short_first_line(container: ElementRef<'_>, settings: &HeuristicSettings) -> Option<String> {
    let text = rendered_text(container);
    let first_line = text.lines().next()?.trim();
    (first_line.chars().count() < settings.label_fallback_max_chars)
        .then(|| first_line.to_string())
}

fn group_question(query: &LabelQuery<'_>) -> Option<String> {
    query
        .element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find_map(|ancestor| {
            let attrs = ancestor.value();
            let text = if attrs
                .attr("role")
                .is_some_and(|role| role.trim().eq_ignore_ascii_case("radiogroup"))
            {
                attrs
                    .attr("aria-label")
                    .map(|label| label.trim().to_string())
                    .or_else(|| {
                        attrs
                            .attr("aria-labelledby")
                            .map(|ids| labelledby_text(query.doc, ids))
                    })
            } else if attrs.name() == "fieldset" {
                ancestor
                    .children()
                    .filter_map(ElementRef::wrap)
                    .find(|child| child.value().name() == "legend")
                    .map(|legend| rendered_text(legend).trim().to_string())
            } else {
                None
            };
            text.filter(|text| !text.is_empty())
        })
}

fn labelledby_text(doc: &Document, ids: &str) -> String {
    ids.split_whitespace()
        .filter_map(|id| doc.element_by_id(id))
        .map(|el| rendered_text(el).trim().to_string())
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}
