use ego_tree::NodeId;
use engine_logging::engine_debug;
use scraper::ElementRef;

use crate::controls::is_checkbox;
use crate::dom::Document;
use crate::label::infer_label;
use crate::settings::HeuristicSettings;
use crate::text::rendered_text;

/// Checks every consent/terms checkbox in `doc`, whatever the mapping said.
///
/// Returns how many consent boxes end up checked by a click on this document,
/// in this pass or an earlier one, so a re-run over an already filled form
/// reports the same number. Boxes the markup already had checked are left
/// alone and not counted.
pub fn consent_pass(doc: &mut Document, settings: &HeuristicSettings) -> usize {
    let view: &Document = doc;
    let consent_boxes: Vec<NodeId> = view
        .elements()
        .filter(|el| is_checkbox(*el))
        .filter(|el| settings.mentions_consent(&consent_haystack(view, *el, settings)))
        .map(|el| el.id())
        .collect();

    let mut consented = 0;
    for node in consent_boxes {
        if !doc.is_checked(node) {
            engine_debug!("checking consent box {:?}", doc.control_state(node).map(|c| c.key));
            doc.click(node);
        }
        if doc.checked_by_click(node) {
            consented += 1;
        }
    }
    consented
}

/// Lowercased label plus parent text of a checkbox.
pub fn consent_haystack(
    doc: &Document,
    checkbox: ElementRef<'_>,
    settings: &HeuristicSettings,
) -> String {
    let label = infer_label(doc, checkbox, settings)
        .map(|label| label.text)
        .unwrap_or_default();
    let parent_text = checkbox
        .parent()
        .and_then(ElementRef::wrap)
        .map(rendered_text)
        .unwrap_or_default();
    format!("{label} {parent_text}").to_lowercase()
}
