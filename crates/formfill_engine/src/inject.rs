use std::collections::BTreeMap;

use ego_tree::NodeId;
use engine_logging::{engine_debug, engine_info, engine_warn, enter_frame};

use crate::consent::consent_pass;
use crate::controls::{
    is_checkbox, is_form_control, is_radio, option_label, option_value, select_options,
};
use crate::dom::{radio_group, Document, EventKind};
use crate::error::FillError;
use crate::label::infer_option_label;
use crate::page::{Frame, FrameLabel, Page};
use crate::settings::HeuristicSettings;
use crate::types::{FillMapping, FillOutcome};

/// Per-document result: one entry per mapping id, plus the consent count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFill {
    pub results: Vec<(String, Result<(), FillError>)>,
    pub consented: usize,
}

impl DocumentFill {
    pub fn filled(&self) -> usize {
        self.results.iter().filter(|(_, result)| result.is_ok()).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldStatus {
    Unresolved,
    Unapplied,
    Applied,
}

enum Strategy {
    Select,
    Radio,
    Checkbox,
    Text,
}

const CHECKED_WORDS: &[&str] = &["true", "yes", "y", "on", "1", "checked"];
const UNCHECKED_WORDS: &[&str] = &["false", "no", "n", "off", "0", "unchecked"];

/// Writes `mapping` into every scriptable frame, then runs the consent pass
/// in each. Frames are independent: an id is resolved separately in each one.
pub fn fill_page(page: &mut Page, mapping: &FillMapping, settings: &HeuristicSettings) -> FillOutcome {
    let mut outcome = FillOutcome::default();
    let mut status: BTreeMap<String, FieldStatus> = BTreeMap::new();

    for (index, frame) in page.frames_mut().enumerate() {
        let _scope = enter_frame(FrameLabel { index, frame: &*frame }.to_string());
        let Frame::Scriptable(doc) = frame else {
            engine_info!("injection refused, skipping frame");
            continue;
        };

        let report = fill_document(doc, mapping, settings);
        outcome.filled += report.filled();
        outcome.consented += report.consented;
        for (id, result) in report.results {
            let next = match result {
                Ok(()) => FieldStatus::Applied,
                Err(FillError::Unresolved) => FieldStatus::Unresolved,
                Err(_) => FieldStatus::Unapplied,
            };
            let entry = status.entry(id).or_insert(next);
            *entry = (*entry).max_with(next);
        }
    }

    for (id, field_status) in status {
        match field_status {
            FieldStatus::Unresolved => outcome.unresolved.push(id),
            FieldStatus::Unapplied => outcome.unapplied.push(id),
            FieldStatus::Applied => {}
        }
    }
    engine_info!(
        "fill applied {} of {} mapped fields, {} consent boxes checked",
        outcome.filled,
        mapping.len(),
        outcome.consented
    );
    outcome
}

impl FieldStatus {
    fn max_with(self, other: FieldStatus) -> FieldStatus {
        use FieldStatus::*;
        match (self, other) {
            (Applied, _) | (_, Applied) => Applied,
            (Unapplied, _) | (_, Unapplied) => Unapplied,
            _ => Unresolved,
        }
    }
}

/// Fills one document. Each entry is attempted on its own; a failure is
/// logged and recorded without stopping the rest.
pub fn fill_document(
    doc: &mut Document,
    mapping: &FillMapping,
    settings: &HeuristicSettings,
) -> DocumentFill {
    let mut report = DocumentFill::default();
    for (id, value) in mapping.iter() {
        let result = match resolve_target(doc, id) {
            Some(target) => apply(doc, target, value, settings),
            None => Err(FillError::Unresolved),
        };
        match &result {
            Ok(()) => engine_debug!("filled {id}"),
            Err(err) if err.is_expected() => engine_debug!("skipped {id}: {err}"),
            Err(err) => engine_warn!("failed to fill {id}: {err}"),
        }
        report.results.push((id.to_string(), result));
    }
    report.consented = consent_pass(doc, settings);
    report
}

/// Finds the element a descriptor id refers to: markup id, then name, then a
/// case-insensitive match on either.
pub fn resolve_target(doc: &Document, key: &str) -> Option<NodeId> {
    doc.element_by_id(key)
        .or_else(|| doc.element_by_name(key))
        .or_else(|| doc.element_by_name_or_id_ignore_case(key))
        .map(|element| element.id())
}

fn apply(
    doc: &mut Document,
    target: NodeId,
    value: &str,
    settings: &HeuristicSettings,
) -> Result<(), FillError> {
    let strategy = {
        let element = doc.element(target).ok_or(FillError::Detached)?;
        if !is_form_control(element) {
            return Err(FillError::NotFillable {
                tag: element.value().name().to_string(),
            });
        }
        if element.value().name() == "select" {
            Strategy::Select
        } else if is_radio(element) {
            Strategy::Radio
        } else if is_checkbox(element) {
            Strategy::Checkbox
        } else {
            Strategy::Text
        }
    };

    match strategy {
        Strategy::Select => fill_select(doc, target, value),
        Strategy::Radio => fill_radio(doc, target, value, settings),
        Strategy::Checkbox => fill_checkbox(doc, target, value),
        Strategy::Text => fill_text(doc, target, value),
    }
}

/// Picks the first option whose text or value contains `value`, ignoring case.
fn fill_select(doc: &mut Document, target: NodeId, value: &str) -> Result<(), FillError> {
    let needle = value.trim().to_lowercase();
    if needle.is_empty() {
        return Err(FillError::EmptyValue);
    }
    let chosen = {
        let select = doc.element(target).ok_or(FillError::Detached)?;
        select_options(select).into_iter().find_map(|option| {
            let submitted = option_value(option);
            let matches = option_label(option).to_lowercase().contains(&needle)
                || submitted.to_lowercase().contains(&needle);
            matches.then_some(submitted)
        })
    };
    let Some(submitted) = chosen else {
        return Err(FillError::NoMatchingOption {
            value: value.to_string(),
        });
    };

    doc.set_value(target, submitted);
    doc.dispatch(target, EventKind::Change);
    Ok(())
}

/// Activates the first radio of the group whose label contains `value` or
/// whose own value equals it, ignoring case.
fn fill_radio(
    doc: &mut Document,
    target: NodeId,
    value: &str,
    settings: &HeuristicSettings,
) -> Result<(), FillError> {
    let wanted = value.trim();
    let needle = wanted.to_lowercase();
    if needle.is_empty() {
        return Err(FillError::EmptyValue);
    }
    let chosen = {
        let view: &Document = doc;
        let radio = view.element(target).ok_or(FillError::Detached)?;
        radio_group(view, radio)
            .into_iter()
            .find(|member| {
                let label_matches = infer_option_label(view, *member, settings)
                    .is_some_and(|label| label.text.to_lowercase().contains(&needle));
                label_matches
                    || member
                        .value()
                        .attr("value")
                        .is_some_and(|own| own.eq_ignore_ascii_case(wanted))
            })
            .map(|member| member.id())
    };
    let Some(member) = chosen else {
        return Err(FillError::NoMatchingRadio {
            value: value.to_string(),
        });
    };

    doc.click(member);
    doc.dispatch(member, EventKind::Change);
    Ok(())
}

/// Sets a checkbox from a yes/no-like value; the box's own `value` also
/// means checked. The submitted value is never rewritten.
fn fill_checkbox(doc: &mut Document, target: NodeId, value: &str) -> Result<(), FillError> {
    let wanted = value.trim().to_lowercase();
    let want_checked = if CHECKED_WORDS.contains(&wanted.as_str()) {
        true
    } else if UNCHECKED_WORDS.contains(&wanted.as_str()) {
        false
    } else {
        let checkbox = doc.element(target).ok_or(FillError::Detached)?;
        let own_value = checkbox
            .value()
            .attr("value")
            .is_some_and(|own| !wanted.is_empty() && own.trim().eq_ignore_ascii_case(&wanted));
        if !own_value {
            return Err(FillError::NotAToggle {
                value: value.to_string(),
            });
        }
        true
    };

    if doc.is_checked(target) != want_checked {
        doc.click(target);
        doc.dispatch(target, EventKind::Change);
    }
    match doc.is_checked(target) {
        checked if checked == want_checked => Ok(()),
        checked => Err(FillError::Rejected {
            actual: if checked { "checked" } else { "unchecked" }.to_string(),
        }),
    }
}

/// Focus, assign, then `input` → `change` → `blur`, all bubbling. Form
/// frameworks listening on an ancestor depend on that exact sequence.
fn fill_text(doc: &mut Document, target: NodeId, value: &str) -> Result<(), FillError> {
    if !doc.focus(target) {
        return Err(FillError::Detached);
    }
    doc.set_value(target, value);
    for kind in [EventKind::Input, EventKind::Change, EventKind::Blur] {
        doc.dispatch(target, kind);
    }
    match doc.value(target) {
        Some(actual) if actual == value => Ok(()),
        Some(actual) => Err(FillError::Rejected { actual }),
        None => Err(FillError::Detached),
    }
}
