use std::collections::HashSet;
use std::fmt::Write;

use engine_logging::{engine_debug, engine_info, engine_trace, enter_frame};
use scraper::ElementRef;
use sha2::{Digest, Sha256};

use crate::context::extract_context;
use crate::controls::{
    control_kind, is_form_control, is_radio, is_required, option_label, select_options,
};
use crate::dedup::dedupe_fields;
use crate::dom::{radio_group, Document};
use crate::error::ScanError;
use crate::label::{infer_group_label, infer_label, infer_option_label};
use crate::metadata::extract_metadata;
use crate::page::{Frame, FrameLabel, Page};
use crate::settings::HeuristicSettings;
use crate::types::{FieldDescriptor, ScanReport};

/// Scans every frame of `page`, concatenates the per-frame results in frame
/// order, deduplicates them and stamps the top-level metadata on each field.
///
/// Denied sub-frames contribute nothing; a denied top-level frame fails the
/// whole scan.
pub fn scan_page(page: &Page, settings: &HeuristicSettings) -> Result<ScanReport, ScanError> {
    let top = match page.top() {
        Frame::Scriptable(doc) => doc,
        Frame::Denied { url, reason } => {
            return Err(ScanError::TopFrameDenied {
                url: url.clone(),
                reason: reason.clone(),
            })
        }
    };
    let metadata = extract_metadata(top, settings);

    let mut collected = Vec::new();
    let mut frames_scanned = 0;
    let mut frames_denied = 0;
    for (index, frame) in page.frames().enumerate() {
        let _scope = enter_frame(FrameLabel { index, frame }.to_string());
        match frame {
            Frame::Scriptable(doc) => {
                let found = scan_document(doc, settings);
                engine_debug!("found {} fields", found.len());
                collected.extend(found);
                frames_scanned += 1;
            }
            Frame::Denied { reason, .. } => {
                engine_info!("injection refused, skipping frame: {reason}");
                frames_denied += 1;
            }
        }
    }

    let before = collected.len();
    let mut fields = dedupe_fields(collected);
    engine_info!(
        "scan kept {} of {} fields across {} frames ({} denied)",
        fields.len(),
        before,
        frames_scanned,
        frames_denied
    );
    for field in &mut fields {
        field.company_name.clone_from(&metadata.company_name);
        field.job_title.clone_from(&metadata.job_title);
    }

    Ok(ScanReport {
        fields,
        metadata,
        frames_scanned,
        frames_denied,
    })
}

/// Extracts descriptors from a single document. Pure: no dedup across
/// frames and no page metadata.
pub fn scan_document(doc: &Document, settings: &HeuristicSettings) -> Vec<FieldDescriptor> {
    let mut seen_radio_groups: HashSet<&str> = HashSet::new();
    let mut fields = Vec::new();

    for (ordinal, element) in doc.elements().enumerate() {
        if !is_form_control(element) {
            continue;
        }
        if is_radio(element) {
            if let Some(name) = element.value().attr("name").filter(|name| !name.is_empty()) {
                if !seen_radio_groups.insert(name) {
                    continue;
                }
            }
        }

        let field = describe(doc, element, ordinal, settings);
        if field.has_signal(settings.min_context_chars) {
            fields.push(field);
        } else {
            engine_trace!("dropping field without label, placeholder or context: {}", field.id);
        }
    }

    fields
}

fn describe(
    doc: &Document,
    element: ElementRef<'_>,
    ordinal: usize,
    settings: &HeuristicSettings,
) -> FieldDescriptor {
    let attrs = element.value();
    let name = attrs.attr("name").unwrap_or_default().to_string();
    let id = attrs
        .id()
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .or_else(|| (!name.is_empty()).then(|| name.clone()))
        .unwrap_or_else(|| synthesize_id(doc, element, ordinal));

    let radio = is_radio(element);
    let label = radio
        .then(|| infer_group_label(doc, element, settings))
        .flatten()
        .or_else(|| infer_label(doc, element, settings))
        .map(|label| label.text)
        .unwrap_or_default();

    let placeholder = attrs
        .attr("placeholder")
        .or_else(|| attrs.attr("aria-placeholder"))
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    let options = if attrs.name() == "select" {
        select_options(element).into_iter().map(option_label).collect()
    } else if radio {
        radio_group(doc, element)
            .into_iter()
            .map(|member| {
                infer_option_label(doc, member, settings)
                    .map(|label| label.text.trim().to_string())
                    .or_else(|| member.value().attr("value").map(str::to_string))
                    .unwrap_or_default()
            })
            .filter(|option| !option.is_empty())
            .collect()
    } else {
        Vec::new()
    };

    FieldDescriptor {
        id,
        name,
        label,
        placeholder,
        kind: control_kind(element),
        context: extract_context(element, settings),
        options,
        required: is_required(element),
        company_name: String::new(),
        job_title: String::new(),
    }
}

/// Handle for controls with neither id nor name. Derived from the document
/// URL and the element's position so repeated scans of the same markup agree.
fn synthesize_id(doc: &Document, element: ElementRef<'_>, ordinal: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(doc.url().map(|url| url.as_str()).unwrap_or_default().as_bytes());
    hasher.update(ordinal.to_le_bytes());
    hasher.update(element.value().name().as_bytes());
    let digest = hasher.finalize();
    let mut token = String::from("field-");
    for byte in digest.iter().take(6) {
        let _ = write!(&mut token, "{byte:02x}");
    }
    token
}
