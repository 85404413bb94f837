//! Formfill engine: scans fillable controls out of a page and its frames, and
//! writes matched values back with the events a web form expects.
mod consent;
mod context;
mod controls;
mod dedup;
mod dom;
mod error;
mod inject;
mod label;
mod metadata;
mod page;
mod scan;
mod settings;
mod text;
mod types;

pub use consent::{consent_haystack, consent_pass};
pub use context::{extract_context, is_container, nearest_container};
pub use controls::{control_kind, is_form_control};
pub use dedup::dedupe_fields;
pub use dom::{radio_group, ControlState, Document, DomEvent, EventKind};
pub use ego_tree::NodeId;
pub use error::{FillError, ScanError};
pub use inject::{fill_document, fill_page, resolve_target, DocumentFill};
pub use label::{infer_group_label, infer_label, infer_option_label, InferredLabel, LabelSource};
pub use metadata::extract_metadata;
pub use page::{Frame, Page};
pub use scan::{scan_document, scan_page};
pub use settings::HeuristicSettings;
pub use text::{compact_whitespace, rendered_text};
pub use types::{FieldDescriptor, FillMapping, FillOutcome, PageMetadata, ScanReport};
