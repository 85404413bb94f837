use std::collections::HashSet;

use engine_logging::engine_trace;

use crate::types::FieldDescriptor;

/// Keeps the first descriptor of every `(label, kind)` pair, then the first
/// descriptor of every id. Encounter order is preserved and the pass is
/// idempotent.
pub fn dedupe_fields(fields: impl IntoIterator<Item = FieldDescriptor>) -> Vec<FieldDescriptor> {
    let mut seen_pairs: HashSet<(String, String)> = HashSet::new();
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut kept = Vec::new();

    for field in fields {
        let pair = (field.label.clone(), field.kind.clone());
        if seen_pairs.contains(&pair) {
            engine_trace!(
                "dropping duplicate field id={} label={:?} type={}",
                field.id,
                field.label,
                field.kind
            );
            continue;
        }
        if seen_ids.contains(&field.id) {
            engine_trace!("dropping field with reused id={}", field.id);
            continue;
        }
        seen_pairs.insert(pair);
        seen_ids.insert(field.id.clone());
        kept.push(field);
    }

    kept
}
