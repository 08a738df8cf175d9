//! Models serialized as JSON merge patch.

use std::collections::BTreeSet;

use javagen_codemodel::{CodeModel, Operation, Usage};

const MERGE_PATCH_MEDIA_TYPE: &str = "application/merge-patch+json";

/// Whether `op` sends its body as `application/merge-patch+json`.
pub fn is_merge_patch_request(op: &Operation) -> bool {
    op.sends_media_type(MERGE_PATCH_MEDIA_TYPE)
}

/// Names of every object taking part in JSON merge patch.
///
/// Starts from objects used with `json-merge-patch` or sent as a merge-patch
/// request body, and closes over their ancestors, their descendants and the
/// objects their properties reference.
pub fn collect(code_model: &CodeModel) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let mut pending: Vec<&str> = code_model
        .schemas
        .objects
        .iter()
        .filter(|o| o.has_usage(Usage::JsonMergePatch))
        .map(|o| o.name.as_str())
        .collect();
    pending.extend(
        code_model
            .operations()
            .filter(|(_, op)| is_merge_patch_request(op))
            .filter_map(|(_, op)| op.body_parameter()?.schema.as_named()),
    );

    while let Some(name) = pending.pop() {
        let Some(object) = code_model.object(name) else {
            continue;
        };
        if !found.insert(object.name.clone()) {
            continue;
        }

        pending.extend(code_model.ancestors_of(name).iter().map(|o| o.name.as_str()));
        pending.extend(code_model.descendants_of(name).iter().map(|o| o.name.as_str()));
        for ty in object.field_types() {
            pending.extend(ty.named_references());
        }
    }

    found
}
