//! JSON output: the same envelope, serialized with `serde_json` using the
//! `camelCase` renames already declared on `model`'s structs.

use crate::model::OutputEnvelope;

#[must_use]
pub fn render(envelope: &OutputEnvelope) -> String {
    serde_json::to_string_pretty(envelope).unwrap_or_else(|err| format!(r#"{{"error":"failed to serialize output: {err}"}}"#))
}
