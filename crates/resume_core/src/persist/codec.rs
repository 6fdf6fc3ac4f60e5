//! Wire codec shared by every persistence adapter.
//!
//! # Responsibility
//! - Encode a `StoreState` deterministically.
//! - Decode persisted state, dropping malformed documents one by one.
//!
//! # Invariants
//! - Encoding the result of decoding an encoded state reproduces the same
//!   bytes (`resumes` is a `BTreeMap`, absent optionals stay absent).
//! - A document without `_metadata.id` (or with an empty one) is dropped;
//!   the remaining collection still loads.
//! - The map key is not trusted: documents are re-keyed by `metadata.id`.

use crate::model::document::{ResumeDocument, ResumeId};
use crate::persist::PersistResult;
use crate::store::state::{ResumeMap, StoreState};
use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StateWireRef<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    current_resume_id: Option<&'a str>,
    page_wrap: bool,
    resumes: &'a ResumeMap,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateWire {
    #[serde(default)]
    current_resume_id: Option<String>,
    #[serde(default)]
    page_wrap: bool,
    #[serde(default)]
    resumes: BTreeMap<String, Value>,
}

/// Encodes the whole state as pretty-printed JSON.
pub fn encode_state(state: &StoreState) -> PersistResult<String> {
    let wire = StateWireRef {
        current_resume_id: state.current_resume_id(),
        page_wrap: state.page_wrap(),
        resumes: state.resumes(),
    };
    Ok(serde_json::to_string_pretty(&wire)?)
}

/// Decodes a whole-state document.
///
/// # Errors
/// - Returns `PersistError::Json` when `raw` is not a JSON object of the
///   expected top-level shape. Individual malformed documents are not errors.
pub fn decode_state(raw: &str) -> PersistResult<StoreState> {
    let wire: StateWire = serde_json::from_str(raw)?;
    Ok(assemble_state(
        wire.resumes,
        wire.current_resume_id,
        wire.page_wrap,
    ))
}

/// Encodes one document compactly (used for per-row storage).
pub fn encode_document(document: &ResumeDocument) -> PersistResult<String> {
    Ok(serde_json::to_string(document)?)
}

/// Builds a normalized state from raw persisted documents.
pub(crate) fn assemble_state(
    raw_documents: impl IntoIterator<Item = (String, Value)>,
    current_resume_id: Option<ResumeId>,
    page_wrap: bool,
) -> StoreState {
    let mut resumes = ResumeMap::new();
    for (key, raw) in raw_documents {
        let Some(document) = decode_document(&key, raw) else {
            continue;
        };
        let id = document.metadata.id.clone();
        if resumes.contains_key(id.as_str()) {
            warn!(
                "event=persist_load module=persist status=skipped reason=duplicate_id key={} id={}",
                key, id
            );
            continue;
        }
        if key != id {
            warn!(
                "event=persist_load module=persist status=rekeyed key={} id={}",
                key, id
            );
        }
        resumes.insert(id, Arc::new(document));
    }
    StoreState::new(resumes, current_resume_id, page_wrap)
}

fn decode_document(key: &str, raw: Value) -> Option<ResumeDocument> {
    match serde_json::from_value::<ResumeDocument>(raw) {
        Ok(document) if document.metadata.id.trim().is_empty() => {
            warn!(
                "event=persist_load module=persist status=skipped reason=missing_id key={}",
                key
            );
            None
        }
        Ok(document) => Some(document),
        Err(err) => {
            warn!(
                "event=persist_load module=persist status=skipped reason=malformed key={} error={}",
                key, err
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_state, encode_state};
    use serde_json::json;

    #[test]
    fn decode_drops_documents_without_metadata_id() {
        let raw = json!({
            "currentResumeId": "good",
            "pageWrap": true,
            "resumes": {
                "good": { "_metadata": { "id": "good", "name": "Good" } },
                "no-meta": { "basics": { "name": "x" } },
                "no-id": { "_metadata": { "name": "No id" } },
                "blank-id": { "_metadata": { "id": "  " } }
            }
        })
        .to_string();

        let state = decode_state(&raw).unwrap();
        assert_eq!(state.len(), 1);
        assert!(state.get("good").is_some());
        assert_eq!(state.current_resume_id(), Some("good"));
        assert!(state.page_wrap());
    }

    #[test]
    fn decode_rekeys_by_metadata_id() {
        let raw = json!({
            "resumes": { "stale-key": { "_metadata": { "id": "real", "updatedAt": 3 } } }
        })
        .to_string();

        let state = decode_state(&raw).unwrap();
        assert!(state.get("real").is_some());
        assert_eq!(state.current_resume_id(), Some("real"));
    }

    #[test]
    fn decode_rejects_non_object_payload() {
        assert!(decode_state("[1, 2, 3]").is_err());
        assert!(decode_state("not json").is_err());
    }

    #[test]
    fn encode_omits_selection_for_empty_state() {
        let state = decode_state("{}").unwrap();
        let encoded = encode_state(&state).unwrap();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value, json!({ "pageWrap": false, "resumes": {} }));
    }
}
