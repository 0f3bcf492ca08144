//! Fill-gap merge with provenance union
//!
//! The one merge rule of the whole engine, applied both by the mapping
//! stage (in memory) and by the persistence layer (against stored rows):
//!
//! - a scalar field adopts the incoming value iff the existing value is
//!   null or an empty string; a filled field is never rewritten;
//! - nested objects merge per leaf sub-field, not atomically;
//! - array fields are replaced wholesale by a non-empty incoming array only
//!   when the existing array is empty; items are never unioned;
//! - provenance records, per field path, only the source documents that set
//!   the value currently stored ("which document told us this fact", not
//!   "which documents tried").
//!
//! The rule is deliberately not commutative: processing order is the only
//! tie-break between disagreeing documents.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::error::EngineError;

/// Field path → ordered list of source documents that set the stored value
pub type Provenance = BTreeMap<String, Vec<String>>;

/// Entities that carry a provenance map
pub trait Provenanced {
    fn provenance_mut(&mut self) -> &mut Provenance;
    fn provenance(&self) -> &Provenance;
}

/// Key under which entities serialize their provenance map. Excluded from
/// the field-level merge so attribution never competes with data.
const PROVENANCE_KEY: &str = "provenance";

/// True when a JSON value counts as a gap the merge may fill.
fn is_gap(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::String(s) => s.trim().is_empty(),
        JsonValue::Array(items) => items.is_empty(),
        JsonValue::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Apply the fill-gap rule to `existing`, returning the paths that were
/// filled (dotted, e.g. `"endereco.cidade"`).
///
/// `existing` and `incoming` must both be JSON objects; anything else is
/// left untouched.
pub fn fill_gap(existing: &mut JsonValue, incoming: &JsonValue) -> Vec<String> {
    let mut filled = Vec::new();
    fill_gap_inner(existing, incoming, "", &mut filled);
    filled
}

fn fill_gap_inner(
    existing: &mut JsonValue,
    incoming: &JsonValue,
    path: &str,
    filled: &mut Vec<String>,
) {
    let (JsonValue::Object(existing_map), JsonValue::Object(incoming_map)) = (existing, incoming)
    else {
        return;
    };

    for (key, incoming_value) in incoming_map {
        if key == PROVENANCE_KEY || is_gap(incoming_value) {
            continue;
        }
        let child_path = if path.is_empty() {
            key.clone()
        } else {
            format!("{path}.{key}")
        };

        match incoming_value {
            JsonValue::Object(_) => {
                // Composite fields merge per leaf, never atomically.
                let slot = existing_map
                    .entry(key.clone())
                    .or_insert_with(|| JsonValue::Object(Map::new()));
                if !slot.is_object() && is_gap(slot) {
                    *slot = JsonValue::Object(Map::new());
                }
                fill_gap_inner(slot, incoming_value, &child_path, filled);
            }
            JsonValue::Array(_) => {
                // Wholesale replace, only into an empty slot.
                let slot = existing_map.entry(key.clone()).or_insert(JsonValue::Null);
                if is_gap(slot) {
                    *slot = incoming_value.clone();
                    filled.push(child_path);
                }
            }
            _ => {
                let slot = existing_map.entry(key.clone()).or_insert(JsonValue::Null);
                if is_gap(slot) {
                    *slot = incoming_value.clone();
                    filled.push(child_path);
                }
            }
        }
    }
}

/// Record `sources` as the attribution for each filled path.
///
/// Provenance is monotonic: existing entries are extended, never replaced
/// or shrunk, and a source is listed at most once per path.
pub fn attribute(provenance: &mut Provenance, filled: &[String], sources: &[String]) {
    for path in filled {
        let entry = provenance.entry(path.clone()).or_default();
        for source in sources {
            if !entry.contains(source) {
                entry.push(source.clone());
            }
        }
    }
}

/// Typed fill-gap merge between two entities of the same shape.
///
/// Serializes both sides, merges at the JSON level, attributes every filled
/// path to `source`, and writes the result back into `existing`. Returns
/// the filled paths so callers can count fields and audit the run.
pub fn merge_entity<T>(existing: &mut T, incoming: &T, source: &str) -> Result<Vec<String>, EngineError>
where
    T: Serialize + DeserializeOwned + Provenanced,
{
    let mut existing_json = serde_json::to_value(&*existing)?;
    let incoming_json = serde_json::to_value(incoming)?;

    let filled = fill_gap(&mut existing_json, &incoming_json);

    let mut provenance = std::mem::take(existing.provenance_mut());
    attribute(&mut provenance, &filled, std::slice::from_ref(&source.to_string()));

    let mut merged: T = serde_json::from_value(existing_json)?;
    *merged.provenance_mut() = provenance;
    *existing = merged;
    Ok(filled)
}
