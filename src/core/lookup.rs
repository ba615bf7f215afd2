//! Product lookup: resolve a typed code against the product map and drive
//! a linked selection.

use crate::errors::AppResult;
use crate::utils::normalize;
use serde::{Deserialize, Serialize};

/// One entry of the product map, the same shape the web UI embeds as a
/// JSON blob: `[{"id": 1, "nom": "...", "reference": "...", "barcode": "..."}]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: i64,
    #[serde(default)]
    pub nom: String,
    pub reference: String,
    pub barcode: String,
}

/// Read-only product map, parsed once. Map order defines the tie-break:
/// the first matching entry wins.
#[derive(Debug, Clone, Default)]
pub struct ProductMap {
    entries: Vec<ProductRef>,
}

impl ProductMap {
    pub fn new(entries: Vec<ProductRef>) -> Self {
        Self { entries }
    }

    /// Parse the embedded JSON array.
    pub fn from_json(json: &str) -> AppResult<Self> {
        let entries: Vec<ProductRef> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ProductRef] {
        &self.entries
    }

    /// First entry whose reference or barcode equals the normalized input
    /// (case-insensitive exact match).
    pub fn resolve(&self, input: &str) -> Option<&ProductRef> {
        let input = normalize(input);
        if input.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|p| normalize(&p.reference) == input || normalize(&p.barcode) == input)
    }
}

/// Linked selection control. A successful resolve stores the product id and
/// emits exactly one change notification; a failed resolve changes nothing.
#[derive(Debug, Default)]
pub struct Selection {
    value: Option<i64>,
    changes: usize,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> Option<i64> {
        self.value
    }

    /// Number of change notifications emitted so far.
    pub fn change_count(&self) -> usize {
        self.changes
    }

    /// One trigger (button click, Enter, change event): resolve the input
    /// and, if found, update the selection and notify once.
    pub fn apply(&mut self, map: &ProductMap, input: &str) -> Option<i64> {
        let found = map.resolve(input)?;
        self.value = Some(found.id);
        self.changes += 1;
        Some(found.id)
    }
}
