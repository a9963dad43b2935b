use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single remedy or practice, tagged with the tradition it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentEntry {
    pub name: String,
    /// Open-ended: "Ayurveda", "Naturopathy", "Yoga", ...
    pub system: String,
}

impl TreatmentEntry {
    pub fn new(name: impl Into<String>, system: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system: system.into(),
        }
    }
}

/// Treatments suggested for one condition, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentRecord {
    pub treatments: Vec<TreatmentEntry>,
}

impl TreatmentRecord {
    pub fn new(treatments: Vec<TreatmentEntry>) -> Self {
        Self { treatments }
    }
}

/// Case-insensitive condition name, held in normalized (lower-cased) form.
///
/// Normalization lower-cases the whole string and nothing else: surrounding
/// whitespace is kept, so `" fever"` and `"fever"` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ConditionKey(String);

impl ConditionKey {
    pub fn normalize(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ConditionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ConditionKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}
