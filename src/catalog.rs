//! Treatment catalog: the immutable condition → treatments mapping.
//!
//! Built once at startup, either from the built-in data set or from a JSON
//! file, then shared read-only behind an `Arc`. Keys are normalized with the
//! same rule the lookup applies to queries.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use thiserror::Error;

use crate::models::{ConditionKey, TreatmentEntry, TreatmentRecord};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Cannot read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Catalog contains an empty condition name")]
    EmptyCondition,

    #[error("Duplicate condition after normalization: {0}")]
    DuplicateCondition(String),
}

// ═══════════════════════════════════════════
// Built-in data set
// ═══════════════════════════════════════════

const BUILTIN: &[(&str, &[(&str, &str)])] = &[
    (
        "fever",
        &[
            ("Guduchi Kashaya", "Ayurveda"),
            ("Triphala Churna", "Ayurveda"),
            ("Tulsi Tea", "Naturopathy"),
        ],
    ),
    (
        "diabetes",
        &[
            ("Jamun Seed Powder", "Ayurveda"),
            ("Fenugreek Seeds", "Ayurveda"),
            ("Yoga Asanas (Surya Namaskar)", "Yoga"),
        ],
    ),
];

/// Immutable mapping from normalized condition name to treatment record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreatmentCatalog {
    records: BTreeMap<ConditionKey, TreatmentRecord>,
}

impl TreatmentCatalog {
    /// The data set served when no catalog file is configured.
    pub fn builtin() -> Self {
        let records = BUILTIN
            .iter()
            .map(|&(condition, treatments)| {
                let record = TreatmentRecord::new(
                    treatments
                        .iter()
                        .map(|&(name, system)| TreatmentEntry::new(name, system))
                        .collect(),
                );
                (ConditionKey::normalize(condition), record)
            })
            .collect();
        Self { records }
    }

    /// Build a catalog from raw condition names, normalizing each key.
    ///
    /// Rejects empty names and names that collide once lower-cased.
    pub fn from_entries<I, K>(entries: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (K, TreatmentRecord)>,
        K: AsRef<str>,
    {
        let mut records = BTreeMap::new();
        for (raw, record) in entries {
            let key = ConditionKey::normalize(raw.as_ref());
            if key.is_empty() {
                return Err(CatalogError::EmptyCondition);
            }
            match records.entry(key) {
                Entry::Occupied(slot) => {
                    return Err(CatalogError::DuplicateCondition(slot.key().to_string()));
                }
                Entry::Vacant(slot) => {
                    slot.insert(record);
                }
            }
        }
        Ok(Self { records })
    }

    /// Parse the catalog file format: `{ "<condition>": { "treatments": [...] } }`.
    pub fn from_json_str(text: &str) -> Result<Self, CatalogError> {
        let RawCatalog(entries) = serde_json::from_str(text)?;
        Self::from_entries(entries)
    }

    /// Read and parse a catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&text)?;
        tracing::info!(
            path = %path.display(),
            conditions = catalog.len(),
            "Loaded treatment catalog"
        );
        Ok(catalog)
    }

    /// Exact lookup on an already-normalized key.
    pub fn get(&self, key: &str) -> Option<&TreatmentRecord> {
        self.records.get(key)
    }

    /// Condition names in ascending order.
    pub fn conditions(&self) -> impl Iterator<Item = &ConditionKey> {
        self.records.keys()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Catalog file contents with every key kept, so exact duplicates surface
/// as errors instead of silently overwriting each other.
struct RawCatalog(Vec<(String, TreatmentRecord)>);

impl<'de> Deserialize<'de> for RawCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RawVisitor;

        impl<'de> Visitor<'de> for RawVisitor {
            type Value = RawCatalog;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of condition names to treatment records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, TreatmentRecord>()? {
                    entries.push(entry);
                }
                Ok(RawCatalog(entries))
            }
        }

        deserializer.deserialize_map(RawVisitor)
    }
}

// ═══════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn names(record: &TreatmentRecord) -> Vec<(&str, &str)> {
        record
            .treatments
            .iter()
            .map(|t| (t.name.as_str(), t.system.as_str()))
            .collect()
    }

    #[test]
    fn builtin_has_fever_and_diabetes() {
        let catalog = TreatmentCatalog::builtin();
        assert_eq!(catalog.len(), 2);
        let keys: Vec<&str> = catalog.conditions().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["diabetes", "fever"]);
    }

    #[test]
    fn builtin_fever_order_preserved() {
        let catalog = TreatmentCatalog::builtin();
        let fever = catalog.get("fever").unwrap();
        assert_eq!(
            names(fever),
            vec![
                ("Guduchi Kashaya", "Ayurveda"),
                ("Triphala Churna", "Ayurveda"),
                ("Tulsi Tea", "Naturopathy"),
            ]
        );
    }

    #[test]
    fn get_is_exact_on_normalized_keys() {
        let catalog = TreatmentCatalog::builtin();
        assert!(catalog.get("Fever").is_none());
        assert!(catalog.get("").is_none());
    }

    #[test]
    fn from_entries_normalizes_keys() {
        let record = TreatmentRecord::new(vec![TreatmentEntry::new("Ginger Tea", "Naturopathy")]);
        let catalog = TreatmentCatalog::from_entries([("Cold", record.clone())]).unwrap();
        assert_eq!(catalog.get("cold"), Some(&record));
    }

    #[test]
    fn from_entries_rejects_empty_name() {
        let record = TreatmentRecord::new(vec![]);
        let err = TreatmentCatalog::from_entries([("", record)]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyCondition));
    }

    #[test]
    fn from_entries_rejects_case_duplicates() {
        let record = TreatmentRecord::new(vec![]);
        let err = TreatmentCatalog::from_entries([("Fever", record.clone()), ("FEVER", record)])
            .unwrap_err();
        match err {
            CatalogError::DuplicateCondition(key) => assert_eq!(key, "fever"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn json_keeps_exact_duplicates_visible() {
        let text = r#"{
            "cough": { "treatments": [] },
            "cough": { "treatments": [] }
        }"#;
        let err = TreatmentCatalog::from_json_str(text).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateCondition(_)));
    }

    #[test]
    fn json_parses_records_in_order() {
        let text = r#"{
            "Insomnia": { "treatments": [
                { "name": "Ashwagandha", "system": "Ayurveda" },
                { "name": "Shavasana", "system": "Yoga" }
            ] }
        }"#;
        let catalog = TreatmentCatalog::from_json_str(text).unwrap();
        let record = catalog.get("insomnia").unwrap();
        assert_eq!(
            names(record),
            vec![("Ashwagandha", "Ayurveda"), ("Shavasana", "Yoga")]
        );
    }

    #[test]
    fn json_rejects_wrong_shape() {
        let err = TreatmentCatalog::from_json_str(r#"["fever"]"#).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));

        let err = TreatmentCatalog::from_json_str(r#"{"fever": {"remedies": []}}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "Acidity": {{ "treatments": [{{ "name": "Amla Juice", "system": "Ayurveda" }}] }} }}"#
        )
        .unwrap();

        let catalog = TreatmentCatalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("acidity").is_some());
    }

    #[test]
    fn load_reports_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.json");
        let err = TreatmentCatalog::load(&missing).unwrap_err();
        match err {
            CatalogError::Io { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }
}
