//! Condition lookup over an injected, immutable `TreatmentCatalog`.
//!
//! Queries are lower-cased and matched exactly. There is no trimming and no
//! fuzzy matching; anything that does not hit a key is `NotFound`.

use std::sync::Arc;

use thiserror::Error;

use crate::catalog::TreatmentCatalog;
use crate::models::{ConditionKey, TreatmentRecord};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("No treatments for condition {query:?}")]
    NotFound { query: String },
}

/// Answers condition-name queries. Cheap to clone; the catalog is shared.
#[derive(Debug, Clone)]
pub struct TreatmentLookupService {
    catalog: Arc<TreatmentCatalog>,
}

impl TreatmentLookupService {
    pub fn new(catalog: Arc<TreatmentCatalog>) -> Self {
        Self { catalog }
    }

    /// Normalize `query` and return the matching record.
    pub fn search(&self, query: &str) -> Result<&TreatmentRecord, LookupError> {
        let key = ConditionKey::normalize(query);
        self.catalog
            .get(key.as_str())
            .ok_or_else(|| LookupError::NotFound {
                query: query.to_string(),
            })
    }

    pub fn conditions(&self) -> Vec<ConditionKey> {
        self.catalog.conditions().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}
