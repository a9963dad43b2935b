//! Treatment search endpoint.
//!
//! `GET /ayush/search?q=<condition>` answers `200` with the matching
//! `TreatmentRecord`, or `200 null` when nothing matches. A missing or
//! unparseable `q` is searched as the empty string.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::types::ApiContext;
use crate::lookup::LookupError;
use crate::models::TreatmentRecord;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

impl SearchQuery {
    fn into_term(self) -> String {
        self.q.unwrap_or_default()
    }
}

/// `GET /ayush/search`: case-insensitive condition lookup.
pub async fn search(
    State(ctx): State<ApiContext>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Json<Option<TreatmentRecord>> {
    let term = match query {
        Ok(Query(query)) => query.into_term(),
        Err(rejection) => {
            tracing::debug!(%rejection, "Unusable search query, treating as empty");
            String::new()
        }
    };

    match ctx.lookup.search(&term) {
        Ok(record) => Json(Some(record.clone())),
        Err(LookupError::NotFound { query }) => {
            tracing::debug!(query, "No treatments for condition");
            Json(None)
        }
    }
}
