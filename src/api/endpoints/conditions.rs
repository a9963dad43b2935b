//! `GET /ayush/conditions`: every condition the catalog can answer.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::models::ConditionKey;

#[derive(Serialize)]
pub struct ConditionsResponse {
    pub conditions: Vec<ConditionKey>,
    pub total: usize,
}

pub async fn list(State(ctx): State<ApiContext>) -> Json<ConditionsResponse> {
    let conditions = ctx.lookup.conditions();
    let total = conditions.len();
    Json(ConditionsResponse { conditions, total })
}
