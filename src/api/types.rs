//! Shared types for the HTTP API layer.

use std::sync::Arc;

use crate::lookup::TreatmentLookupService;

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub lookup: Arc<TreatmentLookupService>,
}

impl ApiContext {
    pub fn new(lookup: Arc<TreatmentLookupService>) -> Self {
        Self { lookup }
    }
}
