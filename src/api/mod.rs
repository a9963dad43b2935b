//! HTTP API for treatment lookups.
//!
//! Routes live under `/ayush/` (lookup data) and `/api/` (service health).
//! Every route passes through the same stack: Trace → CORS → Access log → Handler.
//!
//! The router is composable: `ayush_api_router()` returns a `Router`
//! that can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::ayush_api_router;
pub use server::{ApiServer, ApiSession, ServerError};
pub use types::ApiContext;
