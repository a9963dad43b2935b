//! API endpoint handlers.
//!
//! `search` and `conditions` serve the treatment catalog; `health` is the
//! liveness probe.

pub mod conditions;
pub mod health;
pub mod search;
