//! API middleware.
//!
//! `audit` logs every request after the handler has produced a response.

pub mod audit;
