pub mod treatment;

pub use treatment::{ConditionKey, TreatmentEntry, TreatmentRecord};
