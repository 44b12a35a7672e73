//! Field validation engine.
//!
//! Provides error types, the phone validator seam, and the two validation
//! passes (required fields, catalogue types). Pure logic, no I/O.

pub mod evaluator;
pub mod phone;
pub mod rules;
