//! Qualifier form engine.
//!
//! Field catalogue, declarative schema nodes, the validation engine, the
//! per-request session record, the configure-phase template designer and the
//! webhook hook dispatcher. Everything here is synchronous pure logic; the
//! HTTP adapter lives in `qualifier-api`.

pub mod catalogue;
pub mod designer;
pub mod error;
pub mod hooks;
pub mod messages;
pub mod record;
pub mod schema;
pub mod types;
pub mod validation;
