//! Request handlers.
//!
//! Handlers deserialize the hook request, delegate to `qualifier_core::hooks`
//! and map errors via [`AppError`](crate::error::AppError).

pub mod hooks;
