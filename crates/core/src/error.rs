/// Errors raised when a hook context is too malformed to act on.
///
/// Field validation failures are never surfaced through this type; they are
/// rendered inline on the returned schema.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
}
