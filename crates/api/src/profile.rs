//! Profile writers: where validated end-user submissions go.
//!
//! The submit hook hands back a [`ProfileUpdate`](qualifier_core::hooks::ProfileUpdate)
//! instead of writing anything itself. The handler passes it to the
//! [`ProfileWriter`] held in [`AppState`](crate::state::AppState).
//!
//! A failed write is logged and never changes the hook response. There is no
//! retry: the messenger re-sends the form on the next submit anyway.

use std::time::Duration;

use async_trait::async_trait;
use qualifier_core::hooks::UserRef;
use qualifier_core::types::FieldValues;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for profile write failures.
#[derive(Debug, thiserror::Error)]
pub enum ProfileWriteError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Profile endpoint returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Applies validated properties to an end user's profile.
#[async_trait]
pub trait ProfileWriter: Send + Sync {
    async fn update_properties(
        &self,
        user: &UserRef,
        properties: &FieldValues,
    ) -> Result<(), ProfileWriteError>;
}

// ---------------------------------------------------------------------------
// LoggingProfileWriter
// ---------------------------------------------------------------------------

/// Writer used when no profile endpoint is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingProfileWriter;

#[async_trait]
impl ProfileWriter for LoggingProfileWriter {
    async fn update_properties(
        &self,
        user: &UserRef,
        properties: &FieldValues,
    ) -> Result<(), ProfileWriteError> {
        tracing::info!(
            user_id = %user.id,
            fields = ?properties.keys().collect::<Vec<_>>(),
            "Profile update (no endpoint configured)"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// HttpProfileWriter
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct ProfilePayload<'a> {
    user: &'a UserRef,
    properties: &'a FieldValues,
}

/// Posts `{ "user": .., "properties": {..} }` to a fixed endpoint.
pub struct HttpProfileWriter {
    client: reqwest::Client,
    url: String,
}

impl HttpProfileWriter {
    /// Build a writer with its own HTTP client.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ProfileWriteError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ProfileWriter for HttpProfileWriter {
    async fn update_properties(
        &self,
        user: &UserRef,
        properties: &FieldValues,
    ) -> Result<(), ProfileWriteError> {
        let payload = ProfilePayload { user, properties };
        let response = self.client.post(&self.url).json(&payload).send().await?;
        if !response.status().is_success() {
            return Err(ProfileWriteError::HttpStatus(response.status().as_u16()));
        }
        tracing::debug!(url = %self.url, user_id = %user.id, "Profile updated");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
