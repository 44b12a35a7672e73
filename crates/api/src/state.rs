use std::sync::Arc;
use std::time::Duration;

use qualifier_core::messages::{MessageCatalog, Translator};
use qualifier_core::validation::phone::{E164PhoneValidator, PhoneValidator};

use crate::config::ServerConfig;
use crate::profile::{HttpProfileWriter, LoggingProfileWriter, ProfileWriteError, ProfileWriter};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (everything is behind `Arc`). All of it is
/// read-only; per-request form state never lives here.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Validation message table.
    pub translator: Arc<dyn Translator>,
    /// Phone number validator used by the submit hook.
    pub phone_validator: Arc<dyn PhoneValidator>,
    /// Receives validated values of end-user submissions.
    pub profile_writer: Arc<dyn ProfileWriter>,
}

impl AppState {
    /// Wire the default collaborators for `config`.
    ///
    /// Profile updates go to `PROFILE_WEBHOOK_URL` when set and are only
    /// logged otherwise.
    pub fn from_config(config: ServerConfig) -> Result<Self, ProfileWriteError> {
        let profile_writer: Arc<dyn ProfileWriter> = match &config.profile_webhook_url {
            Some(url) => Arc::new(HttpProfileWriter::new(
                url.clone(),
                Duration::from_secs(config.profile_webhook_timeout_secs),
            )?),
            None => Arc::new(LoggingProfileWriter),
        };

        Ok(Self {
            translator: Arc::new(MessageCatalog::new(config.locale)),
            phone_validator: Arc::new(E164PhoneValidator),
            profile_writer,
            config: Arc::new(config),
        })
    }
}
