//! Handlers for the messenger webhook hooks.
//!
//! Each hook receives `{ "kind": .., "ctx": {..} }` and answers with the
//! `{ kind, definitions, results }` envelope built by `qualifier_core`.
//! Bodies that are not valid JSON are answered with a 400 `BAD_REQUEST`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use qualifier_core::hooks::{
    configure_hook, initialize_hook, sheet_hook, submit_hook, HookRequest, HookResponse,
    ProfileUpdate,
};
use qualifier_core::validation::rules::ValidationContext;
use serde_json::Value;

use crate::error::AppResult;
use crate::state::AppState;

/// POST /api/v1/hooks/initialize
pub async fn initialize(
    req: Result<Json<HookRequest>, JsonRejection>,
) -> AppResult<Json<HookResponse>> {
    let Json(request) = req?;
    let response = initialize_hook(request.kind, &request.ctx);
    tracing::debug!(items = response.definitions.len(), "Initialize hook rendered");
    Ok(Json(response))
}

/// POST /api/v1/hooks/configure
///
/// Drives the template designer. Fails with 400 when `add-field` arrives
/// without the current rows.
pub async fn configure(
    req: Result<Json<HookRequest>, JsonRejection>,
) -> AppResult<Json<HookResponse>> {
    let Json(request) = req?;
    let trigger = request
        .ctx
        .field
        .as_ref()
        .and_then(|f| f.id.clone())
        .unwrap_or_default();

    let response = configure_hook(request.kind, &request.ctx)?;
    tracing::debug!(
        trigger = %trigger,
        confirmed = response.is_confirmed(),
        "Configure hook rendered"
    );
    Ok(Json(response))
}

/// POST /api/v1/hooks/submit
///
/// Validates an end user's entries. A valid submission from an `app_user`
/// is forwarded to the profile writer before the response is returned; a
/// failed write is logged and does not change the response.
pub async fn submit(
    State(state): State<AppState>,
    req: Result<Json<HookRequest>, JsonRejection>,
) -> AppResult<Json<HookResponse>> {
    let Json(request) = req?;
    let validation = ValidationContext::new(
        state.phone_validator.as_ref(),
        state.translator.as_ref(),
    );
    let outcome = submit_hook(request.kind, &request.ctx, &validation);

    if outcome.errors.is_empty() {
        tracing::info!(
            fields = outcome.response.definitions.len(),
            "Qualifier submission accepted"
        );
    } else {
        let fields: Vec<&str> = outcome.errors.iter().map(|e| e.field.as_str()).collect();
        tracing::info!(?fields, "Qualifier submission rejected");
    }

    if let Some(update) = &outcome.profile_update {
        apply_profile_update(&state, update).await;
    }

    Ok(Json(outcome.response))
}

/// POST /api/v1/hooks/sheet
pub async fn sheet(req: Result<Json<Value>, JsonRejection>) -> AppResult<Json<Vec<Value>>> {
    let Json(params) = req?;
    Ok(Json(sheet_hook(&params)))
}

async fn apply_profile_update(state: &AppState, update: &ProfileUpdate) {
    if let Err(e) = state
        .profile_writer
        .update_properties(&update.user, &update.properties)
        .await
    {
        tracing::warn!(
            user_id = %update.user.id,
            error = %e,
            "Failed to write qualifier values to user profile"
        );
    }
}
