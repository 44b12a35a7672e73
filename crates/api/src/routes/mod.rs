pub mod health;
pub mod hooks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /hooks/initialize                                render configured fields (POST)
/// /hooks/configure                                 template designer (POST)
/// /hooks/submit                                    validate end-user entries (POST)
/// /hooks/sheet                                     sheet submissions (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/hooks", hooks::router())
}
