//! Route definitions for the messenger webhook hooks.

use axum::routing::post;
use axum::Router;

use crate::handlers::hooks;
use crate::state::AppState;

/// Hook routes mounted at `/hooks`.
///
/// ```text
/// POST   /initialize        -> initialize
/// POST   /configure         -> configure
/// POST   /submit            -> submit
/// POST   /sheet             -> sheet
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/initialize", post(hooks::initialize))
        .route("/configure", post(hooks::configure))
        .route("/submit", post(hooks::submit))
        .route("/sheet", post(hooks::sheet))
}
