//! Route definitions for mobile verification.
//!
//! Mounted at `/verify/mobile` by `api_routes()`.
//!
//! ```text
//! POST   /send       send_code
//! POST   /confirm    confirm
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::verification;
use crate::state::AppState;

/// Mobile-verification routes — mounted at `/verify/mobile`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/send", post(verification::send_code))
        .route("/confirm", post(verification::confirm))
}
