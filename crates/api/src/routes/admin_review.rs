//! Route definitions for the admin review queue.
//!
//! Mounted at `/admin/reviews` by `api_routes()`.
//!
//! ```text
//! GET    /               list_reviewable (?limit, offset)
//! GET    /{id}           get_review
//! POST   /{id}/review    review
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin_review;
use crate::state::AppState;

/// Review-queue routes — mounted at `/admin/reviews`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(admin_review::list_reviewable))
        .route("/{id}", get(admin_review::get_review))
        .route("/{id}/review", post(admin_review::review))
}
