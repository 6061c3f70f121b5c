//! Route definitions for authentication.
//!
//! Mounted at `/auth` by `api_routes()`.
//!
//! ```text
//! POST   /register    register
//! POST   /login       login
//! ```

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Authentication routes — mounted at `/auth`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
}
