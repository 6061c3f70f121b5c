pub mod admin_review;
pub mod auth;
pub mod health;
pub mod host_profile;
pub mod verification;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
///
/// /profiles/host                       get or create own profile
/// /profiles/host/status                workflow progress summary
/// /profiles/host/business_profile      submit step 1
/// /profiles/host/identity_verification submit step 2
/// /profiles/host/contact_details       submit step 3
/// /profiles/host/submit_for_review     complete step 4, move to submitted
///
/// /verify/mobile/send                  send verification code
/// /verify/mobile/confirm               confirm verification code
///
/// /admin/reviews                       list reviewable profiles
/// /admin/reviews/{id}                  get profile + history
/// /admin/reviews/{id}/review           apply a review decision
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/profiles/host", host_profile::router())
        .nest("/verify/mobile", verification::router())
        .nest("/admin/reviews", admin_review::router())
}
