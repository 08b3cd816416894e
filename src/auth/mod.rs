//! Sign-in gate.
//!
//! Signing in itself happens at an identity provider, behind a reverse proxy
//! that forwards who the user is in request headers. This module only
//! trusts those headers, remembers the identity in the session, and turns
//! everyone else back to the login page.

mod gate;
mod identity;
mod login;
mod logout;

use axum::{Router, routing::get};

use crate::AppState;

pub use gate::SignedIn;
pub use identity::Identity;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login::login_page))
        .route("/logout", get(logout::logout))
}
