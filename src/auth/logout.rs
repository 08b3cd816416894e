use std::sync::Arc;

use axum::{debug_handler, extract::State, response::Redirect};
use tower_sessions::Session;

use crate::{AppResult, Config, session::IDENTITY};

#[debug_handler(state = crate::AppState)]
pub(crate) async fn logout(
    State(config): State<Arc<Config>>,
    session: Session,
) -> AppResult<Redirect> {
    if let Some(identity) = session.get::<super::Identity>(IDENTITY).await? {
        tracing::info!(user_id = %identity.user_id, "bye");
    }
    session.clear().await;
    Ok(Redirect::to(&config.logout_url))
}
