use std::sync::Arc;

use axum::{debug_handler, extract::State, response::Response};

use crate::{AppResult, Config, auth::SignedIn};

use super::Workspaces;

#[debug_handler(state = crate::AppState)]
pub(crate) async fn new_chat(
    SignedIn(identity): SignedIn,
    State(config): State<Arc<Config>>,
    State(workspaces): State<Workspaces>,
) -> AppResult<Response> {
    let chat = workspaces
        .with(&identity.user_id, config.truncate, |workspace| workspace.new_chat(""))
        .await;

    tracing::info!(user_id = %identity.user_id, %chat, "new chat");
    Ok(super::back_to(chat))
}
