use std::sync::Arc;

use axum::{
    Json, debug_handler,
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{
    AppResult, Config, auth::SignedIn, conversation::Message, res, session::RETURN_URL, view::render,
};

use super::Workspaces;

#[derive(Debug, Deserialize)]
pub(crate) struct ChatQuery {
    #[serde(default)]
    q: String,
}

/// Sends the user back where the login detour started, or to their active
/// chat, opening a first one if they have none.
#[debug_handler(state = crate::AppState)]
pub(crate) async fn index(
    SignedIn(identity): SignedIn,
    State(config): State<Arc<Config>>,
    State(workspaces): State<Workspaces>,
    session: Session,
) -> AppResult<Response> {
    if let Some(return_url) = session.remove::<String>(RETURN_URL).await? {
        if return_url.starts_with('/') && !return_url.starts_with("//") && return_url != "/" {
            return Ok(Redirect::to(&return_url).into_response());
        }
    }

    let chat = workspaces
        .with(&identity.user_id, config.truncate, |workspace| match workspace.active() {
            Some(chat) => chat.id,
            None => workspace.new_chat(""),
        })
        .await;

    Ok(super::back_to(chat))
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn chat(
    SignedIn(identity): SignedIn,
    State(config): State<Arc<Config>>,
    State(workspaces): State<Workspaces>,
    Path(chat): Path<Uuid>,
    Query(ChatQuery { q }): Query<ChatQuery>,
) -> AppResult<Response> {
    let page = workspaces
        .with(&identity.user_id, config.truncate, |workspace| {
            let _ = workspace.select(chat);
            let open = workspace.chat(chat)?;
            Some(render::chat_page(workspace, open, &identity, &q, config.edit_confirmation))
        })
        .await;

    match page {
        Some(page) => Ok(Html(page).into_response()),
        None => res::sorry("chat"),
    }
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn transcript(
    SignedIn(identity): SignedIn,
    State(config): State<Arc<Config>>,
    State(workspaces): State<Workspaces>,
    Path(chat): Path<Uuid>,
) -> AppResult<Response> {
    let messages: Option<Vec<Message>> = workspaces
        .with(&identity.user_id, config.truncate, |workspace| {
            workspace.chat(chat).map(|c| c.store.transcript().to_vec())
        })
        .await;

    match messages {
        Some(messages) => Ok(Json(messages).into_response()),
        None => res::sorry("chat"),
    }
}
