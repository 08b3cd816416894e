use std::sync::Arc;

use axum::{
    Form, debug_handler,
    extract::{Path, State},
    response::Response,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    AppResult, Config,
    auth::SignedIn,
    conversation::{MessageId, Outcome},
    res,
    view::ConfirmTrigger,
};

use super::{Workspaces, back_to, log_outcome};

#[derive(Debug, Deserialize)]
pub(crate) struct SendForm {
    text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConfirmForm {
    draft: String,
    /// Absent when the form was submitted without the confirm button.
    #[serde(default)]
    trigger: ConfirmTrigger,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn send(
    SignedIn(identity): SignedIn,
    State(config): State<Arc<Config>>,
    State(workspaces): State<Workspaces>,
    Path(chat): Path<Uuid>,
    Form(SendForm { text }): Form<SendForm>,
) -> AppResult<Response> {
    let outcome = workspaces
        .with(&identity.user_id, config.truncate, |workspace| {
            workspace.chat(chat)?;
            Some(workspace.send(chat, &text))
        })
        .await;

    let Some(outcome) = outcome else {
        return res::sorry("chat");
    };
    log_outcome(&identity.user_id, chat, "send", outcome);
    Ok(back_to(chat))
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn start_edit(
    SignedIn(identity): SignedIn,
    State(config): State<Arc<Config>>,
    State(workspaces): State<Workspaces>,
    Path((chat, msg)): Path<(Uuid, MessageId)>,
) -> AppResult<Response> {
    let outcome = workspaces
        .with(&identity.user_id, config.truncate, |workspace| {
            workspace.start_edit(chat, msg)
        })
        .await;

    log_outcome(&identity.user_id, chat, "start edit", outcome);
    Ok(back_to(chat))
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn hover(
    SignedIn(identity): SignedIn,
    State(config): State<Arc<Config>>,
    State(workspaces): State<Workspaces>,
    Path((chat, msg)): Path<(Uuid, MessageId)>,
) -> AppResult<Response> {
    let outcome = workspaces
        .with(&identity.user_id, config.truncate, |workspace| workspace.hover(chat, msg))
        .await;

    log_outcome(&identity.user_id, chat, "hover", outcome);
    Ok(back_to(chat))
}

/// Submits the editor. Whether this confirms the edit or only keeps the
/// draft depends on the trigger and the configured confirmation.
#[debug_handler(state = crate::AppState)]
pub(crate) async fn confirm(
    SignedIn(identity): SignedIn,
    State(config): State<Arc<Config>>,
    State(workspaces): State<Workspaces>,
    Path(chat): Path<Uuid>,
    Form(ConfirmForm { draft, trigger }): Form<ConfirmForm>,
) -> AppResult<Response> {
    let outcome = workspaces
        .with(&identity.user_id, config.truncate, |workspace| {
            workspace.submit_edit(chat, draft, trigger, config.edit_confirmation)
        })
        .await;

    match outcome {
        Some(Outcome::Applied) => {
            tracing::info!(user_id = %identity.user_id, %chat, "edit truncated transcript");
        }
        Some(outcome) => log_outcome(&identity.user_id, chat, "confirm edit", outcome),
        None => tracing::debug!(user_id = %identity.user_id, %chat, ?trigger, "draft kept"),
    }
    Ok(back_to(chat))
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn cancel(
    SignedIn(identity): SignedIn,
    State(config): State<Arc<Config>>,
    State(workspaces): State<Workspaces>,
    Path(chat): Path<Uuid>,
) -> AppResult<Response> {
    workspaces
        .with(&identity.user_id, config.truncate, |workspace| workspace.cancel_edit())
        .await;

    Ok(back_to(chat))
}
