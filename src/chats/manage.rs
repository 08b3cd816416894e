use std::sync::Arc;

use axum::{
    Form, debug_handler,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{AppResult, Config, auth::SignedIn, conversation::Outcome, res, view::ViewAction};

use super::{Workspaces, back_to, log_outcome};

#[derive(Debug, Deserialize)]
pub(crate) struct RenameForm {
    name: String,
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn rename(
    SignedIn(identity): SignedIn,
    State(config): State<Arc<Config>>,
    State(workspaces): State<Workspaces>,
    Path(chat): Path<Uuid>,
    Form(RenameForm { name }): Form<RenameForm>,
) -> AppResult<Response> {
    let outcome = workspaces
        .with(&identity.user_id, config.truncate, |workspace| workspace.rename(chat, &name))
        .await;

    log_outcome(&identity.user_id, chat, "rename", outcome);
    Ok(back_to(chat))
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn delete(
    SignedIn(identity): SignedIn,
    State(config): State<Arc<Config>>,
    State(workspaces): State<Workspaces>,
    Path(chat): Path<Uuid>,
) -> AppResult<Response> {
    let outcome = workspaces
        .with(&identity.user_id, config.truncate, |workspace| workspace.delete(chat))
        .await;

    if outcome != Outcome::Applied {
        return res::sorry("chat");
    }
    tracing::info!(user_id = %identity.user_id, %chat, "chat deleted");
    Ok(Redirect::to("/").into_response())
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn toggle_menu(
    SignedIn(identity): SignedIn,
    State(config): State<Arc<Config>>,
    State(workspaces): State<Workspaces>,
    Path(chat): Path<Uuid>,
) -> AppResult<Response> {
    workspaces
        .with(&identity.user_id, config.truncate, |workspace| {
            workspace.dispatch(ViewAction::ToggleChatMenu(chat))
        })
        .await;

    Ok(back_to(chat))
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn toggle_sidebar(
    SignedIn(identity): SignedIn,
    State(config): State<Arc<Config>>,
    State(workspaces): State<Workspaces>,
) -> AppResult<Response> {
    workspaces
        .with(&identity.user_id, config.truncate, |workspace| {
            workspace.dispatch(ViewAction::ToggleSidebar)
        })
        .await;

    Ok(Redirect::to("/").into_response())
}

#[debug_handler(state = crate::AppState)]
pub(crate) async fn toggle_user_menu(
    SignedIn(identity): SignedIn,
    State(config): State<Arc<Config>>,
    State(workspaces): State<Workspaces>,
) -> AppResult<Response> {
    workspaces
        .with(&identity.user_id, config.truncate, |workspace| {
            workspace.dispatch(ViewAction::ToggleUserMenu)
        })
        .await;

    Ok(Redirect::to("/").into_response())
}
