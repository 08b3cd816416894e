mod chat;
mod manage;
mod msg;
mod new;
mod workspace;

use std::{collections::HashMap, sync::Arc};

use axum::{
    Router,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    AppState,
    conversation::{Outcome, TruncatePolicy},
};

pub use workspace::{Chat, DEFAULT_CHAT_NAME, Workspace};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(chat::index))
        .route("/c/new", post(new::new_chat))
        .route("/c/{chat}", get(chat::chat))
        .route("/c/{chat}/transcript", get(chat::transcript))
        .route("/c/{chat}/send", post(msg::send))
        .route("/c/{chat}/m/{msg}/edit", post(msg::start_edit))
        .route("/c/{chat}/m/{msg}/hover", post(msg::hover))
        .route("/c/{chat}/confirm", post(msg::confirm))
        .route("/c/{chat}/cancel", post(msg::cancel))
        .route("/c/{chat}/rename", post(manage::rename))
        .route("/c/{chat}/delete", post(manage::delete))
        .route("/c/{chat}/menu", post(manage::toggle_menu))
        .route("/sidebar/toggle", post(manage::toggle_sidebar))
        .route("/menu/user", post(manage::toggle_user_menu))
}

/// Every user's workspace, keyed by user id. Created on first use.
#[derive(Clone, Default)]
pub struct Workspaces(Arc<Mutex<HashMap<String, Workspace>>>);

impl Workspaces {
    /// Runs `f` on the user's workspace while holding the lock, so each
    /// request's mutation finishes before the next one starts.
    pub async fn with<R>(
        &self,
        user_id: &str,
        policy: TruncatePolicy,
        f: impl FnOnce(&mut Workspace) -> R,
    ) -> R {
        let mut workspaces = self.0.lock().await;
        let workspace = workspaces
            .entry(user_id.to_owned())
            .or_insert_with(|| Workspace::new(policy));
        f(workspace)
    }
}

pub(crate) fn back_to(chat: Uuid) -> Response {
    Redirect::to(&format!("/c/{chat}")).into_response()
}

pub(crate) fn log_outcome(user_id: &str, chat: Uuid, action: &'static str, outcome: Outcome) {
    match outcome {
        Outcome::Applied => tracing::debug!(user_id, %chat, action, "applied"),
        Outcome::Unchanged => tracing::debug!(user_id, %chat, action, "nothing to change"),
        Outcome::Rejected(reason) => tracing::debug!(user_id, %chat, action, %reason, "rejected"),
    }
}
