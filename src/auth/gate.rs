use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, Method, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::{
    AppResult, Config,
    session::{IDENTITY, RETURN_URL},
};

use super::Identity;

/// Extracts the signed-in user, or redirects to `/login`.
#[derive(Debug, Clone)]
pub struct SignedIn(pub Identity);

impl<S> FromRequestParts<S> for SignedIn
where
    Arc<Config>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = Arc::<Config>::from_ref(state);
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(IntoResponse::into_response)?;

        match resolve(&session, &parts.headers, &config.identity_header).await {
            Ok(Some(identity)) => Ok(SignedIn(identity)),
            Ok(None) => {
                if parts.method == Method::GET {
                    let path = parts.uri.path_and_query().map(|p| p.as_str()).unwrap_or("/");
                    if let Err(err) = session.insert(RETURN_URL, path).await {
                        return Err(crate::AppError::from(err).into_response());
                    }
                }
                tracing::debug!(path = %parts.uri.path(), "not signed in");
                Err(Redirect::to("/login").into_response())
            }
            Err(err) => Err(err.into_response()),
        }
    }
}

/// Forwarded headers win over the session, so a user switch at the proxy
/// takes effect on the next request.
async fn resolve(session: &Session, headers: &HeaderMap, prefix: &str) -> AppResult<Option<Identity>> {
    if let Some(identity) = Identity::from_headers(headers, prefix) {
        if session.get::<Identity>(IDENTITY).await?.as_ref() != Some(&identity) {
            tracing::info!(user_id = %identity.user_id, "welcome");
            session.insert(IDENTITY, &identity).await?;
        }
        return Ok(Some(identity));
    }

    Ok(session.get::<Identity>(IDENTITY).await?)
}
