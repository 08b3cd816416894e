use std::sync::Arc;

use axum::{
    debug_handler,
    extract::State,
    response::{Html, IntoResponse},
};

use crate::{Config, include_res, res::escape_html};

#[debug_handler(state = crate::AppState)]
pub(crate) async fn login_page(State(config): State<Arc<Config>>) -> impl IntoResponse {
    Html(login_html(config.login_url.as_deref()))
}

fn login_html(login_url: Option<&str>) -> String {
    let (warning, sign_in) = match login_url {
        Some(url) => (
            String::new(),
            format!(r#"<a class="sign-in" href="{}">Sign in</a>"#, escape_html(url)),
        ),
        None => (
            r#"<div class="alert-error">Sign-in is not configured. Set <code>CHATDESK_LOGIN_URL</code> to the identity provider's sign-in address.</div>"#
                .to_owned(),
            String::new(),
        ),
    };

    include_res!(str, "/pages/login.html")
        .replace("{warning}", &warning)
        .replace("{sign_in}", &sign_in)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warns_without_login_url() {
        let html = login_html(None);
        assert!(html.contains("CHATDESK_LOGIN_URL"));
        assert!(!html.contains("class=\"sign-in\""));

        let html = login_html(Some("/oauth2/start?rd=/"));
        assert!(html.contains(r#"href="/oauth2/start?rd=/""#));
        assert!(!html.contains("alert-error"));
    }
}
