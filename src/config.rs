use anyhow::Context;

use crate::{conversation::TruncatePolicy, view::EditConfirmation};

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: String,
    /// Where the sign-in button sends people. Normally the identity proxy's
    /// start URL. Without it the login page can only warn.
    pub login_url: Option<String>,
    pub logout_url: String,
    /// Prefix of the headers the identity proxy forwards, e.g. `x-forwarded`
    /// for `x-forwarded-user`.
    pub identity_header: String,
    pub session_minutes: i64,
    pub truncate: TruncatePolicy,
    pub edit_confirmation: EditConfirmation,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_owned(),
            login_url: None,
            logout_url: "/login".to_owned(),
            identity_header: "x-forwarded".to_owned(),
            session_minutes: 30,
            truncate: TruncatePolicy::default(),
            edit_confirmation: EditConfirmation::default(),
        }
    }
}

impl Config {
    /// Reads `CHATDESK_*` variables, after loading `.env` if there is one.
    pub fn from_env() -> anyhow::Result<Config> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Config> {
        let var = |key: &str| var(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(bind) = var("CHATDESK_BIND") {
            config.bind = bind;
        }
        config.login_url = var("CHATDESK_LOGIN_URL");
        if let Some(logout_url) = var("CHATDESK_LOGOUT_URL") {
            config.logout_url = logout_url;
        }
        if let Some(prefix) = var("CHATDESK_IDENTITY_HEADER") {
            config.identity_header = prefix.trim().trim_end_matches('-').to_ascii_lowercase();
        }
        if let Some(minutes) = var("CHATDESK_SESSION_MINUTES") {
            config.session_minutes = minutes
                .trim()
                .parse()
                .with_context(|| format!("CHATDESK_SESSION_MINUTES={minutes:?} is not a number"))?;
        }
        if let Some(policy) = var("CHATDESK_TRUNCATE") {
            config.truncate = policy.parse().context("CHATDESK_TRUNCATE")?;
        }
        if let Some(confirmation) = var("CHATDESK_EDIT_CONFIRM") {
            config.edit_confirmation = confirmation.parse().context("CHATDESK_EDIT_CONFIRM")?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind, "0.0.0.0:8080");
        assert_eq!(config.login_url, None);
        assert_eq!(config.logout_url, "/login");
        assert_eq!(config.truncate, TruncatePolicy::OnlyIfChanged);
        assert_eq!(config.edit_confirmation, EditConfirmation::OnEnter);
    }

    #[test]
    fn reads_every_key() {
        let config = Config::from_lookup(lookup(&[
            ("CHATDESK_BIND", "127.0.0.1:3000"),
            ("CHATDESK_LOGIN_URL", "/oauth2/start"),
            ("CHATDESK_LOGOUT_URL", "/oauth2/sign_out"),
            ("CHATDESK_IDENTITY_HEADER", "X-Auth-Request-"),
            ("CHATDESK_SESSION_MINUTES", "5"),
            ("CHATDESK_TRUNCATE", "always"),
            ("CHATDESK_EDIT_CONFIRM", "on_button"),
        ]))
        .unwrap();

        assert_eq!(config.bind, "127.0.0.1:3000");
        assert_eq!(config.login_url.as_deref(), Some("/oauth2/start"));
        assert_eq!(config.logout_url, "/oauth2/sign_out");
        assert_eq!(config.identity_header, "x-auth-request");
        assert_eq!(config.session_minutes, 5);
        assert_eq!(config.truncate, TruncatePolicy::Always);
        assert_eq!(config.edit_confirmation, EditConfirmation::OnButtonConfirm);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = Config::from_lookup(lookup(&[("CHATDESK_LOGIN_URL", "  ")])).unwrap();
        assert_eq!(config.login_url, None);
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(Config::from_lookup(lookup(&[("CHATDESK_TRUNCATE", "never")])).is_err());
        assert!(Config::from_lookup(lookup(&[("CHATDESK_SESSION_MINUTES", "soon")])).is_err());
    }
}
