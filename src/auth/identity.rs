use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub email: Option<String>,
    pub given_name: Option<String>,
    pub surname: Option<String>,
    /// Directory account name, shown under the display name.
    pub account: Option<String>,
}

impl Identity {
    /// Reads `<prefix>-user` and friends. `None` without a user header.
    pub fn from_headers(headers: &HeaderMap, prefix: &str) -> Option<Identity> {
        let header = |name: &str| {
            headers
                .get(format!("{prefix}-{name}"))
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_owned)
        };

        Some(Identity {
            user_id: header("user")?,
            email: header("email"),
            given_name: header("given-name"),
            surname: header("surname"),
            account: header("account"),
        })
    }

    pub fn initials(&self) -> String {
        let first = |s: &Option<String>| s.as_deref().and_then(|s| s.chars().next());
        let initials: String = [first(&self.given_name), first(&self.surname)]
            .into_iter()
            .flatten()
            .flat_map(char::to_uppercase)
            .collect();

        if initials.is_empty() {
            self.user_id.chars().take(1).flat_map(char::to_uppercase).collect()
        } else {
            initials
        }
    }

    pub fn display_name(&self) -> String {
        let name = [self.given_name.as_deref(), self.surname.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        if name.is_empty() {
            self.email.clone().unwrap_or_else(|| self.user_id.clone())
        } else {
            name
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn reads_forwarded_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-user", HeaderValue::from_static(" mrossi "));
        headers.insert("x-forwarded-given-name", HeaderValue::from_static("Mario"));
        headers.insert("x-forwarded-surname", HeaderValue::from_static("Rossi"));
        headers.insert("x-forwarded-email", HeaderValue::from_static(""));

        let identity = Identity::from_headers(&headers, "x-forwarded").unwrap();
        assert_eq!(identity.user_id, "mrossi");
        assert_eq!(identity.email, None);
        assert_eq!(identity.initials(), "MR");
        assert_eq!(identity.display_name(), "Mario Rossi");

        assert!(Identity::from_headers(&headers, "x-auth-request").is_none());
    }

    #[test]
    fn falls_back_to_user_id() {
        let identity = Identity {
            user_id: "luigi".into(),
            email: None,
            given_name: None,
            surname: None,
            account: None,
        };
        assert_eq!(identity.initials(), "L");
        assert_eq!(identity.display_name(), "luigi");
    }
}
