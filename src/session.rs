//! Session keys.

pub const IDENTITY: &str = "identity";
pub const RETURN_URL: &str = "return_url";
