use crate::domain::ports::{AccessToken, CredentialSource};

/// Name of the cookie the web client stores its session token under.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// A token fixed at construction, e.g. from a flag or environment variable.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    token: Option<AccessToken>,
}

impl StaticCredentials {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: token
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .map(AccessToken::new),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

impl CredentialSource for StaticCredentials {
    fn access_token(&self) -> Option<AccessToken> {
        self.token.clone()
    }
}

/// Reads the token out of a `Cookie` header value such as
/// `"theme=dark; access_token=eyJ..."`.
#[derive(Debug, Clone)]
pub struct CookieCredentials {
    cookies: String,
}

impl CookieCredentials {
    pub fn new(cookies: impl Into<String>) -> Self {
        Self {
            cookies: cookies.into(),
        }
    }
}

impl CredentialSource for CookieCredentials {
    fn access_token(&self) -> Option<AccessToken> {
        self.cookies
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == ACCESS_TOKEN_COOKIE)
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty())
            .map(AccessToken::new)
    }
}
