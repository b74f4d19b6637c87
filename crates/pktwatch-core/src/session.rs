// ── Session ──
//
// The credential every fetch carries. Passed in explicitly so fetches
// never reach for ambient storage.

use secrecy::SecretString;

/// Client session holding the (optional) API access token.
#[derive(Debug, Clone, Default)]
pub struct Session {
    access_token: Option<SecretString>,
}

impl Session {
    pub fn new(access_token: Option<SecretString>) -> Self {
        Self { access_token }
    }

    /// A session without any token; fetches will trigger login redirects.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn access_token(&self) -> Option<&SecretString> {
        self.access_token.as_ref()
    }

    pub fn has_token(&self) -> bool {
        self.access_token.is_some()
    }
}

impl From<SecretString> for Session {
    fn from(token: SecretString) -> Self {
        Self::new(Some(token))
    }
}
