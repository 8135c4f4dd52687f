//! Request decorators that attach credentials.

use crate::context::RequestContext;
use crate::transport::{ApiRequest, TransportError};
use async_trait::async_trait;

pub const USER_NAME_HEADER: &str = "X-SLURM-USER-NAME";
pub const USER_TOKEN_HEADER: &str = "X-SLURM-USER-TOKEN";

/// Decorates an outgoing request with credentials. Adapters never look at
/// credentials themselves.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(
        &self,
        ctx: &RequestContext,
        request: &mut ApiRequest,
    ) -> Result<(), TransportError>;
}

/// No credentials, for local sockets and `auth/local` setups.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAuth;

#[async_trait]
impl Authenticator for NoAuth {
    async fn authenticate(
        &self,
        _ctx: &RequestContext,
        _request: &mut ApiRequest,
    ) -> Result<(), TransportError> {
        Ok(())
    }
}

/// JWT auth via the slurmrestd user/token headers.
#[derive(Clone)]
pub struct TokenAuth {
    user: Option<String>,
    token: String,
}

impl TokenAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            user: None,
            token: token.into(),
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into()).filter(|u: &String| !u.is_empty());
        self
    }
}

impl std::fmt::Debug for TokenAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenAuth")
            .field("user", &self.user)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl Authenticator for TokenAuth {
    async fn authenticate(
        &self,
        _ctx: &RequestContext,
        request: &mut ApiRequest,
    ) -> Result<(), TransportError> {
        if self.token.is_empty() {
            return Err(TransportError::Auth("token is empty".to_string()));
        }
        if let Some(user) = &self.user {
            request.set_header(USER_NAME_HEADER, user.clone());
        }
        request.set_header(USER_TOKEN_HEADER, self.token.clone());
        Ok(())
    }
}
