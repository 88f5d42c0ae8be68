//! Session endpoints. The backend issues and clears the session cookie;
//! the client only reports and forwards it.

use crate::client::CrmClient;
use crm_core::types::AuthUser;
use crm_core::{CrmError, CrmResult};
use serde::Deserialize;
use tracing::debug;

/// `GET /auth/status` returns either `{user: {...}}` or the user object
/// directly depending on backend version.
#[derive(Debug, Deserialize)]
struct AuthStatusBody {
    #[serde(default)]
    user: Option<AuthUser>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl CrmClient {
    /// Current session user, or `None` when not logged in. An unauthenticated
    /// response is an expected state here, not an error.
    pub async fn auth_status(&self) -> CrmResult<Option<AuthUser>> {
        match self.get::<AuthStatusBody>("/auth/status", &[]).await {
            Ok(body) => {
                if let Some(user) = body.user {
                    return Ok(Some(user));
                }
                if body.name.is_some() || body.email.is_some() {
                    return Ok(Some(AuthUser {
                        name: body.name,
                        email: body.email,
                    }));
                }
                Ok(None)
            }
            Err(CrmError::Unauthenticated) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Fails with `Unauthenticated` unless a session is active. Called
    /// before mutating operations so the failure is a clear message rather
    /// than a backend rejection mid-workflow.
    pub async fn require_session(&self) -> CrmResult<AuthUser> {
        self.auth_status()
            .await?
            .ok_or(CrmError::Unauthenticated)
    }

    /// `GET /auth/logout` — clears the server session.
    pub async fn logout(&self) -> CrmResult<()> {
        let _: serde_json::Value = self.get("/auth/logout", &[]).await?;
        debug!("session cleared");
        Ok(())
    }
}
