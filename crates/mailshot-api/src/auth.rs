//! Token and registration endpoints

use crate::client::ApiClient;
use crate::models::{Credentials, Registration, TokenResponse, UserSummary};

const TOKEN_AUTH: &str = "/api-token-auth/";
const USERS: &str = "/usuarios/";

/// Authentication operations
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    api: &'a ApiClient,
}

impl ApiClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { api: self }
    }
}

impl AuthApi<'_> {
    /// Exchange credentials for a token without touching the session
    pub async fn obtain_token(&self, credentials: &Credentials) -> crate::Result<TokenResponse> {
        self.api.post(TOKEN_AUTH, credentials).await
    }

    /// Obtain a token and start the session with it
    pub async fn login(&self, username: &str, password: &str) -> crate::Result<()> {
        let response = self
            .obtain_token(&Credentials {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await?;
        self.api.session().login(response.token)?;
        tracing::info!("Logged in as {}", username);
        Ok(())
    }

    pub fn logout(&self) -> crate::Result<()> {
        self.api.session().logout()
    }

    pub async fn register(&self, registration: &Registration) -> crate::Result<UserSummary> {
        self.api.post(USERS, registration).await
    }
}
