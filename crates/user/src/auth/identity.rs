use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{AuthService, EMAIL_EXISTS, INVALID_CREDENTIALS, Session};

#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

/// Email/password accounts on an identity-toolkit REST API.
pub struct IdentityClient {
    client: Client,
    config: IdentityConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountResponse {
    local_id: String,
    email: String,
    id_token: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl IdentityClient {
    pub fn new(config: IdentityConfig) -> recipebook_shared::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("recipebook/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    async fn account(
        &self,
        action: &str,
        email: &str,
        password: &str,
    ) -> recipebook_shared::Result<Session> {
        let url = format!(
            "{}/v1/accounts:{action}",
            self.config.base_url.trim_end_matches('/')
        );

        let resp = self
            .client
            .post(url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&Credentials {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await?;
            let code = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or_default();

            // codes may carry a detail suffix, "WEAK_PASSWORD : Password should be..."
            match code.split(':').next().map(str::trim).unwrap_or_default() {
                "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
                    recipebook_shared::user!("{}", INVALID_CREDENTIALS)
                }
                "EMAIL_EXISTS" => recipebook_shared::user!("{}", EMAIL_EXISTS),
                "USER_DISABLED" => recipebook_shared::user!("Account disabled"),
                _ => {
                    tracing::error!(status = status.as_u16(), code = %code, action, "identity request failed");
                    recipebook_shared::bail!("identity request failed with status {status}");
                }
            }
        }

        let account: AccountResponse = resp.json().await?;

        tracing::info!(user.uid = %account.local_id, action, "signed in");

        Ok(Session {
            uid: account.local_id,
            email: account.email,
            token: account.id_token,
        })
    }
}

#[async_trait::async_trait]
impl AuthService for IdentityClient {
    async fn sign_in(&self, email: &str, password: &str) -> recipebook_shared::Result<Session> {
        self.account("signInWithPassword", email, password).await
    }

    async fn sign_up(&self, email: &str, password: &str) -> recipebook_shared::Result<Session> {
        self.account("signUp", email, password).await
    }
}
