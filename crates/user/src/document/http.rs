use std::time::Duration;

use reqwest::Client;
use tokio::sync::RwLock;

use super::{DocumentStore, UserDocument};

#[derive(Debug, Clone)]
pub struct HttpDocumentStoreConfig {
    pub base_url: String,
    pub timeout: Duration,
}

/// Document store backed by a realtime-database style REST endpoint where
/// every user lives at `users/{uid}.json`.
pub struct HttpDocumentStore {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpDocumentStore {
    pub fn new(config: HttpDocumentStoreConfig) -> recipebook_shared::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("recipebook/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            token: RwLock::new(None),
        })
    }

    /// Id token of the signed-in session, sent with every request.
    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    async fn request(&self, method: reqwest::Method, uid: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/users/{}.json", self.base_url, urlencoding::encode(uid));
        let request = self.client.request(method, url);

        match self.token.read().await.as_deref() {
            Some(token) => request.query(&[("auth", token)]),
            None => request,
        }
    }
}

#[async_trait::async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn get(&self, uid: &str) -> recipebook_shared::Result<Option<UserDocument>> {
        let resp = self.request(reqwest::Method::GET, uid).await.send().await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), user.uid = uid, "user document read failed");
            recipebook_shared::bail!("user document read failed with status {status}");
        }

        Ok(resp.json::<Option<UserDocument>>().await?)
    }

    async fn set(&self, document: &UserDocument) -> recipebook_shared::Result<()> {
        let resp = self
            .request(reqwest::Method::PUT, &document.uid)
            .await
            .json(document)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                user.uid = %document.uid,
                "user document write failed"
            );
            recipebook_shared::bail!("user document write failed with status {status}");
        }

        Ok(())
    }

    async fn authorize(&self, token: Option<&str>) {
        self.set_token(token.map(str::to_owned)).await;
    }
}
