mod identity;
mod memory;

pub use identity::{IdentityClient, IdentityConfig};
pub use memory::MemoryAuth;

use serde::{Deserialize, Serialize};

pub(crate) const INVALID_CREDENTIALS: &str = "Invalid email or password. Please try again.";
pub(crate) const EMAIL_EXISTS: &str = "Email already exists";

/// Signed-in user as returned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub uid: String,
    pub email: String,
    pub token: String,
}

#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> recipebook_shared::Result<Session>;
    async fn sign_up(&self, email: &str, password: &str) -> recipebook_shared::Result<Session>;
}
