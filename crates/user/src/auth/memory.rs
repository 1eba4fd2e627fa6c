use std::collections::HashMap;

use argon2::{
    Argon2, PasswordHash, PasswordVerifier,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use tokio::sync::RwLock;
use ulid::Ulid;

use super::{AuthService, EMAIL_EXISTS, INVALID_CREDENTIALS, Session};

struct Account {
    uid: String,
    password_hash: String,
}

/// Accounts held in memory with argon2 hashed passwords.
#[derive(Default)]
pub struct MemoryAuth {
    accounts: RwLock<HashMap<String, Account>>,
}

impl MemoryAuth {
    fn session(uid: &str, email: &str) -> Session {
        Session {
            uid: uid.to_owned(),
            email: email.to_owned(),
            token: Ulid::new().to_string(),
        }
    }
}

#[async_trait::async_trait]
impl AuthService for MemoryAuth {
    async fn sign_in(&self, email: &str, password: &str) -> recipebook_shared::Result<Session> {
        let email = email.to_lowercase();
        let accounts = self.accounts.read().await;

        let Some(account) = accounts.get(&email) else {
            recipebook_shared::user!("{}", INVALID_CREDENTIALS);
        };

        let parsed_hash =
            PasswordHash::new(&account.password_hash).map_err(|e| anyhow::anyhow!("{e}"))?;

        if Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_err()
        {
            recipebook_shared::user!("{}", INVALID_CREDENTIALS);
        }

        Ok(Self::session(&account.uid, &email))
    }

    async fn sign_up(&self, email: &str, password: &str) -> recipebook_shared::Result<Session> {
        let email = email.to_lowercase();
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(&email) {
            recipebook_shared::user!("{}", EMAIL_EXISTS);
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!("{e}"))?
            .to_string();

        let uid = Ulid::new().to_string();
        accounts.insert(
            email.to_owned(),
            Account {
                uid: uid.to_owned(),
                password_hash,
            },
        );

        Ok(Self::session(&uid, &email))
    }
}
