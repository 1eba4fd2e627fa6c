pub mod auth;
pub mod document;
pub mod repository;

pub use auth::{AuthService, IdentityClient, IdentityConfig, MemoryAuth, Session};
pub use document::{
    Documents, DocumentStore, HttpDocumentStore, HttpDocumentStoreConfig, MemoryDocumentStore,
    UserDocument,
};

/// Milliseconds since the unix epoch, the unit of every `last_update`.
pub fn now_millis() -> i64 {
    (time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}
