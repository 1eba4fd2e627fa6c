use std::collections::HashMap;

use tokio::sync::RwLock;

use super::{DocumentStore, UserDocument};

/// In-process document store, used offline and in tests.
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: RwLock<HashMap<String, UserDocument>>,
}

impl MemoryDocumentStore {
    pub fn with_documents(documents: impl IntoIterator<Item = UserDocument>) -> Self {
        Self {
            documents: RwLock::new(
                documents
                    .into_iter()
                    .map(|d| (d.uid.to_owned(), d))
                    .collect(),
            ),
        }
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, uid: &str) -> recipebook_shared::Result<Option<UserDocument>> {
        Ok(self.documents.read().await.get(uid).cloned())
    }

    async fn set(&self, document: &UserDocument) -> recipebook_shared::Result<()> {
        self.documents
            .write()
            .await
            .insert(document.uid.to_owned(), document.clone());

        Ok(())
    }
}
