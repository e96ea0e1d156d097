use crate::models::Laptop;
use crate::pb::Filter;
use std::collections::HashMap;
use std::future::Future;
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LaptopStoreError {
    #[error("laptop {0} already exists")]
    AlreadyExists(String),
}

/// In-memory laptop catalog.
///
/// Records go in and come out as clones, so callers never hold a reference
/// into the map. There is no update path: a key is written once.
#[derive(Default)]
pub struct LaptopStore {
    data: RwLock<HashMap<String, Laptop>>,
}

impl LaptopStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn save(&self, laptop: &Laptop) -> Result<(), LaptopStoreError> {
        let mut data = self.data.write().await;
        if data.contains_key(&laptop.id) {
            return Err(LaptopStoreError::AlreadyExists(laptop.id.clone()));
        }

        data.insert(laptop.id.clone(), laptop.clone());
        tracing::debug!(laptop_id = %laptop.id, total = data.len(), "laptop stored");
        Ok(())
    }

    pub async fn find(&self, id: &str) -> Option<Laptop> {
        self.data.read().await.get(id).cloned()
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.data.read().await.contains_key(id)
    }

    /// Calls `found` with a copy of every laptop that matches `filter`.
    ///
    /// Matches are copied out under the read lock, which is released before
    /// `found` runs, so a slow visitor never holds up writers. The first
    /// error returned by `found` stops the scan and is handed back.
    pub async fn search<F, Fut, E>(&self, filter: &Filter, mut found: F) -> Result<(), E>
    where
        F: FnMut(Laptop) -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        let matches: Vec<Laptop> = {
            let data = self.data.read().await;
            data.values()
                .filter(|laptop| filter.matches(laptop))
                .cloned()
                .collect()
        };

        for laptop in matches {
            found(laptop).await?;
        }
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }
}
