//! In-memory food collection, optionally mirrored to a json-server style data
//! file (`{"foods": [...]}`).

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Deserialize, Serialize};
use shared::domain::{Item, ItemId, NewItem};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("item {0} not found")]
    NotFound(ItemId),
    #[error("failed to read data file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse data file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write data file {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode collection: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct DataFile {
    #[serde(default)]
    foods: Vec<Item>,
}

#[derive(Clone)]
pub struct ItemStore {
    items: Arc<RwLock<Vec<Item>>>,
    data_path: Option<PathBuf>,
}

impl ItemStore {
    pub fn in_memory(items: Vec<Item>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
            data_path: None,
        }
    }

    /// Seeds the store from `path`. A missing file yields an empty collection.
    /// With `persist` set, every mutation rewrites the file.
    pub async fn open(path: impl Into<PathBuf>, persist: bool) -> Result<Self, StoreError> {
        let path = path.into();
        let items = match tokio::fs::read(&path).await {
            Ok(raw) => {
                let data: DataFile =
                    serde_json::from_slice(&raw).map_err(|source| StoreError::Parse {
                        path: path.clone(),
                        source,
                    })?;
                data.foods
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "data file not found; starting with an empty collection");
                Vec::new()
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: path.clone(),
                    source,
                })
            }
        };
        info!(path = %path.display(), count = items.len(), persist, "seeded item store");

        Ok(Self {
            items: Arc::new(RwLock::new(items)),
            data_path: persist.then_some(path),
        })
    }

    pub async fn list(&self) -> Vec<Item> {
        self.items.read().await.clone()
    }

    pub async fn get(&self, id: ItemId) -> Result<Item, StoreError> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Appends `new_item` under the next free id (`max + 1`).
    pub async fn insert(&self, new_item: NewItem) -> Result<Item, StoreError> {
        let mut guard = self.items.write().await;
        let id = ItemId(guard.iter().map(|item| item.id.0).max().unwrap_or(0) + 1);
        let created = new_item.into_item(id);

        let mut next = guard.clone();
        next.push(created.clone());
        self.persist(&next).await?;
        *guard = next;
        Ok(created)
    }

    pub async fn replace(&self, id: ItemId, new_item: NewItem) -> Result<Item, StoreError> {
        let mut guard = self.items.write().await;
        let index = guard
            .iter()
            .position(|item| item.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let replaced = new_item.into_item(id);

        let mut next = guard.clone();
        next[index] = replaced.clone();
        self.persist(&next).await?;
        *guard = next;
        Ok(replaced)
    }

    pub async fn remove(&self, id: ItemId) -> Result<(), StoreError> {
        let mut guard = self.items.write().await;
        if !guard.iter().any(|item| item.id == id) {
            return Err(StoreError::NotFound(id));
        }

        let next: Vec<Item> = guard.iter().filter(|item| item.id != id).cloned().collect();
        self.persist(&next).await?;
        *guard = next;
        Ok(())
    }

    async fn persist(&self, items: &[Item]) -> Result<(), StoreError> {
        let Some(path) = self.data_path.as_deref() else {
            return Ok(());
        };
        let body = serde_json::to_vec_pretty(&DataFile {
            foods: items.to_vec(),
        })?;
        write_data_file(path, &body).await?;
        debug!(path = %path.display(), count = items.len(), "persisted collection");
        Ok(())
    }
}

async fn write_data_file(path: &Path, body: &[u8]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| StoreError::Write {
                path: path.to_path_buf(),
                source,
            })?;
    }
    tokio::fs::write(path, body)
        .await
        .map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
