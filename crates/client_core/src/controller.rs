//! Dashboard controller: owns the local item list and modal flags and keeps the
//! list in step with the remote collection, one round trip per operation.

use std::{collections::HashSet, sync::Arc};

use shared::domain::{Item, ItemDraft, ItemId};
use tracing::{error, info, warn};

use crate::{CatalogApi, ClientError, Result};

/// What `delete` does to the local list when the server call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteReconciliation {
    /// Drop the item locally whatever the server answered. Local state can
    /// diverge from the server when the request fails.
    #[default]
    Always,
    /// Drop the item only after the server confirmed the delete.
    OnSuccess,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerState {
    /// Server response order; creates append.
    pub items: Vec<Item>,
    /// Only meaningful while `edit_modal_open` is set.
    pub editing_item: Option<Item>,
    pub create_modal_open: bool,
    pub edit_modal_open: bool,
}

impl ControllerState {
    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

pub struct CatalogController {
    api: Arc<dyn CatalogApi>,
    state: ControllerState,
    delete_reconciliation: DeleteReconciliation,
}

impl CatalogController {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self::with_delete_reconciliation(api, DeleteReconciliation::default())
    }

    pub fn with_delete_reconciliation(
        api: Arc<dyn CatalogApi>,
        delete_reconciliation: DeleteReconciliation,
    ) -> Self {
        Self {
            api,
            state: ControllerState::default(),
            delete_reconciliation,
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn items(&self) -> &[Item] {
        &self.state.items
    }

    pub fn editing_item(&self) -> Option<&Item> {
        self.state.editing_item.as_ref()
    }

    /// Replaces the local list with the full remote collection.
    pub async fn load(&mut self) -> Result<()> {
        let fetched = self.api.list_items().await.map_err(|err| {
            error!(%err, "failed to load items");
            err
        })?;

        let mut seen = HashSet::with_capacity(fetched.len());
        let mut items = Vec::with_capacity(fetched.len());
        for item in fetched {
            if seen.insert(item.id) {
                items.push(item);
            } else {
                warn!(id = %item.id, "collection response repeats an id; keeping the first");
            }
        }

        info!(count = items.len(), "loaded items");
        self.state.items = items;
        Ok(())
    }

    /// Submits `draft` as a new, available item and appends what the server
    /// returned.
    pub async fn create(&mut self, draft: ItemDraft) -> Result<Item> {
        let new_item = draft.into_new_item();
        let created = self.api.create_item(&new_item).await.map_err(|err| {
            error!(%err, name = %new_item.name, "failed to create item");
            err
        })?;

        match self.state.position(created.id) {
            Some(index) => {
                warn!(id = %created.id, "server returned an id already listed; replacing it");
                self.state.items[index] = created.clone();
            }
            None => self.state.items.push(created.clone()),
        }
        info!(id = %created.id, "created item");
        Ok(created)
    }

    /// Sends `draft` merged with the id and availability of the item being
    /// edited as a full replacement.
    pub async fn update(&mut self, draft: ItemDraft) -> Result<Item> {
        let Some(editing) = self.state.editing_item.as_ref() else {
            return Err(ClientError::NoItemSelected);
        };
        let merged = draft.into_item(editing.id, editing.available);

        let updated = self.api.replace_item(&merged).await.map_err(|err| {
            error!(%err, id = %merged.id, "failed to update item");
            err
        })?;

        match self.state.position(merged.id) {
            Some(index) => self.state.items[index] = updated.clone(),
            None => warn!(id = %merged.id, "updated item is no longer listed locally"),
        }
        info!(id = %updated.id, "updated item");
        Ok(updated)
    }

    pub async fn delete(&mut self, id: ItemId) -> Result<()> {
        let outcome = self.api.delete_item(id).await;

        match (&outcome, self.delete_reconciliation) {
            (Ok(()), _) => {
                self.remove_local(id);
                info!(%id, "deleted item");
            }
            (Err(err), DeleteReconciliation::Always) => {
                self.remove_local(id);
                warn!(%err, %id, "delete failed on the server; removed locally anyway");
            }
            (Err(err), DeleteReconciliation::OnSuccess) => {
                error!(%err, %id, "failed to delete item");
            }
        }
        outcome
    }

    fn remove_local(&mut self, id: ItemId) {
        self.state.items.retain(|item| item.id != id);
    }

    pub fn open_create_modal(&mut self) {
        self.state.create_modal_open = true;
    }

    pub fn close_create_modal(&mut self) {
        self.state.create_modal_open = false;
    }

    pub fn toggle_create_modal(&mut self) {
        self.state.create_modal_open = !self.state.create_modal_open;
    }

    pub fn begin_edit(&mut self, item: Item) {
        self.state.editing_item = Some(item);
        self.open_edit_modal();
    }

    pub fn open_edit_modal(&mut self) {
        self.state.edit_modal_open = true;
    }

    pub fn close_edit_modal(&mut self) {
        self.state.edit_modal_open = false;
    }

    pub fn toggle_edit_modal(&mut self) {
        self.state.edit_modal_open = !self.state.edit_modal_open;
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
