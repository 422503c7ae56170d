//! Backend commands queued from UI to backend worker.

use shared::domain::{Item, ItemDraft, ItemId};

#[derive(Debug, Clone)]
pub enum BackendCommand {
    OpenCreateModal,
    CloseCreateModal,
    CreateItem { draft: ItemDraft },
    BeginEdit { item: Item },
    CloseEditModal,
    UpdateItem { draft: ItemDraft },
    DeleteItem { id: ItemId },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::OpenCreateModal => "open_create_modal",
            BackendCommand::CloseCreateModal => "close_create_modal",
            BackendCommand::CreateItem { .. } => "create_item",
            BackendCommand::BeginEdit { .. } => "begin_edit",
            BackendCommand::CloseEditModal => "close_edit_modal",
            BackendCommand::UpdateItem { .. } => "update_item",
            BackendCommand::DeleteItem { .. } => "delete_item",
        }
    }
}
