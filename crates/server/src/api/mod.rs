use shared::{
    domain::{Item, ItemId, NewItem},
    error::{ApiError, ErrorCode},
};
use tracing::error;

use crate::store::{ItemStore, StoreError};

#[derive(Clone)]
pub struct ApiContext {
    pub store: ItemStore,
}

pub async fn list_items(ctx: &ApiContext) -> Result<Vec<Item>, ApiError> {
    Ok(ctx.store.list().await)
}

pub async fn get_item(ctx: &ApiContext, id: ItemId) -> Result<Item, ApiError> {
    ctx.store.get(id).await.map_err(store_error)
}

pub async fn create_item(ctx: &ApiContext, new_item: NewItem) -> Result<Item, ApiError> {
    validate(&new_item)?;
    ctx.store.insert(new_item).await.map_err(store_error)
}

/// Full replacement; the id always comes from the path.
pub async fn replace_item(
    ctx: &ApiContext,
    id: ItemId,
    new_item: NewItem,
) -> Result<Item, ApiError> {
    validate(&new_item)?;
    ctx.store.replace(id, new_item).await.map_err(store_error)
}

pub async fn delete_item(ctx: &ApiContext, id: ItemId) -> Result<(), ApiError> {
    ctx.store.remove(id).await.map_err(store_error)
}

fn validate(new_item: &NewItem) -> Result<(), ApiError> {
    if new_item.name.trim().is_empty() {
        return Err(ApiError::new(ErrorCode::Validation, "name must not be empty"));
    }
    Ok(())
}

fn store_error(err: StoreError) -> ApiError {
    match err {
        StoreError::NotFound(id) => ApiError::not_found(format!("item {id} not found")),
        other => {
            error!(%other, "item store failure");
            ApiError::internal(other.to_string())
        }
    }
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
