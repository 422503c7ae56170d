//! Routes of the food collection endpoint.

use crate::domain::ItemId;

/// Base URL of the collection endpoint when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";

pub const COLLECTION_PATH: &str = "/foods";

pub fn collection_route() -> &'static str {
    COLLECTION_PATH
}

/// Axum-style route template for a single item.
pub fn item_route_template() -> &'static str {
    "/foods/:id"
}

pub fn item_path(id: ItemId) -> String {
    format!("{COLLECTION_PATH}/{}", id.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_path_appends_numeric_id() {
        assert_eq!(item_path(ItemId(42)), "/foods/42");
        assert!(item_route_template().starts_with(collection_route()));
    }
}
