use super::*;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::Value;
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct ServerState {
    items: Arc<Mutex<Vec<Item>>>,
    received: Arc<Mutex<Vec<(String, Value)>>>,
}

async fn handle_list(State(state): State<ServerState>) -> Json<Vec<Item>> {
    Json(state.items.lock().await.clone())
}

async fn handle_create(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Item>), StatusCode> {
    state
        .received
        .lock()
        .await
        .push(("POST /foods".to_string(), body.clone()));
    let new_item: NewItem = serde_json::from_value(body).map_err(|_| StatusCode::BAD_REQUEST)?;
    let mut items = state.items.lock().await;
    let id = ItemId(items.iter().map(|item| item.id.0).max().unwrap_or(0) + 1);
    let created = new_item.into_item(id);
    items.push(created.clone());
    Ok((StatusCode::CREATED, Json(created)))
}

async fn handle_replace(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Item>, StatusCode> {
    state
        .received
        .lock()
        .await
        .push((format!("PUT /foods/{id}"), body.clone()));
    let item: Item = serde_json::from_value(body).map_err(|_| StatusCode::BAD_REQUEST)?;
    let mut items = state.items.lock().await;
    let existing = items
        .iter_mut()
        .find(|existing| existing.id.0 == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    *existing = item.clone();
    Ok(Json(item))
}

async fn handle_delete(State(state): State<ServerState>, Path(id): Path<i64>) -> StatusCode {
    let mut items = state.items.lock().await;
    let before = items.len();
    items.retain(|item| item.id.0 != id);
    if items.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    }
}

async fn spawn_catalog_server(seed: Vec<Item>) -> anyhow::Result<(String, ServerState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = ServerState {
        items: Arc::new(Mutex::new(seed)),
        received: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/foods", get(handle_list).post(handle_create))
        .route("/foods/:id", put(handle_replace).delete(handle_delete))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), state))
}

fn ham() -> Item {
    Item {
        id: ItemId(1),
        name: "Ham".to_string(),
        image: "https://example.com/ham.png".to_string(),
        price: "10.00".to_string(),
        description: "Smoked".to_string(),
        available: true,
    }
}

#[tokio::test]
async fn list_items_decodes_collection_in_order() {
    let mut egg = ham();
    egg.id = ItemId(7);
    egg.name = "Egg".to_string();
    let (server_url, _state) = spawn_catalog_server(vec![egg.clone(), ham()])
        .await
        .expect("spawn server");
    let api = HttpCatalogApi::new(&server_url).expect("api");

    let items = api.list_items().await.expect("list");
    assert_eq!(items, vec![egg, ham()]);
}

#[tokio::test]
async fn create_item_posts_payload_without_id() {
    let (server_url, state) = spawn_catalog_server(vec![ham()]).await.expect("spawn server");
    let api = HttpCatalogApi::new(&format!("{server_url}/")).expect("api");

    let new_item = NewItem {
        name: "Cheese".to_string(),
        image: "u".to_string(),
        price: "5.00".to_string(),
        description: "d".to_string(),
        available: true,
    };
    let created = api.create_item(&new_item).await.expect("create");
    assert_eq!(created.id, ItemId(2));
    assert!(created.available);

    let received = state.received.lock().await;
    let (route, body) = received.last().expect("request recorded");
    assert_eq!(route, "POST /foods");
    assert!(body.get("id").is_none());
    assert_eq!(body["available"], Value::Bool(true));
}

#[tokio::test]
async fn replace_item_puts_full_item_to_its_path() {
    let (server_url, state) = spawn_catalog_server(vec![ham()]).await.expect("spawn server");
    let api = HttpCatalogApi::new(&server_url).expect("api");

    let mut changed = ham();
    changed.price = "12.50".to_string();
    let updated = api.replace_item(&changed).await.expect("replace");
    assert_eq!(updated, changed);

    let received = state.received.lock().await;
    let (route, body) = received.last().expect("request recorded");
    assert_eq!(route, "PUT /foods/1");
    assert_eq!(body["id"], serde_json::json!(1));
    assert_eq!(body["price"], serde_json::json!("12.50"));
}

#[tokio::test]
async fn delete_item_reports_missing_ids_as_status_errors() {
    let (server_url, state) = spawn_catalog_server(vec![ham()]).await.expect("spawn server");
    let api = HttpCatalogApi::new(&server_url).expect("api");

    api.delete_item(ItemId(1)).await.expect("delete");
    assert!(state.items.lock().await.is_empty());

    let err = api.delete_item(ItemId(1)).await.expect_err("already gone");
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn load_accepts_items_without_image_or_description() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route(
        "/foods",
        get(|| async {
            Json(serde_json::json!([
                {"id": 1, "name": "Ham", "price": "10.00", "available": true}
            ]))
        }),
    );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    let api = HttpCatalogApi::new(&format!("http://{addr}")).expect("api");
    let mut controller = CatalogController::new(Arc::new(api));
    controller.load().await.expect("load");

    assert_eq!(controller.items().len(), 1);
    let ham = &controller.items()[0];
    assert_eq!(ham.id, ItemId(1));
    assert_eq!(ham.name, "Ham");
    assert_eq!(ham.price, "10.00");
    assert!(ham.image.is_empty());
    assert!(ham.description.is_empty());
}

#[tokio::test]
async fn unreachable_server_surfaces_http_error() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let api = HttpCatalogApi::new(&format!("http://{addr}")).expect("api");
    let err = api.list_items().await.expect_err("nothing listening");
    assert!(matches!(err, ClientError::Http(_)), "unexpected error: {err}");
}

#[test]
fn normalizes_and_validates_base_urls() {
    assert_eq!(
        normalize_base_url("http://localhost:3333/").expect("valid"),
        "http://localhost:3333"
    );
    assert_eq!(
        normalize_base_url(" https://api.example.com/v1 ").expect("valid"),
        "https://api.example.com/v1"
    );
    for raw in ["localhost:3333", "ftp://example.com", "http://x/?a=1", ""] {
        assert!(
            matches!(
                normalize_base_url(raw),
                Err(ClientError::InvalidBaseUrl { .. })
            ),
            "{raw:?} should be rejected"
        );
    }
}

#[test]
fn default_base_url_is_accepted() {
    let api = HttpCatalogApi::new(DEFAULT_BASE_URL).expect("api");
    assert_eq!(api.base_url(), "http://localhost:3333");
}
