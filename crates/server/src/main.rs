use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use shared::{
    domain::{Item, ItemId, NewItem},
    error::{ApiError, ErrorCode},
    protocol::{collection_route, item_route_template},
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, info};

mod api;
mod app_state;
mod config;
mod store;

use api::{create_item, delete_item, get_item, list_items, replace_item, ApiContext};
use app_state::AppState;
use config::load_settings;
use store::ItemStore;

const MAX_BODY_BYTES: usize = 64 * 1024;

type HttpError = (StatusCode, Json<ApiError>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let store = ItemStore::open(&settings.data_path, settings.persist)
        .await
        .map_err(|error| {
            error!(
                data_path = %settings.data_path.display(),
                %error,
                "failed to open data file; fix or remove it and restart"
            );
            error
        })?;

    let state = AppState {
        api: ApiContext { store },
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "catalog server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(
            collection_route(),
            get(http_list_items).post(http_create_item),
        )
        .route(
            item_route_template(),
            get(http_get_item)
                .put(http_replace_item)
                .delete(http_delete_item),
        )
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

fn http_error(err: ApiError) -> HttpError {
    let status = match err.code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(err))
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_list_items(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Item>>, HttpError> {
    let items = list_items(&state.api).await.map_err(http_error)?;
    Ok(Json(items))
}

async fn http_get_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Item>, HttpError> {
    let item = get_item(&state.api, ItemId(id)).await.map_err(http_error)?;
    Ok(Json(item))
}

async fn http_create_item(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewItem>,
) -> Result<(StatusCode, Json<Item>), HttpError> {
    let created = create_item(&state.api, req).await.map_err(http_error)?;
    info!(id = %created.id, name = %created.name, "item created");
    Ok((StatusCode::CREATED, Json(created)))
}

async fn http_replace_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<NewItem>,
) -> Result<Json<Item>, HttpError> {
    let updated = replace_item(&state.api, ItemId(id), req)
        .await
        .map_err(http_error)?;
    info!(id = %updated.id, "item replaced");
    Ok(Json(updated))
}

async fn http_delete_item(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, HttpError> {
    delete_item(&state.api, ItemId(id))
        .await
        .map_err(http_error)?;
    info!(%id, "item deleted");
    Ok(Json(serde_json::json!({})))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
