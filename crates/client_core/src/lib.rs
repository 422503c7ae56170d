use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::{Item, ItemId, NewItem},
    protocol::{collection_route, item_path},
};
use tracing::debug;
use url::Url;

pub mod controller;
pub mod error;

pub use controller::{CatalogController, ControllerState, DeleteReconciliation};
pub use error::ClientError;
pub use shared::protocol::DEFAULT_BASE_URL;

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Remote food collection. One call is one HTTP round trip.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_items(&self) -> Result<Vec<Item>>;
    async fn create_item(&self, item: &NewItem) -> Result<Item>;
    /// Full replacement of the item with `item.id`.
    async fn replace_item(&self, item: &Item) -> Result<Item>;
    async fn delete_item(&self, id: ItemId) -> Result<()>;
}

pub struct HttpCatalogApi {
    http: Client,
    base_url: String,
}

impl HttpCatalogApi {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Accepts `http(s)://host[:port][/prefix]` and strips trailing slashes so
/// route paths can be appended directly.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let raw = raw.trim();
    let parsed = Url::parse(raw).map_err(|err| ClientError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: err.to_string(),
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ClientError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "scheme must be http or https".to_string(),
        });
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ClientError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: "query strings and fragments are not supported".to_string(),
        });
    }
    Ok(raw.trim_end_matches('/').to_string())
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn list_items(&self) -> Result<Vec<Item>> {
        let url = self.url(collection_route());
        debug!(%url, "GET collection");
        let response = self.http.get(url).send().await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    async fn create_item(&self, item: &NewItem) -> Result<Item> {
        let url = self.url(collection_route());
        debug!(%url, name = %item.name, "POST item");
        let response = self.http.post(url).json(item).send().await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    async fn replace_item(&self, item: &Item) -> Result<Item> {
        let url = self.url(&item_path(item.id));
        debug!(%url, "PUT item");
        let response = self.http.put(url).json(item).send().await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    async fn delete_item(&self, id: ItemId) -> Result<()> {
        let url = self.url(&item_path(id));
        debug!(%url, "DELETE item");
        let response = self.http.delete(url).send().await?;
        ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
