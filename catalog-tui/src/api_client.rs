//! REST client for the remote product catalog.

use crate::config::TuiConfig;
use async_trait::async_trait;
use catalog_core::{CatalogSource, FetchError, FetchResult, PageRequest, ProductPage};
use std::time::Duration;

const PRODUCTS_PATH: &str = "/products";

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Unexpected response: HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Config error: {0}")]
    Config(String),
}

impl From<ApiClientError> for FetchError {
    fn from(err: ApiClientError) -> Self {
        match err {
            ApiClientError::Http(err) => FetchError::transport(err.to_string()),
            ApiClientError::Serde(err) => FetchError::decode(err.to_string()),
            ApiClientError::Status { status, body } => FetchError::Status { status, body },
            ApiClientError::Config(reason) => FetchError::transport(reason),
        }
    }
}

#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: &TuiConfig) -> Result<Self, ApiClientError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        let base_url = config.api_base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiClientError::Config("api_base_url is empty".to_string()));
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /products?limit=..&skip=..`
    pub async fn list_products(&self, page: &PageRequest) -> Result<ProductPage, ApiClientError> {
        self.get_json(PRODUCTS_PATH, Some(page)).await
    }

    async fn get_json<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(url);
        if let Some(query) = query {
            request = request.query(query);
        }
        let response = request.send().await?;
        self.parse_response(response).await
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiClientError> {
        let status = response.status();
        let text = response.text().await?;
        if status.is_success() {
            Ok(serde_json::from_str::<T>(&text)?)
        } else {
            Err(ApiClientError::Status {
                status: status.as_u16(),
                body: text,
            })
        }
    }
}

#[async_trait]
impl CatalogSource for RestClient {
    async fn fetch_page(&self, request: PageRequest) -> FetchResult<ProductPage> {
        self.list_products(&request).await.map_err(FetchError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeConfig;
    use mockito::Matcher;

    fn config_for(base_url: &str) -> TuiConfig {
        TuiConfig {
            api_base_url: base_url.to_string(),
            request_timeout_ms: 2_000,
            tick_rate_ms: 250,
            log_path: "catalog-tui.log".into(),
            theme: ThemeConfig {
                name: "synthbrute".to_string(),
            },
        }
    }

    fn query(limit: &str, skip: &str) -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("limit".into(), limit.into()),
            Matcher::UrlEncoded("skip".into(), skip.into()),
        ])
    }

    #[tokio::test]
    async fn fetches_page_with_limit_and_skip() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/products")
            .match_query(query("10", "20"))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"products":[{"id":21,"title":"Dog Food","category":"groceries","price":10.99,"rating":4.02}],"total":194,"skip":20,"limit":1}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let client = RestClient::new(&config_for(&format!("{}/", server.url()))).unwrap();
        let page = client.fetch_page(PageRequest::new(10, 20)).await.unwrap();

        assert_eq!(page.products.len(), 1);
        assert_eq!(page.products[0].title, "Dog Food");
        assert!(page.products[0].brand.is_none());
        assert_eq!(page.total, Some(194));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn empty_products_is_an_empty_page() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/products")
            .match_query(query("10", "200"))
            .with_status(200)
            .with_body(r#"{"products":[],"total":194,"skip":200,"limit":0}"#)
            .create_async()
            .await;

        let client = RestClient::new(&config_for(&server.url())).unwrap();
        let page = client.fetch_page(PageRequest::new(10, 200)).await.unwrap();
        assert!(page.is_empty());
    }

    #[tokio::test]
    async fn server_error_maps_to_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/products")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("unavailable")
            .create_async()
            .await;

        let client = RestClient::new(&config_for(&server.url())).unwrap();
        let err = client.fetch_page(PageRequest::new(10, 0)).await.unwrap_err();
        assert_eq!(
            err,
            FetchError::Status {
                status: 503,
                body: "unavailable".to_string()
            }
        );
    }

    #[tokio::test]
    async fn malformed_body_maps_to_decode() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/products")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"items":[]}"#)
            .create_async()
            .await;

        let client = RestClient::new(&config_for(&server.url())).unwrap();
        let err = client.fetch_page(PageRequest::new(10, 0)).await.unwrap_err();
        assert!(matches!(err, FetchError::Decode { .. }));
    }

    #[tokio::test]
    async fn unreachable_host_maps_to_transport() {
        let client = RestClient::new(&config_for("http://127.0.0.1:9")).unwrap();
        let err = client.fetch_page(PageRequest::new(10, 0)).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }
}
