//! HTTP client for the gift storefront API.

use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use super::model::{GoodsPage, ThemeData, ThemeList};

/// Number of products requested per page.
pub const PAGE_SIZE: u32 = 20;

/// Client for the storefront REST API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct StorefrontClient {
    client: Client,
    base_url: Url,
}

impl StorefrontClient {
    /// Creates a client for the API at `base_url`.
    ///
    /// # Errors
    ///
    /// Fails if the underlying HTTP client cannot be constructed or
    /// `base_url` is not a valid URL.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(concat!("lazygift/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so
        // that appended path segments extend the path instead of replacing
        // its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .wrap_err_with(|| format!("invalid base URL {base_url:?}"))?;

        Ok(Self { client, base_url })
    }

    /// The host (and port, if any) of the base URL, for display.
    #[must_use]
    pub fn host(&self) -> String {
        match (self.base_url.host_str(), self.base_url.port()) {
            (Some(host), Some(port)) => format!("{host}:{port}"),
            (Some(host), None) => host.to_string(),
            _ => self.base_url.to_string(),
        }
    }

    /// Fetches all themes in display order.
    ///
    /// # Errors
    ///
    /// Fails on network errors, non-2xx responses, or a response body that
    /// does not match the expected shape.
    pub async fn list_themes(&self) -> Result<Vec<ThemeData>> {
        let url = self.build_url(&["api", "v1", "themes"], &[])?;
        let list: ThemeList = self.request(url).await?;
        Ok(list.themes)
    }

    /// Fetches one page of products for a theme.
    ///
    /// `page_token` is the opaque cursor from the previous page, or `None`
    /// for the first page. The `pageToken` query parameter is only put on
    /// the wire when a cursor is passed.
    ///
    /// # Errors
    ///
    /// Fails on network errors, non-2xx responses, or a response body that
    /// does not match the expected shape.
    pub async fn list_theme_goods(
        &self,
        theme_key: &str,
        page_token: Option<&str>,
    ) -> Result<GoodsPage> {
        let page_size = PAGE_SIZE.to_string();
        let mut query = vec![("maxResults", page_size.as_str())];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let url = self.build_url(&["api", "v1", "themes", theme_key, "products"], &query)?;
        self.request(url).await
    }

    /// Builds a URL under the base URL with encoded path segments and
    /// query parameters.
    fn build_url(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| eyre!("base URL cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    async fn request<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).wrap_err_with(|| format!("unexpected response from {url}"))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(base_url: &str) -> StorefrontClient {
        StorefrontClient::new(base_url, 30).expect("client construction should not fail")
    }

    #[test]
    fn products_url_omits_page_token_on_first_page() {
        let client = test_client("http://localhost:3000");
        let url = client
            .build_url(
                &["api", "v1", "themes", "birthday", "products"],
                &[("maxResults", "20")],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/v1/themes/birthday/products?maxResults=20"
        );
    }

    #[test]
    fn trailing_slashes_do_not_double_up() {
        let client = test_client("http://localhost:3000/");
        let url = client.build_url(&["api", "v1", "themes"], &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/v1/themes");
    }

    #[test]
    fn theme_keys_are_path_encoded() {
        let client = test_client("http://localhost:3000");
        let url = client
            .build_url(&["api", "v1", "themes", "새 학기", "products"], &[])
            .unwrap();
        assert!(url.as_str().ends_with("/products"));
        assert!(!url.as_str().contains(' '));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(StorefrontClient::new("not a url", 30).is_err());
    }

    #[tokio::test]
    async fn first_page_request_sends_no_page_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/themes/birthday/products"))
            .and(query_param("maxResults", "20"))
            .and(query_param_is_missing("pageToken"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [{
                    "name": "허니버터칩",
                    "imageURL": "https://img.example.com/123.jpg",
                    "price": { "sellingPrice": 1500 },
                    "brandInfo": { "name": "해태" }
                }],
                "nextPageToken": "cursor-1"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let page = client.list_theme_goods("birthday", None).await.unwrap();
        assert_eq!(page.products.len(), 1);
        assert_eq!(page.products[0].name, "허니버터칩");
        assert_eq!(page.next_page_token.as_deref(), Some("cursor-1"));
    }

    #[tokio::test]
    async fn continuation_requests_send_the_cursor() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/themes/birthday/products"))
            .and(query_param("maxResults", "20"))
            .and(query_param("pageToken", "cursor-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": []
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let page = client
            .list_theme_goods("birthday", Some("cursor-1"))
            .await
            .unwrap();
        assert!(page.products.is_empty());
        assert!(page.next_page_token.is_none());
    }

    #[tokio::test]
    async fn lists_themes_in_response_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/themes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "themes": [
                    {
                        "key": "birthday",
                        "label": "생일",
                        "title": "생일 선물 추천",
                        "backgroundColor": "#fee500"
                    },
                    {
                        "key": "wedding",
                        "label": "웨딩",
                        "title": "웨딩 선물 추천",
                        "backgroundColor": "#a8dadc"
                    }
                ]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let themes = client.list_themes().await.unwrap();
        assert_eq!(themes.len(), 2);
        assert_eq!(themes[0].key, "birthday");
        assert_eq!(themes[1].key, "wedding");
    }

    #[tokio::test]
    async fn http_failures_surface_as_reqwest_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/themes"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.list_themes().await.unwrap_err();
        // The goods screen distinguishes HTTP failures from decode
        // failures by downcasting through the error chain.
        assert!(err.downcast_ref::<reqwest::Error>().is_some());
    }

    #[tokio::test]
    async fn malformed_bodies_are_not_reqwest_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/themes"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client.list_themes().await.unwrap_err();
        assert!(err.downcast_ref::<reqwest::Error>().is_none());
    }
}
