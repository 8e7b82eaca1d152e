//! Stateless HTTP request builder and response parser for the blog API.
//!
//! # Design
//! `BlogClient` holds only the API base URL (e.g. `http://host/api`) and
//! carries no mutable state between calls. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The caller executes the round trip,
//! keeping this layer deterministic and free of I/O dependencies.
//!
//! Payloads pass through untouched: no validation, no reshaping.

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::{form_urlencoded, Url};

use crate::error::ApiError;
use crate::filters::ALL_CATEGORIES;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    Article, ArticleCreate, ArticleUpdate, Category, DeleteResponse, SubscribeRequest, Subscriber,
};

/// Synchronous, stateless client for the blog API.
#[derive(Debug, Clone)]
pub struct BlogClient {
    base_url: String,
}

impl BlogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // --- articles ---

    /// `None` and `Some("all")` both list every article.
    pub fn build_list_articles(&self, category: Option<&str>) -> HttpRequest {
        let path = match category.filter(|c| *c != ALL_CATEGORIES) {
            Some(slug) => {
                let query: String = form_urlencoded::Serializer::new(String::new())
                    .append_pair("category", slug)
                    .finish();
                format!("{}/articles?{query}", self.base_url)
            }
            None => format!("{}/articles", self.base_url),
        };
        self.get(path)
    }

    /// `id` is percent-encoded as a single path segment.
    fn article_url(&self, id: &str) -> String {
        let collection = format!("{}/articles", self.base_url);
        match Url::parse(&collection) {
            Ok(mut url) => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.push(id);
                }
                url.into()
            }
            // Relative bases cannot be parsed; join them as-is.
            Err(_) => format!("{collection}/{id}"),
        }
    }

    pub fn build_list_featured(&self) -> HttpRequest {
        self.get(format!("{}/articles/featured", self.base_url))
    }

    pub fn build_get_article(&self, id: &str) -> HttpRequest {
        self.get(self.article_url(id))
    }

    pub fn build_create_article(&self, input: &ArticleCreate) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Post, format!("{}/articles", self.base_url), input)
    }

    pub fn build_update_article(&self, id: &str, input: &ArticleUpdate) -> Result<HttpRequest, ApiError> {
        self.with_json(HttpMethod::Put, self.article_url(id), input)
    }

    pub fn build_delete_article(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.article_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_articles(&self, response: HttpResponse) -> Result<Vec<Article>, ApiError> {
        decode(response)
    }

    pub fn parse_list_featured(&self, response: HttpResponse) -> Result<Vec<Article>, ApiError> {
        decode(response)
    }

    pub fn parse_get_article(&self, response: HttpResponse) -> Result<Article, ApiError> {
        decode(response)
    }

    pub fn parse_create_article(&self, response: HttpResponse) -> Result<Article, ApiError> {
        decode(response)
    }

    pub fn parse_update_article(&self, response: HttpResponse) -> Result<Article, ApiError> {
        decode(response)
    }

    pub fn parse_delete_article(&self, response: HttpResponse) -> Result<DeleteResponse, ApiError> {
        decode(response)
    }

    // --- categories ---

    pub fn build_list_categories(&self) -> HttpRequest {
        self.get(format!("{}/categories", self.base_url))
    }

    pub fn parse_list_categories(&self, response: HttpResponse) -> Result<Vec<Category>, ApiError> {
        decode(response)
    }

    // --- newsletter ---

    pub fn build_subscribe(&self, email: &str) -> Result<HttpRequest, ApiError> {
        let body = SubscribeRequest {
            email: email.to_string(),
        };
        self.with_json(
            HttpMethod::Post,
            format!("{}/newsletter/subscribe", self.base_url),
            &body,
        )
    }

    pub fn build_list_subscribers(&self) -> HttpRequest {
        self.get(format!("{}/newsletter/subscribers", self.base_url))
    }

    pub fn parse_subscribe(&self, response: HttpResponse) -> Result<Subscriber, ApiError> {
        decode(response)
    }

    pub fn parse_list_subscribers(&self, response: HttpResponse) -> Result<Vec<Subscriber>, ApiError> {
        decode(response)
    }

    fn get(&self, path: String) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    fn with_json<T: Serialize>(
        &self,
        method: HttpMethod,
        path: String,
        input: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    match response.status {
        404 => Err(ApiError::NotFound),
        422 => Err(ApiError::Validation(response.body.clone())),
        status => Err(ApiError::Server {
            status,
            body: response.body.clone(),
        }),
    }
}
