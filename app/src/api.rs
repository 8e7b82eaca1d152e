//! One-call async facade over the blog backend.
//!
//! # Design
//! `BlogApi` pairs the stateless `BlogClient` with a `Transport`: build the
//! request, execute it once, parse the response. No retries, no payload
//! validation. Transport failures become `ApiError::Network`; status mapping
//! is left entirely to the core.

use std::sync::Arc;

use blog_core::{
    ApiError, Article, ArticleCreate, ArticleUpdate, BlogClient, Category, DeleteResponse,
    HttpRequest, HttpResponse, Subscriber,
};
use tracing::{debug, warn};

use crate::config::ClientSettings;
use crate::transport::{ReqwestTransport, Transport};

#[derive(Clone)]
pub struct BlogApi {
    client: BlogClient,
    transport: Arc<dyn Transport>,
}

impl BlogApi {
    pub fn new(client: BlogClient, transport: Arc<dyn Transport>) -> Self {
        Self { client, transport }
    }

    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self::new(
            BlogClient::new(&settings.api_base()),
            Arc::new(ReqwestTransport::new()),
        )
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method.as_str();
        let path = request.path.clone();
        debug!(method, %path, "sending request");
        let response = self.transport.execute(request).await.map_err(|err| {
            warn!(method, %path, %err, "request never reached the backend");
            ApiError::Network(err.to_string())
        })?;
        debug!(method, %path, status = response.status, "response received");
        Ok(response)
    }

    // --- articles ---

    pub async fn articles(&self, category: Option<&str>) -> Result<Vec<Article>, ApiError> {
        let response = self.send(self.client.build_list_articles(category)).await?;
        self.client.parse_list_articles(response)
    }

    pub async fn featured(&self) -> Result<Vec<Article>, ApiError> {
        let response = self.send(self.client.build_list_featured()).await?;
        self.client.parse_list_featured(response)
    }

    pub async fn article(&self, id: &str) -> Result<Article, ApiError> {
        let response = self.send(self.client.build_get_article(id)).await?;
        self.client.parse_get_article(response)
    }

    pub async fn create_article(&self, input: &ArticleCreate) -> Result<Article, ApiError> {
        let response = self.send(self.client.build_create_article(input)?).await?;
        self.client.parse_create_article(response)
    }

    pub async fn update_article(&self, id: &str, input: &ArticleUpdate) -> Result<Article, ApiError> {
        let response = self.send(self.client.build_update_article(id, input)?).await?;
        self.client.parse_update_article(response)
    }

    pub async fn delete_article(&self, id: &str) -> Result<DeleteResponse, ApiError> {
        let response = self.send(self.client.build_delete_article(id)).await?;
        self.client.parse_delete_article(response)
    }

    // --- categories ---

    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let response = self.send(self.client.build_list_categories()).await?;
        self.client.parse_list_categories(response)
    }

    // --- newsletter ---

    pub async fn subscribe(&self, email: &str) -> Result<Subscriber, ApiError> {
        let response = self.send(self.client.build_subscribe(email)?).await?;
        self.client.parse_subscribe(response)
    }

    pub async fn subscribers(&self) -> Result<Vec<Subscriber>, ApiError> {
        let response = self.send(self.client.build_list_subscribers()).await?;
        self.client.parse_list_subscribers(response)
    }
}
