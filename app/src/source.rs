//! Where controllers get their data.
//!
//! Controllers only see these traits, so the same page logic runs against the
//! live backend (`BlogApi`) or the in-process `SampleStore`, and tests can
//! inject their own fixtures.

use async_trait::async_trait;
use blog_core::filters::ALL_CATEGORIES;
use blog_core::{ApiError, Article, Category, SampleStore};
use tracing::debug;

use crate::api::BlogApi;

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// `None` (or `"all"`) lists everything.
    async fn list_articles(&self, category: Option<&str>) -> Result<Vec<Article>, ApiError>;

    async fn featured_articles(&self) -> Result<Vec<Article>, ApiError>;

    /// `Ok(None)` when no article has this id.
    async fn find_article(&self, id: &str) -> Result<Option<Article>, ApiError>;

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError>;
}

#[async_trait]
pub trait NewsletterSink: Send + Sync {
    async fn sign_up(&self, email: &str) -> Result<(), ApiError>;
}

#[async_trait]
impl ArticleSource for BlogApi {
    async fn list_articles(&self, category: Option<&str>) -> Result<Vec<Article>, ApiError> {
        self.articles(category).await
    }

    async fn featured_articles(&self) -> Result<Vec<Article>, ApiError> {
        self.featured().await
    }

    async fn find_article(&self, id: &str) -> Result<Option<Article>, ApiError> {
        match self.article(id).await {
            Ok(article) => Ok(Some(article)),
            Err(ApiError::NotFound) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.categories().await
    }
}

#[async_trait]
impl NewsletterSink for BlogApi {
    async fn sign_up(&self, email: &str) -> Result<(), ApiError> {
        let subscriber = self.subscribe(email).await?;
        debug!(id = %subscriber.id, "newsletter subscription recorded");
        Ok(())
    }
}

#[async_trait]
impl ArticleSource for SampleStore {
    async fn list_articles(&self, category: Option<&str>) -> Result<Vec<Article>, ApiError> {
        let category = category.unwrap_or(ALL_CATEGORIES);
        Ok(self.filter_by_category(category).into_iter().cloned().collect())
    }

    async fn featured_articles(&self) -> Result<Vec<Article>, ApiError> {
        Ok(self.featured().into_iter().cloned().collect())
    }

    async fn find_article(&self, id: &str) -> Result<Option<Article>, ApiError> {
        Ok(self.find_by_id(id).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        Ok(self.categories().to_vec())
    }
}

#[async_trait]
impl NewsletterSink for SampleStore {
    async fn sign_up(&self, email: &str) -> Result<(), ApiError> {
        self.append_signup(email);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sample_store_serves_articles() {
        let store = SampleStore::sample().unwrap();

        assert_eq!(store.list_articles(None).await.unwrap().len(), 8);
        assert_eq!(store.list_articles(Some("all")).await.unwrap().len(), 8);

        let cardio = store.list_articles(Some("cardio")).await.unwrap();
        assert_eq!(cardio.len(), 1);
        assert_eq!(cardio[0].id, "2");

        assert_eq!(store.featured_articles().await.unwrap().len(), 2);
        assert!(store.find_article("999").await.unwrap().is_none());
        assert_eq!(store.find_article("4").await.unwrap().unwrap().id, "4");
    }

    #[tokio::test]
    async fn sample_store_logs_signups() {
        let store = SampleStore::sample().unwrap();
        store.sign_up("reader@fitlife.blog").await.unwrap();
        assert_eq!(store.signups().len(), 1);
    }
}
