//! Fixture source shared by the controller tests.

use std::sync::Mutex;

use async_trait::async_trait;
use blog_core::{ApiError, Article, Category, SampleStore};

use crate::source::{ArticleSource, NewsletterSink};

/// Serves the bundled sample data, optionally failing selected calls, and
/// records each call it receives.
pub(crate) struct FakeSource {
    store: SampleStore,
    pub(crate) fail_articles: bool,
    pub(crate) fail_featured: bool,
    pub(crate) fail_categories: bool,
    /// `list_categories` never resolves.
    pub(crate) hang_categories: bool,
    pub(crate) fail_sign_up: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub(crate) fn new() -> Self {
        Self {
            store: SampleStore::sample().unwrap(),
            fail_articles: false,
            fail_featured: false,
            fail_categories: false,
            hang_categories: false,
            fail_sign_up: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn signups(&self) -> usize {
        self.store.signups().len()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn offline() -> ApiError {
    ApiError::Network("connection refused".to_string())
}

#[async_trait]
impl ArticleSource for FakeSource {
    async fn list_articles(&self, category: Option<&str>) -> Result<Vec<Article>, ApiError> {
        self.record(format!("list_articles({})", category.unwrap_or("-")));
        if self.fail_articles {
            return Err(offline());
        }
        self.store.list_articles(category).await
    }

    async fn featured_articles(&self) -> Result<Vec<Article>, ApiError> {
        self.record("featured_articles".to_string());
        if self.fail_featured {
            return Err(offline());
        }
        self.store.featured_articles().await
    }

    async fn find_article(&self, id: &str) -> Result<Option<Article>, ApiError> {
        self.record(format!("find_article({id})"));
        if self.fail_articles {
            return Err(offline());
        }
        self.store.find_article(id).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.record("list_categories".to_string());
        if self.hang_categories {
            std::future::pending::<()>().await;
        }
        if self.fail_categories {
            return Err(offline());
        }
        self.store.list_categories().await
    }
}

#[async_trait]
impl NewsletterSink for FakeSource {
    async fn sign_up(&self, email: &str) -> Result<(), ApiError> {
        self.record(format!("sign_up({email})"));
        if self.fail_sign_up {
            return Err(offline());
        }
        self.store.sign_up(email).await
    }
}
