//! Home page: the featured articles, fetched once.

use std::sync::Arc;

use blog_core::Article;
use tracing::{error, info};

use crate::controller::LoadState;
use crate::source::ArticleSource;

pub struct HomeController {
    source: Arc<dyn ArticleSource>,
    state: LoadState,
    featured: Vec<Article>,
}

impl HomeController {
    pub fn new(source: Arc<dyn ArticleSource>) -> Self {
        Self {
            source,
            state: LoadState::Idle,
            featured: Vec::new(),
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Empty while loading and after a failure; the page has no error banner.
    pub fn featured(&self) -> &[Article] {
        &self.featured
    }

    /// Fetch featured articles. Only the first call does anything.
    pub async fn mount(&mut self) {
        if self.state != LoadState::Idle {
            return;
        }
        self.state = LoadState::Loading;
        match self.source.featured_articles().await {
            Ok(featured) => {
                info!(count = featured.len(), "featured articles loaded");
                self.featured = featured;
                self.state = LoadState::Ready;
            }
            Err(err) => {
                error!(%err, "error fetching featured articles");
                self.featured.clear();
                self.state = LoadState::Failed;
            }
        }
    }
}
