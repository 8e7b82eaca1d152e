//! Article listing: category sidebar, category-scoped fetches and client-side
//! search over whatever set was fetched last.
//!
//! # Design
//! A fetch is split into three steps so that overlapping requests can be
//! observed and resolved:
//! 1. `begin_mount` / `select_category` update the inputs and issue a ticket,
//!    returning an `ArticlesRequest` (plus a `CategoriesRequest` on mount).
//! 2. `run` performs the I/O against a source and borrows nothing from the
//!    controller, so several requests may be in flight at once.
//! 3. `apply` installs articles only if their ticket is still current;
//!    `apply_categories` fills the sidebar.
//!
//! On mount both fetches run concurrently. The grid waits only for the
//! articles; the sidebar waits for the categories.
//!
//! `mount` and `change_category` chain the three for the common case.
//! Search never fetches and never touches the category filter.

use std::collections::HashSet;
use std::sync::Arc;

use blog_core::filters::{self, ALL_CATEGORIES};
use blog_core::{ApiError, Article, Category};
use tracing::{debug, error, info, warn};

use crate::controller::{LoadState, RequestSeq, Ticket};
use crate::source::ArticleSource;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load articles.";

pub struct ListingController {
    source: Arc<dyn ArticleSource>,
    seq: RequestSeq,
    state: LoadState,
    articles: Vec<Article>,
    categories: Vec<Category>,
    active_category: String,
    query: String,
    error: Option<&'static str>,
}

/// A pending article fetch, detached from the controller.
#[derive(Debug)]
pub struct ArticlesRequest {
    ticket: Ticket,
    category: Option<String>,
}

#[derive(Debug)]
pub struct ArticlesResponse {
    ticket: Ticket,
    category: Option<String>,
    articles: Result<Vec<Article>, ApiError>,
}

/// The sidebar fetch issued on mount. Categories do not depend on the
/// filter, so it carries no ticket.
#[derive(Debug)]
pub struct CategoriesRequest(());

#[derive(Debug)]
pub struct CategoriesResponse {
    categories: Result<Vec<Category>, ApiError>,
}

impl ArticlesRequest {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub async fn run(self, source: &dyn ArticleSource) -> ArticlesResponse {
        let articles = source.list_articles(self.category.as_deref()).await;
        ArticlesResponse {
            ticket: self.ticket,
            category: self.category,
            articles,
        }
    }
}

impl CategoriesRequest {
    pub async fn run(self, source: &dyn ArticleSource) -> CategoriesResponse {
        CategoriesResponse {
            categories: source.list_categories().await,
        }
    }
}

impl ListingController {
    pub fn new(source: Arc<dyn ArticleSource>) -> Self {
        Self {
            source,
            seq: RequestSeq::default(),
            state: LoadState::Idle,
            articles: Vec::new(),
            categories: Vec::new(),
            active_category: ALL_CATEGORIES.to_string(),
            query: String::new(),
            error: None,
        }
    }

    pub fn source(&self) -> Arc<dyn ArticleSource> {
        Arc::clone(&self.source)
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn active_category(&self) -> &str {
        &self.active_category
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Generic message shown in place of the grid after a failed fetch.
    pub fn error_message(&self) -> Option<&'static str> {
        self.error
    }

    /// The latest fetched set, narrowed by the search query.
    pub fn visible_articles(&self) -> Vec<&Article> {
        filters::search(&self.articles, &self.query)
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn begin_mount(&mut self) -> (ArticlesRequest, CategoriesRequest) {
        self.active_category = ALL_CATEGORIES.to_string();
        (self.begin(None), CategoriesRequest(()))
    }

    /// Switch the category filter and issue a fetch scoped to it. Any
    /// earlier fetch still in flight is superseded.
    pub fn select_category(&mut self, category_id: &str) -> ArticlesRequest {
        self.active_category = category_id.to_string();
        let category = (category_id != ALL_CATEGORIES).then(|| category_id.to_string());
        self.begin(category)
    }

    fn begin(&mut self, category: Option<String>) -> ArticlesRequest {
        let ticket = self.seq.issue();
        self.state = LoadState::Loading;
        debug!(seq = ticket.seq(), category = category.as_deref().unwrap_or(ALL_CATEGORIES), "fetching articles");
        ArticlesRequest { ticket, category }
    }

    /// Install an article response. Returns `false` when it was discarded
    /// because a newer request has been issued since.
    pub fn apply(&mut self, response: ArticlesResponse) -> bool {
        let category = response.category.as_deref().unwrap_or(ALL_CATEGORIES);
        if !self.seq.is_current(response.ticket) {
            debug!(seq = response.ticket.seq(), category, "discarding stale article response");
            return false;
        }

        match response.articles {
            Ok(articles) => {
                info!(count = articles.len(), category, "articles loaded");
                self.articles = articles;
                self.state = LoadState::Ready;
                self.error = None;
            }
            Err(err) => {
                error!(%err, category, "error fetching articles");
                self.articles.clear();
                self.state = LoadState::Failed;
                self.error = Some(LOAD_FAILED_MESSAGE);
            }
        }
        self.warn_on_unknown_categories();
        true
    }

    /// Fill the sidebar. A failure leaves it empty and the grid untouched.
    pub fn apply_categories(&mut self, response: CategoriesResponse) {
        match response.categories {
            Ok(categories) => {
                debug!(count = categories.len(), "categories loaded");
                self.categories = categories;
                self.warn_on_unknown_categories();
            }
            Err(err) => warn!(%err, "error fetching categories"),
        }
    }

    /// Articles whose category matches no sidebar entry can never be reached
    /// through the filter; surface that instead of letting them vanish.
    fn warn_on_unknown_categories(&self) {
        if self.categories.is_empty() {
            return;
        }
        let known: HashSet<&str> = self.categories.iter().map(|c| c.id.as_str()).collect();
        for article in &self.articles {
            let slug = article.category_slug();
            if !known.contains(slug.as_str()) {
                warn!(id = %article.id, %slug, "article category has no matching category id");
            }
        }
    }

    /// Fetch articles and categories concurrently. The grid is installed as
    /// soon as the articles land; this returns once both have settled.
    pub async fn mount(&mut self) -> bool {
        let (articles, categories) = self.begin_mount();
        let source = Arc::clone(&self.source);
        let articles = articles.run(source.as_ref());
        let categories = categories.run(source.as_ref());
        tokio::pin!(articles, categories);

        let mut applied = None;
        let mut sidebar_done = false;
        while applied.is_none() || !sidebar_done {
            tokio::select! {
                response = &mut articles, if applied.is_none() => {
                    applied = Some(self.apply(response));
                }
                response = &mut categories, if !sidebar_done => {
                    self.apply_categories(response);
                    sidebar_done = true;
                }
            }
        }
        applied.unwrap_or(false)
    }

    pub async fn change_category(&mut self, category_id: &str) -> bool {
        let request = self.select_category(category_id);
        let response = request.run(self.source.as_ref()).await;
        self.apply(response)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::controller::testing::FakeSource;

    fn ids(articles: &[&Article]) -> Vec<String> {
        articles.iter().map(|a| a.id.clone()).collect()
    }

    #[tokio::test]
    async fn mount_fetches_articles_and_categories() {
        let source = Arc::new(FakeSource::new());
        let mut listing = ListingController::new(source.clone());

        assert!(listing.mount().await);

        assert_eq!(listing.state(), LoadState::Ready);
        assert_eq!(listing.visible_articles().len(), 8);
        assert_eq!(listing.categories().len(), 6);
        assert_eq!(listing.active_category(), "all");

        let mut calls = source.calls();
        calls.sort();
        assert_eq!(calls, vec!["list_articles(-)", "list_categories"]);
    }

    #[tokio::test]
    async fn selecting_cardio_returns_single_article() {
        let mut listing = ListingController::new(Arc::new(FakeSource::new()));
        listing.mount().await;

        assert!(listing.change_category("cardio").await);

        assert_eq!(listing.active_category(), "cardio");
        assert_eq!(ids(&listing.visible_articles()), vec!["2"]);
    }

    #[tokio::test]
    async fn selecting_all_fetches_unfiltered() {
        let source = Arc::new(FakeSource::new());
        let mut listing = ListingController::new(source.clone());
        listing.change_category("nutrition").await;
        listing.change_category("all").await;

        assert_eq!(listing.visible_articles().len(), 8);
        assert_eq!(source.calls().last().map(String::as_str), Some("list_articles(-)"));
    }

    #[tokio::test]
    async fn search_filters_without_fetching_or_resetting_category() {
        let source = Arc::new(FakeSource::new());
        let mut listing = ListingController::new(source.clone());
        listing.mount().await;
        listing.change_category("training-tips").await;
        let calls_before = source.calls().len();

        listing.set_query("HOME");
        assert_eq!(ids(&listing.visible_articles()), vec!["8"]);
        assert_eq!(listing.active_category(), "training-tips");
        assert_eq!(source.calls().len(), calls_before);

        listing.set_query("");
        assert_eq!(ids(&listing.visible_articles()), vec!["4", "6", "8"]);
    }

    #[tokio::test]
    async fn search_survives_category_change() {
        let mut listing = ListingController::new(Arc::new(FakeSource::new()));
        listing.mount().await;
        listing.set_query("training");

        listing.change_category("strength-training").await;

        assert_eq!(listing.query(), "training");
        assert_eq!(ids(&listing.visible_articles()), vec!["7"]);
    }

    #[tokio::test]
    async fn stale_response_is_discarded() {
        let mut listing = ListingController::new(Arc::new(FakeSource::new()));
        let source = listing.source();

        let older = listing.select_category("cardio");
        let newer = listing.select_category("nutrition");
        assert!(newer.ticket() > older.ticket());
        assert!(listing.is_loading());

        // The newer request lands first, then the slower older one.
        let newer = newer.run(source.as_ref()).await;
        let older = older.run(source.as_ref()).await;
        assert!(listing.apply(newer));
        assert!(!listing.apply(older));

        assert_eq!(listing.active_category(), "nutrition");
        assert_eq!(ids(&listing.visible_articles()), vec!["3"]);
        assert_eq!(listing.state(), LoadState::Ready);
    }

    #[tokio::test]
    async fn superseded_response_keeps_loading_state() {
        let mut listing = ListingController::new(Arc::new(FakeSource::new()));
        let source = listing.source();

        let older = listing.select_category("cardio");
        let _pending = listing.select_category("recovery");

        let older = older.run(source.as_ref()).await;
        assert!(!listing.apply(older));
        assert!(listing.is_loading());
        assert!(listing.visible_articles().is_empty());
    }

    #[tokio::test]
    async fn superseded_mount_still_fills_sidebar() {
        let mut listing = ListingController::new(Arc::new(FakeSource::new()));
        let source = listing.source();

        let (mount, sidebar) = listing.begin_mount();
        let select = listing.select_category("cardio");

        let select = select.run(source.as_ref()).await;
        let mount = mount.run(source.as_ref()).await;
        assert!(listing.apply(select));
        assert!(!listing.apply(mount));
        listing.apply_categories(sidebar.run(source.as_ref()).await);

        assert_eq!(listing.categories().len(), 6);
        assert_eq!(ids(&listing.visible_articles()), vec!["2"]);
    }

    #[tokio::test]
    async fn article_failure_shows_generic_message() {
        let mut source = FakeSource::new();
        source.fail_articles = true;
        let mut listing = ListingController::new(Arc::new(source));

        listing.mount().await;

        assert_eq!(listing.state(), LoadState::Failed);
        assert!(listing.visible_articles().is_empty());
        assert_eq!(listing.error_message(), Some(LOAD_FAILED_MESSAGE));
        assert_eq!(listing.categories().len(), 6);
    }

    #[tokio::test]
    async fn category_failure_leaves_grid_usable() {
        let mut source = FakeSource::new();
        source.fail_categories = true;
        let mut listing = ListingController::new(Arc::new(source));

        listing.mount().await;

        assert_eq!(listing.state(), LoadState::Ready);
        assert_eq!(listing.visible_articles().len(), 8);
        assert!(listing.categories().is_empty());
        assert!(listing.error_message().is_none());
    }

    #[tokio::test]
    async fn success_after_failure_clears_message() {
        let mut listing = ListingController::new(Arc::new(FakeSource::new()));
        let failed = ArticlesResponse {
            ticket: listing.select_category("cardio").ticket(),
            category: Some("cardio".to_string()),
            articles: Err(ApiError::Server {
                status: 500,
                body: String::new(),
            }),
        };
        assert!(listing.apply(failed));
        assert_eq!(listing.error_message(), Some(LOAD_FAILED_MESSAGE));

        listing.change_category("cardio").await;
        assert!(listing.error_message().is_none());
        assert_eq!(listing.state(), LoadState::Ready);
    }

    #[tokio::test(start_paused = true)]
    async fn grid_does_not_wait_for_categories() {
        let mut source = FakeSource::new();
        source.hang_categories = true;
        let mut listing = ListingController::new(Arc::new(source));

        let settled = tokio::time::timeout(Duration::from_millis(500), listing.mount()).await;

        assert!(settled.is_err());
        assert_eq!(listing.state(), LoadState::Ready);
        assert_eq!(listing.visible_articles().len(), 8);
        assert!(listing.categories().is_empty());
    }

    #[tokio::test]
    async fn sidebar_fills_after_grid() {
        let mut listing = ListingController::new(Arc::new(FakeSource::new()));
        let source = listing.source();

        let (articles, sidebar) = listing.begin_mount();
        assert!(listing.apply(articles.run(source.as_ref()).await));
        assert_eq!(listing.state(), LoadState::Ready);
        assert!(listing.categories().is_empty());

        listing.apply_categories(sidebar.run(source.as_ref()).await);
        assert_eq!(listing.categories().len(), 6);
        assert_eq!(listing.state(), LoadState::Ready);
    }

    #[tokio::test]
    async fn unknown_category_slug_yields_empty_grid() {
        let mut listing = ListingController::new(Arc::new(FakeSource::new()));
        listing.mount().await;

        listing.change_category("yoga").await;

        assert_eq!(listing.state(), LoadState::Ready);
        assert!(listing.visible_articles().is_empty());
    }
}
