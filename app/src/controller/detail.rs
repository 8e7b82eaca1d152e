//! Article detail page: one article plus up to three related ones.
//!
//! Any failure to load the article, a real 404 or a transport error alike,
//! ends in `DetailView::NotFound`. The cause is only visible in the logs.

use std::sync::Arc;

use blog_core::{filters, ApiError, Article, Route};
use tracing::{debug, info, warn};

use crate::controller::{RequestSeq, Ticket};
use crate::source::ArticleSource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    Idle,
    Loading,
    Found {
        article: Article,
        related: Vec<Article>,
    },
    /// Terminal: the page offers a link back to the listing, no retry.
    NotFound,
}

pub struct DetailController {
    source: Arc<dyn ArticleSource>,
    seq: RequestSeq,
    view: DetailView,
}

#[derive(Debug)]
pub struct DetailRequest {
    ticket: Ticket,
    id: String,
}

#[derive(Debug)]
pub struct DetailResponse {
    ticket: Ticket,
    id: String,
    outcome: Result<Option<(Article, Vec<Article>)>, ApiError>,
}

impl DetailRequest {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub async fn run(self, source: &dyn ArticleSource) -> DetailResponse {
        let outcome = match source.find_article(&self.id).await {
            Ok(Some(article)) => {
                let related = load_related(source, &article).await;
                Ok(Some((article, related)))
            }
            Ok(None) => Ok(None),
            Err(err) => Err(err),
        };
        DetailResponse {
            ticket: self.ticket,
            id: self.id,
            outcome,
        }
    }
}

/// Related articles come from the full collection so that "collection order"
/// is the source's order. A failure here only costs the related strip.
async fn load_related(source: &dyn ArticleSource, article: &Article) -> Vec<Article> {
    match source.list_articles(None).await {
        Ok(all) => filters::related(&all, article).into_iter().cloned().collect(),
        Err(err) => {
            warn!(id = %article.id, %err, "error fetching related articles");
            Vec::new()
        }
    }
}

impl DetailController {
    pub fn new(source: Arc<dyn ArticleSource>) -> Self {
        Self {
            source,
            seq: RequestSeq::default(),
            view: DetailView::Idle,
        }
    }

    pub fn source(&self) -> Arc<dyn ArticleSource> {
        Arc::clone(&self.source)
    }

    pub fn view(&self) -> &DetailView {
        &self.view
    }

    /// Where the not-found card and the back button lead.
    pub fn back_route(&self) -> Route {
        Route::Blog
    }

    pub fn begin_open(&mut self, id: &str) -> DetailRequest {
        let ticket = self.seq.issue();
        self.view = DetailView::Loading;
        debug!(seq = ticket.seq(), id, "opening article");
        DetailRequest {
            ticket,
            id: id.to_string(),
        }
    }

    /// Returns `false` when the response belongs to a superseded navigation.
    pub fn apply(&mut self, response: DetailResponse) -> bool {
        if !self.seq.is_current(response.ticket) {
            debug!(seq = response.ticket.seq(), id = %response.id, "discarding stale article response");
            return false;
        }
        self.view = match response.outcome {
            Ok(Some((article, related))) => DetailView::Found { article, related },
            Ok(None) => {
                info!(id = %response.id, "article not found");
                DetailView::NotFound
            }
            Err(err) => {
                warn!(id = %response.id, %err, "error fetching article; showing not found");
                DetailView::NotFound
            }
        };
        true
    }

    pub async fn open(&mut self, id: &str) -> bool {
        let request = self.begin_open(id);
        let response = request.run(self.source.as_ref()).await;
        self.apply(response)
    }
}
