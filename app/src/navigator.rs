//! Maps paths to pages and mounts the page's controller on arrival.

use std::sync::Arc;

use blog_core::Route;
use tracing::debug;

use crate::controller::{DetailController, HomeController, ListingController};
use crate::source::ArticleSource;

pub enum Page {
    Home(HomeController),
    Blog(ListingController),
    Article(DetailController),
    NotFound,
}

pub struct Navigator {
    source: Arc<dyn ArticleSource>,
    route: Route,
    page: Page,
}

impl Navigator {
    pub fn new(source: Arc<dyn ArticleSource>) -> Self {
        let home = HomeController::new(Arc::clone(&source));
        Self {
            source,
            route: Route::Home,
            page: Page::Home(home),
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    /// Leave the current page and mount a fresh controller for `path`.
    pub async fn navigate(&mut self, path: &str) -> &mut Page {
        let route = Route::parse(path);
        debug!(%route, "navigating");
        let source = Arc::clone(&self.source);
        self.page = match &route {
            Route::Home => {
                let mut home = HomeController::new(source);
                home.mount().await;
                Page::Home(home)
            }
            Route::Blog => {
                let mut listing = ListingController::new(source);
                listing.mount().await;
                Page::Blog(listing)
            }
            Route::Article { id } => {
                let mut detail = DetailController::new(source);
                detail.open(id).await;
                Page::Article(detail)
            }
            Route::NotFound => Page::NotFound,
        };
        self.route = route;
        &mut self.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{testing::FakeSource, DetailView, LoadState};

    #[tokio::test]
    async fn navigates_between_pages() {
        let mut nav = Navigator::new(Arc::new(FakeSource::new()));

        match nav.navigate("/").await {
            Page::Home(home) => assert_eq!(home.featured().len(), 2),
            _ => panic!("expected home"),
        }

        match nav.navigate("/blog").await {
            Page::Blog(listing) => {
                assert_eq!(listing.state(), LoadState::Ready);
                assert_eq!(listing.visible_articles().len(), 8);
            }
            _ => panic!("expected listing"),
        }

        match nav.navigate("/article/999").await {
            Page::Article(detail) => assert_eq!(detail.view(), &DetailView::NotFound),
            _ => panic!("expected detail"),
        }
        assert_eq!(nav.route(), &Route::Article { id: "999".to_string() });

        assert!(matches!(nav.navigate("/nowhere").await, Page::NotFound));
    }

    #[tokio::test]
    async fn listing_page_stays_interactive() {
        let mut nav = Navigator::new(Arc::new(FakeSource::new()));
        nav.navigate("/blog").await;

        let Page::Blog(listing) = nav.page_mut() else {
            panic!("expected listing");
        };
        listing.change_category("recovery").await;
        let ids: Vec<&str> = listing.visible_articles().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["5"]);
    }
}
