//! In-memory sample data for running without a backend.
//!
//! # Design
//! `SampleStore` is an ordinary value: callers construct it (from the bundled
//! data set or from their own fixtures) and hand it to whatever needs it.
//! Construction validates the category join key, so an article whose category
//! slug has no matching category id is rejected up front instead of silently
//! vanishing from filtered views later.
//!
//! Articles and categories are immutable once loaded. The only mutable part is
//! the append-only signup log, guarded by a mutex so the store can be shared.

use std::collections::HashSet;

use chrono::Utc;
use parking_lot::Mutex;

use crate::error::StoreError;
use crate::filters::{self, ALL_CATEGORIES};
use crate::types::{Article, Category, Signup};

const SAMPLE_ARTICLES: &str = include_str!("../../sample-data/articles.json");
const SAMPLE_CATEGORIES: &str = include_str!("../../sample-data/categories.json");

#[derive(Debug)]
pub struct SampleStore {
    articles: Vec<Article>,
    categories: Vec<Category>,
    signups: Mutex<Vec<Signup>>,
}

impl SampleStore {
    /// Build a store from fixtures, validating ids and category references.
    pub fn new(articles: Vec<Article>, categories: Vec<Category>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(articles.len());
        for article in &articles {
            if !seen.insert(article.id.as_str()) {
                return Err(StoreError::DuplicateId(article.id.clone()));
            }
        }

        let known: HashSet<&str> = categories
            .iter()
            .map(|c| c.id.as_str())
            .filter(|id| *id != ALL_CATEGORIES)
            .collect();
        for article in &articles {
            let slug = article.category_slug();
            if !known.contains(slug.as_str()) {
                return Err(StoreError::UnknownCategory {
                    article_id: article.id.clone(),
                    slug,
                });
            }
        }

        Ok(Self {
            articles,
            categories,
            signups: Mutex::new(Vec::new()),
        })
    }

    /// The bundled fitness data set: eight articles across five categories.
    pub fn sample() -> Result<Self, StoreError> {
        let articles = serde_json::from_str(SAMPLE_ARTICLES)
            .map_err(|e| StoreError::InvalidData(e.to_string()))?;
        let categories = serde_json::from_str(SAMPLE_CATEGORIES)
            .map_err(|e| StoreError::InvalidData(e.to_string()))?;
        Self::new(articles, categories)
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    /// `"all"` returns the full collection; anything else is compared against
    /// each article's category slug.
    pub fn filter_by_category(&self, category_id: &str) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|a| filters::matches_category(a, category_id))
            .collect()
    }

    pub fn featured(&self) -> Vec<&Article> {
        self.articles.iter().filter(|a| a.featured).collect()
    }

    /// Record a signup. Always succeeds; duplicates are kept.
    pub fn append_signup(&self, email: &str) -> bool {
        self.signups.lock().push(Signup {
            email: email.to_string(),
            date: Utc::now(),
        });
        true
    }

    pub fn signups(&self) -> Vec<Signup> {
        self.signups.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SampleStore {
        SampleStore::sample().unwrap()
    }

    fn ids(articles: &[&Article]) -> Vec<String> {
        articles.iter().map(|a| a.id.clone()).collect()
    }

    #[test]
    fn sample_data_loads_and_validates() {
        let store = store();
        assert_eq!(store.articles().len(), 8);
        assert_eq!(store.categories().len(), 6);
        assert_eq!(store.categories()[0].id, ALL_CATEGORIES);
    }

    #[test]
    fn find_by_id_hits_every_known_id() {
        let store = store();
        for article in store.articles() {
            let found = store.find_by_id(&article.id).unwrap();
            assert_eq!(found, article);
        }
    }

    #[test]
    fn find_by_id_misses_unknown_id() {
        assert!(store().find_by_id("999").is_none());
        assert!(store().find_by_id("").is_none());
    }

    #[test]
    fn filter_all_preserves_length_and_order() {
        let store = store();
        let all = store.filter_by_category(ALL_CATEGORIES);
        let expected: Vec<&Article> = store.articles().iter().collect();
        assert_eq!(all, expected);
    }

    #[test]
    fn filter_cardio_returns_single_article() {
        let store = store();
        let cardio = store.filter_by_category("cardio");
        assert_eq!(ids(&cardio), vec!["2"]);
    }

    #[test]
    fn filter_by_slug_only_returns_matches_and_is_idempotent() {
        let store = store();
        let once = store.filter_by_category("training-tips");
        assert_eq!(ids(&once), vec!["4", "6", "8"]);
        assert!(once.iter().all(|a| a.category_slug() == "training-tips"));

        let twice: Vec<&Article> = once
            .iter()
            .copied()
            .filter(|a| filters::matches_category(a, "training-tips"))
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn filter_unknown_slug_is_empty() {
        assert!(store().filter_by_category("yoga").is_empty());
    }

    #[test]
    fn featured_returns_flagged_articles_in_store_order() {
        let store = store();
        let featured = store.featured();
        assert_eq!(ids(&featured), vec!["1", "2"]);
        assert!(featured.iter().all(|a| a.featured));

        let strength_featured: Vec<&Article> = featured
            .iter()
            .copied()
            .filter(|a| filters::matches_category(a, "strength-training"))
            .collect();
        assert_eq!(ids(&strength_featured), vec!["1"]);
    }

    #[test]
    fn append_signup_keeps_duplicates() {
        let store = store();
        assert!(store.append_signup("a@b.co"));
        assert!(store.append_signup("a@b.co"));
        let log = store.signups();
        assert_eq!(log.len(), 2);
        assert!(log.iter().all(|s| s.email == "a@b.co"));
    }

    #[test]
    fn unknown_category_fails_construction() {
        let store = store();
        let mut articles = store.articles().to_vec();
        articles[0].category = "Yoga".to_string();
        let err = SampleStore::new(articles, store.categories().to_vec()).unwrap_err();
        assert_eq!(
            err,
            StoreError::UnknownCategory {
                article_id: "1".to_string(),
                slug: "yoga".to_string()
            }
        );
    }

    #[test]
    fn duplicate_id_fails_construction() {
        let store = store();
        let mut articles = store.articles().to_vec();
        articles[1].id = "1".to_string();
        let err = SampleStore::new(articles, store.categories().to_vec()).unwrap_err();
        assert_eq!(err, StoreError::DuplicateId("1".to_string()));
    }
}
