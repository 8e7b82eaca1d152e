//! Pure derivations over article collections: category slugs, free-text
//! search and related-article selection.
//!
//! Every function preserves the input order. Nothing here sorts.

use crate::types::Article;

/// Category id that means "no filter".
pub const ALL_CATEGORIES: &str = "all";

/// Maximum number of related articles shown under an article.
pub const RELATED_LIMIT: usize = 3;

/// Lowercase and replace each space with a hyphen.
///
/// Deliberately not a general slugifier: runs of spaces are not collapsed and
/// punctuation is kept, so `"Strength Training"` becomes `"strength-training"`
/// and must match the backend's category ids exactly.
pub fn slugify(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// True when `category_id` is the `all` sentinel or equals the article's slug.
pub fn matches_category(article: &Article, category_id: &str) -> bool {
    category_id == ALL_CATEGORIES || article.category_slug() == category_id
}

/// Case-insensitive substring match over title or excerpt.
pub fn matches_query(article: &Article, query: &str) -> bool {
    let needle = query.to_lowercase();
    article.title.to_lowercase().contains(&needle) || article.excerpt.to_lowercase().contains(&needle)
}

/// Articles matching `query`. An empty query returns everything.
pub fn search<'a>(articles: &'a [Article], query: &str) -> Vec<&'a Article> {
    if query.is_empty() {
        return articles.iter().collect();
    }
    articles.iter().filter(|a| matches_query(a, query)).collect()
}

/// Up to `RELATED_LIMIT` other articles sharing `article`'s category, in
/// collection order. Categories compare case-insensitively; ids never repeat.
pub fn related<'a>(articles: &'a [Article], article: &Article) -> Vec<&'a Article> {
    let category = article.category.to_lowercase();
    let mut picked: Vec<&Article> = Vec::with_capacity(RELATED_LIMIT);
    for candidate in articles {
        if picked.len() == RELATED_LIMIT {
            break;
        }
        if candidate.id == article.id || candidate.category.to_lowercase() != category {
            continue;
        }
        if picked.iter().any(|p| p.id == candidate.id) {
            continue;
        }
        picked.push(candidate);
    }
    picked
}

/// Shape check performed by the signup form before anything is sent.
///
/// Accepts `local@domain.tld`: exactly one `@`, no whitespace, a non-empty
/// local part and a dotted domain whose labels are non-empty.
pub fn is_well_formed_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| !label.is_empty())
}
