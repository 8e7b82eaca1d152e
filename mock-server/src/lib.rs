use std::{cmp::Reverse, collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

const SEED_ARTICLES: &str = include_str!("../../sample-data/articles.json");

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub author: String,
    pub publish_date: NaiveDate,
    pub read_time: String,
    pub image: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticle {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub author: String,
    pub publish_date: NaiveDate,
    pub read_time: String,
    pub image: String,
    #[serde(default)]
    pub featured: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticle {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub publish_date: Option<NaiveDate>,
    pub read_time: Option<String>,
    pub image: Option<String>,
    pub featured: Option<bool>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub count: usize,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: Uuid,
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct Subscribe {
    pub email: String,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Detail {
    pub detail: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

#[derive(Default)]
pub struct Store {
    pub articles: Vec<Article>,
    pub subscribers: Vec<Subscriber>,
}

pub type Db = Arc<RwLock<Store>>;

type Rejection = (StatusCode, Json<Detail>);

fn reject(status: StatusCode, detail: &str) -> Rejection {
    (
        status,
        Json(Detail {
            detail: detail.to_string(),
        }),
    )
}

/// The bundled fitness articles, as the backend seeds them.
pub fn seed_articles() -> Result<Vec<Article>, serde_json::Error> {
    serde_json::from_str(SEED_ARTICLES)
}

/// Router seeded with the bundled articles.
pub fn app() -> Router {
    let articles = seed_articles().unwrap_or_else(|err| {
        tracing::error!(%err, "bundled seed data is invalid; starting empty");
        Vec::new()
    });
    app_with(articles)
}

pub fn app_with(articles: Vec<Article>) -> Router {
    let db: Db = Arc::new(RwLock::new(Store {
        articles,
        subscribers: Vec::new(),
    }));
    let api = Router::new()
        .route("/articles", get(list_articles).post(create_article))
        .route("/articles/featured", get(list_featured))
        .route(
            "/articles/{id}",
            get(get_article).put(update_article).delete(delete_article),
        )
        .route("/categories", get(list_categories))
        .route("/newsletter/subscribe", post(subscribe))
        .route("/newsletter/subscribers", get(list_subscribers))
        .with_state(db);
    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// `"strength-training"` -> `"Strength Training"`.
fn slug_to_name(slug: &str) -> String {
    slug.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn newest_first(mut articles: Vec<Article>) -> Vec<Article> {
    articles.sort_by_key(|a| Reverse(a.publish_date));
    articles
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() > 1
                && domain.split('.').all(|label| !label.is_empty())
                && !email.contains(char::is_whitespace)
        }
        None => false,
    }
}

async fn list_articles(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Json<Vec<Article>> {
    let store = db.read().await;
    let articles = match params.category.as_deref().filter(|c| *c != "all") {
        Some(slug) => {
            let name = slug_to_name(slug);
            store
                .articles
                .iter()
                .filter(|a| a.category == name)
                .cloned()
                .collect()
        }
        None => store.articles.clone(),
    };
    Json(newest_first(articles))
}

async fn list_featured(State(db): State<Db>) -> Json<Vec<Article>> {
    let store = db.read().await;
    let featured = store.articles.iter().filter(|a| a.featured).cloned().collect();
    Json(newest_first(featured))
}

async fn get_article(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Article>, Rejection> {
    let store = db.read().await;
    store
        .articles
        .iter()
        .find(|a| a.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Article not found"))
}

async fn create_article(State(db): State<Db>, Json(input): Json<CreateArticle>) -> Json<Article> {
    let now = Utc::now();
    let article = Article {
        id: Uuid::new_v4().to_string(),
        title: input.title,
        excerpt: input.excerpt,
        content: input.content,
        category: input.category,
        author: input.author,
        publish_date: input.publish_date,
        read_time: input.read_time,
        image: input.image,
        featured: input.featured,
        created_at: now,
        updated_at: now,
    };
    tracing::info!(id = %article.id, "article created");
    db.write().await.articles.push(article.clone());
    Json(article)
}

async fn update_article(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateArticle>,
) -> Result<Json<Article>, Rejection> {
    let mut store = db.write().await;
    let article = store
        .articles
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Article not found"))?;
    if let Some(title) = input.title {
        article.title = title;
    }
    if let Some(excerpt) = input.excerpt {
        article.excerpt = excerpt;
    }
    if let Some(content) = input.content {
        article.content = content;
    }
    if let Some(category) = input.category {
        article.category = category;
    }
    if let Some(author) = input.author {
        article.author = author;
    }
    if let Some(publish_date) = input.publish_date {
        article.publish_date = publish_date;
    }
    if let Some(read_time) = input.read_time {
        article.read_time = read_time;
    }
    if let Some(image) = input.image {
        article.image = image;
    }
    if let Some(featured) = input.featured {
        article.featured = featured;
    }
    article.updated_at = Utc::now();
    Ok(Json(article.clone()))
}

async fn delete_article(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Message>, Rejection> {
    let mut store = db.write().await;
    let before = store.articles.len();
    store.articles.retain(|a| a.id != id);
    if store.articles.len() == before {
        return Err(reject(StatusCode::NOT_FOUND, "Article not found"));
    }
    Ok(Json(Message {
        message: "Article deleted successfully".to_string(),
    }))
}

async fn list_categories(State(db): State<Db>) -> Json<Vec<Category>> {
    let store = db.read().await;
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for article in &store.articles {
        *counts.entry(article.category.as_str()).or_default() += 1;
    }
    let mut categories = vec![Category {
        id: "all".to_string(),
        name: "All Articles".to_string(),
        count: store.articles.len(),
    }];
    categories.extend(counts.into_iter().map(|(name, count)| Category {
        id: name.to_lowercase().replace(' ', "-"),
        name: name.to_string(),
        count,
    }));
    Json(categories)
}

async fn subscribe(
    State(db): State<Db>,
    Json(input): Json<Subscribe>,
) -> Result<Json<Subscriber>, Rejection> {
    if !looks_like_email(&input.email) {
        return Err(reject(
            StatusCode::UNPROCESSABLE_ENTITY,
            "value is not a valid email address",
        ));
    }
    let mut store = db.write().await;
    if let Some(existing) = store.subscribers.iter().find(|s| s.email == input.email) {
        return Ok(Json(existing.clone()));
    }
    let subscriber = Subscriber {
        id: Uuid::new_v4(),
        email: input.email,
        subscribed_at: Utc::now(),
    };
    store.subscribers.push(subscriber.clone());
    Ok(Json(subscriber))
}

async fn list_subscribers(State(db): State<Db>) -> Json<Vec<Subscriber>> {
    let store = db.read().await;
    let mut subscribers = store.subscribers.clone();
    subscribers.sort_by_key(|s| Reverse(s.subscribed_at));
    Json(subscribers)
}
