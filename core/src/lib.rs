//! Synchronous core of the fitness blog client.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values for the blog
//! backend without touching the network (host-does-IO pattern), and holds
//! the pure pieces every page needs: the sample data store, category slugs,
//! search and related-article selection, and route parsing.
//!
//! # Design
//! - `BlogClient` is stateless; it holds only the API base URL.
//! - Each backend operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - `SampleStore` is an explicitly constructed value validated at load time,
//!   not process-wide state.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod filters;
pub mod http;
pub mod route;
pub mod store;
pub mod types;

pub use client::BlogClient;
pub use error::{ApiError, StoreError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use route::Route;
pub use store::SampleStore;
pub use types::{
    Article, ArticleCreate, ArticleUpdate, Category, DeleteResponse, Signup, SubscribeRequest,
    Subscriber,
};
