//! Async client layer of the fitness blog.
//!
//! # Overview
//! Drives `blog_core` against a real backend: `Transport` executes the
//! core's plain-data requests, `BlogApi` turns each backend operation into a
//! single async call, and the page controllers hold fetch-driven display
//! state for home, listing, detail and the newsletter form.
//!
//! # Design
//! - Controllers depend on `ArticleSource` / `NewsletterSink`, implemented by
//!   both `BlogApi` and `blog_core::SampleStore`, so pages run with or
//!   without a network.
//! - Every controller request carries a ticket; responses to superseded
//!   requests are dropped instead of overwriting newer state.
//! - Failures are logged with `tracing` and turned into empty or not-found
//!   display state. Nothing retries.

pub mod api;
pub mod config;
pub mod controller;
pub mod navigator;
pub mod source;
pub mod telemetry;
pub mod transport;

pub use api::BlogApi;
pub use config::{load_settings, ClientSettings};
pub use controller::{
    DetailController, DetailView, HomeController, ListingController, LoadState, NewsletterForm,
    Ticket,
};
pub use navigator::{Navigator, Page};
pub use source::{ArticleSource, NewsletterSink};
pub use transport::{ReqwestTransport, Transport, TransportError};
