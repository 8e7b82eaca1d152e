//! Newsletter signup form.
//!
//! The form is the only place an email is checked: empty input is ignored
//! and a malformed address is rejected before anything is sent. While a
//! subscribe is in flight the form refuses to submit again. A successful
//! subscribe clears the input and shows a banner for `BANNER_DURATION`.

use std::sync::Arc;
use std::time::Duration;

use blog_core::{filters, ApiError};
use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::controller::{RequestSeq, Ticket};
use crate::source::NewsletterSink;

pub const BANNER_DURATION: Duration = Duration::from_secs(3);
pub const SUBSCRIBE_FAILED_MESSAGE: &str = "Failed to subscribe. Please try again.";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address.";

pub struct NewsletterForm {
    sink: Arc<dyn NewsletterSink>,
    seq: RequestSeq,
    email: String,
    in_flight: Option<Ticket>,
    subscribed_at: Option<Instant>,
    error: Option<&'static str>,
}

#[derive(Debug)]
pub struct SubmitRequest {
    ticket: Ticket,
    email: String,
}

#[derive(Debug)]
pub struct SubmitResponse {
    ticket: Ticket,
    result: Result<(), ApiError>,
}

impl SubmitRequest {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub async fn run(self, sink: &dyn NewsletterSink) -> SubmitResponse {
        let result = sink.sign_up(&self.email).await;
        SubmitResponse {
            ticket: self.ticket,
            result,
        }
    }
}

impl NewsletterForm {
    pub fn new(sink: Arc<dyn NewsletterSink>) -> Self {
        Self {
            sink,
            seq: RequestSeq::default(),
            email: String::new(),
            in_flight: None,
            subscribed_at: None,
            error: None,
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error
    }

    pub fn banner_visible(&self, now: Instant) -> bool {
        matches!(self.subscribed_at, Some(at) if now.saturating_duration_since(at) < BANNER_DURATION)
    }

    /// Drop the banner once its time is up, bringing the form back.
    pub fn expire_banner(&mut self, now: Instant) {
        if !self.banner_visible(now) {
            self.subscribed_at = None;
        }
    }

    /// Validate the input and start a subscribe. `None` means nothing was
    /// sent: the input was empty or malformed, or a submit is in flight.
    pub fn begin_submit(&mut self) -> Option<SubmitRequest> {
        if self.in_flight.is_some() {
            debug!("subscribe already in flight; ignoring submit");
            return None;
        }
        let email = self.email.trim();
        if email.is_empty() {
            return None;
        }
        if !filters::is_well_formed_email(email) {
            self.error = Some(INVALID_EMAIL_MESSAGE);
            return None;
        }

        let request = SubmitRequest {
            ticket: self.seq.issue(),
            email: email.to_string(),
        };
        self.in_flight = Some(request.ticket);
        self.error = None;
        Some(request)
    }

    /// Returns `false` if the response does not match the in-flight submit.
    pub fn apply(&mut self, response: SubmitResponse, now: Instant) -> bool {
        if self.in_flight != Some(response.ticket) || !self.seq.is_current(response.ticket) {
            return false;
        }
        self.in_flight = None;
        match response.result {
            Ok(()) => {
                info!("newsletter subscription succeeded");
                self.email.clear();
                self.subscribed_at = Some(now);
            }
            Err(err) => {
                error!(%err, "error subscribing to newsletter");
                self.error = Some(SUBSCRIBE_FAILED_MESSAGE);
            }
        }
        true
    }

    /// Submit and wait for the outcome. Returns `false` if nothing was sent.
    pub async fn submit(&mut self) -> bool {
        let Some(request) = self.begin_submit() else {
            return false;
        };
        let response = request.run(self.sink.as_ref()).await;
        self.apply(response, Instant::now())
    }

    /// Wait out the banner, then hide it.
    pub async fn dismiss_banner_after_delay(&mut self) {
        if let Some(at) = self.subscribed_at {
            tokio::time::sleep_until(at + BANNER_DURATION).await;
            self.expire_banner(Instant::now());
        }
    }
}
