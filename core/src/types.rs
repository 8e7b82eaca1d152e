//! Domain DTOs for the blog API.
//!
//! # Design
//! These types mirror the backend's JSON schema (camelCase field names) but
//! are defined independently of the mock-server crate. Integration tests
//! catch any schema drift between the two.
//!
//! Dates are lenient on the way in: the backend has shipped bare dates,
//! naive ISO datetimes and RFC 3339 timestamps for the same field. They are
//! always written back as the canonical form.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single article as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    /// Display name of the category, e.g. "Strength Training".
    pub category: String,
    pub author: String,
    #[serde(with = "publish_date")]
    pub publish_date: NaiveDate,
    /// Free-text label such as "8 min read".
    pub read_time: String,
    pub image: String,
    #[serde(default)]
    pub featured: bool,
}

impl Article {
    /// Slug derived from the category display name.
    pub fn category_slug(&self) -> String {
        crate::filters::slugify(&self.category)
    }
}

/// Request payload for creating a new article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleCreate {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    pub author: String,
    #[serde(with = "publish_date")]
    pub publish_date: NaiveDate,
    pub read_time: String,
    pub image: String,
    #[serde(default)]
    pub featured: bool,
}

/// Request payload for updating an existing article. Only the fields present
/// in the JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "optional_publish_date"
    )]
    pub publish_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

/// A category entry. `count` is denormalized by the backend and only read here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub count: u32,
}

/// Body of `POST /newsletter/subscribe`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscribeRequest {
    pub email: String,
}

/// A newsletter subscriber record held by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: String,
    pub email: String,
    #[serde(with = "timestamp")]
    pub subscribed_at: DateTime<Utc>,
}

/// Entry in the in-process signup log used when no backend is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signup {
    pub email: String,
    pub date: DateTime<Utc>,
}

/// Acknowledgement returned by `DELETE /articles/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResponse {
    pub message: String,
}

mod publish_date {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub(super) const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid publish date: {raw}")))
    }

    pub(super) fn parse(raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw, FORMAT)
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|dt| dt.date())
            })
    }
}

mod optional_publish_date {
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &Option<NaiveDate>, s: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => s.collect_str(&date.format(super::publish_date::FORMAT)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(d)? {
            Some(raw) => super::publish_date::parse(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid publish date: {raw}"))),
            None => Ok(None),
        }
    }
}

mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(at: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Naive timestamps are taken to be UTC.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|_| {
                NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.and_utc())
            })
            .map_err(|_| D::Error::custom(format!("invalid timestamp: {raw}")))
    }
}
