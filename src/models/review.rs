// src/models/review.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend-assigned row identifier. Treated as opaque: the table may use
/// either a serial or a uuid key.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ReviewId {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for ReviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewId::Numeric(id) => write!(f, "{id}"),
            ReviewId::Text(id) => f.write_str(id),
        }
    }
}

/// A published review as returned by the backend.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Review {
    pub id: ReviewId,
    pub rating: i64,
    pub review_text: String,
    #[serde(default)]
    pub reviewer_name: Option<String>, // null means "Anonymous"
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

// Rows from a `timestamp` column (no time zone) are read as UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if let Ok(at) = raw.parse::<DateTime<Utc>>() {
            return Ok(at);
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(&raw, format).ok())
            .map(|naive| Utc.from_utc_datetime(&naive))
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

/// Query options for listing reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewFilter {
    pub featured_only: bool,
    /// Maximum rows to return. Zero means no cap.
    pub limit: u32,
}

impl Default for ReviewFilter {
    fn default() -> Self {
        Self {
            featured_only: false,
            limit: 50,
        }
    }
}

impl ReviewFilter {
    pub fn featured(limit: u32) -> Self {
        Self {
            featured_only: true,
            limit,
        }
    }

    pub fn all(limit: u32) -> Self {
        Self {
            featured_only: false,
            limit,
        }
    }

    /// PostgREST query string. Only approved rows, newest first.
    pub fn query(&self) -> String {
        let mut query = String::from("approved=eq.true&order=created_at.desc");
        if self.featured_only {
            query.push_str("&featured=eq.true");
        }
        if self.limit != 0 {
            query.push_str(&format!("&limit={}", self.limit));
        }
        query
    }
}

/// What a visitor submits through the review form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSubmission {
    pub rating: u8,
    pub review_text: String,
    pub reviewer_name: Option<String>,
}

/// Insert payload. The moderation flags are always false; the client can
/// never publish its own review.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    rating: u8,
    review_text: String,
    reviewer_name: Option<String>,
    approved: bool,
    featured: bool,
}

impl From<ReviewSubmission> for NewReview {
    fn from(submission: ReviewSubmission) -> Self {
        Self {
            rating: submission.rating,
            review_text: submission.review_text,
            reviewer_name: submission.reviewer_name.filter(|name| !name.is_empty()),
            approved: false,
            featured: false,
        }
    }
}
