// src/models/review.rs
use chrono::{NaiveDateTime, ParseResult};
use serde::{Deserialize, Serialize};

use crate::sentiment::SentimentScore;

/// Textual format every stored `Timestamp` uses.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct Review {
    pub review_id: String,   // Unique key, uuid v4 for reviews created over HTTP
    pub location: String,    // "City, Region"
    pub timestamp: String,   // TIMESTAMP_FORMAT
    pub review_body: String, // Free text fed to the scorer
}

impl Review {
    pub fn parsed_timestamp(&self) -> ParseResult<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT)
    }
}

/// A review decorated with the sentiment computed for the current response.
/// Never written back to the store.
#[derive(Serialize, Debug, Clone)]
pub struct ScoredReview {
    #[serde(flatten)]
    pub review: Review,
    pub sentiment: SentimentScore,
}
