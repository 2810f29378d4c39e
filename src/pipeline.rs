use std::{cmp::Ordering, sync::Arc};

use chrono::NaiveDateTime;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::ReviewStore,
    error::{FilterError, ValidationError},
    filter::ReviewFilter,
    models::{Review, ScoredReview, ValidLocations, TIMESTAMP_FORMAT},
    sentiment::SentimentScorer,
    utils::params::{ReviewForm, ReviewQuery},
};

/// Read path: filter, score, rank. Write path: validate, stamp, score, append.
pub struct ReviewPipeline {
    store: Arc<ReviewStore>,
    scorer: Arc<dyn SentimentScorer>,
    locations: ValidLocations,
}

impl ReviewPipeline {
    pub fn new(store: Arc<ReviewStore>, scorer: Arc<dyn SentimentScorer>, locations: ValidLocations) -> Self {
        Self {
            store,
            scorer,
            locations,
        }
    }

    pub fn store(&self) -> &Arc<ReviewStore> {
        &self.store
    }

    pub async fn read(&self, query: &ReviewQuery) -> Result<Vec<ScoredReview>, FilterError> {
        let filter = ReviewFilter::new(query, &self.locations)?;
        let filtered = self.store.filter(&filter).await?;
        Ok(self.rank(filtered))
    }

    /// Scores each review once and orders by compound score, highest first.
    /// Equal scores keep their incoming order.
    pub fn rank(&self, reviews: Vec<Review>) -> Vec<ScoredReview> {
        let mut scored: Vec<ScoredReview> = reviews
            .into_iter()
            .map(|review| ScoredReview {
                sentiment: self.scorer.score(&review.review_body),
                review,
            })
            .collect();

        scored.sort_by(|a, b| {
            b.sentiment
                .compound
                .partial_cmp(&a.sentiment.compound)
                .unwrap_or(Ordering::Equal)
        });
        scored
    }

    pub async fn create(&self, form: &ReviewForm, now: NaiveDateTime) -> Result<ScoredReview, ValidationError> {
        let (Some(location), Some(review_body)) = (
            form.location.as_deref().filter(|s| !s.is_empty()),
            form.review_body.as_deref().filter(|s| !s.is_empty()),
        ) else {
            return Err(ValidationError::MissingField);
        };

        if !self.locations.contains(location) {
            return Err(ValidationError::InvalidLocation);
        }

        let review = Review {
            review_id: Uuid::new_v4().to_string(),
            location: location.to_owned(),
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
            review_body: review_body.to_owned(),
        };
        let sentiment = self.scorer.score(&review.review_body);

        self.store.append(review.clone()).await;

        Ok(ScoredReview { review, sentiment })
    }
}

/// Pretty-printed JSON, two-space indent.
pub fn to_payload<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec_pretty(value)
}
