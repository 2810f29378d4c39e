use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::{
    error::FilterError,
    models::{Review, ValidLocations},
    utils::params::ReviewQuery,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Resolved read-path predicates: location equality plus inclusive
/// midnight-to-midnight timestamp bounds.
///
/// A location outside the valid set disables the location predicate instead of
/// matching nothing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReviewFilter {
    location: Option<String>,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
}

impl ReviewFilter {
    pub fn new(query: &ReviewQuery, locations: &ValidLocations) -> Result<Self, FilterError> {
        Ok(Self {
            location: query
                .location
                .as_deref()
                .filter(|location| locations.contains(location))
                .map(str::to_owned),
            start: parse_bound("start_date", query.start_date.as_deref())?,
            end: parse_bound("end_date", query.end_date.as_deref())?,
        })
    }

    pub fn matches(&self, review: &Review) -> Result<bool, FilterError> {
        if let Some(location) = &self.location {
            if review.location != *location {
                return Ok(false);
            }
        }

        if self.start.is_none() && self.end.is_none() {
            return Ok(true);
        }

        let timestamp = review
            .parsed_timestamp()
            .map_err(|source| FilterError::InvalidTimestamp {
                review_id: review.review_id.clone(),
                timestamp: review.timestamp.clone(),
                source,
            })?;

        Ok(self.start.map_or(true, |start| timestamp >= start)
            && self.end.map_or(true, |end| timestamp <= end))
    }

    /// Keeps matching reviews in their original relative order.
    pub fn apply(&self, reviews: &[Review]) -> Result<Vec<Review>, FilterError> {
        let mut filtered = Vec::new();
        for review in reviews {
            if self.matches(review)? {
                filtered.push(review.clone());
            }
        }
        Ok(filtered)
    }
}

fn parse_bound(param: &'static str, value: Option<&str>) -> Result<Option<NaiveDateTime>, FilterError> {
    value
        .map(|value| {
            NaiveDate::parse_from_str(value, DATE_FORMAT)
                .map(|date| date.and_time(NaiveTime::MIN))
                .map_err(|source| FilterError::InvalidDate {
                    param,
                    value: value.to_owned(),
                    source,
                })
        })
        .transpose()
}
