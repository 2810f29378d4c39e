//! In-memory review store.
//!
//! Rows are bulk loaded once from CSV at startup and afterwards only ever
//! appended to. Every access goes through one async mutex, so a scan sees the
//! store either before or after an append and never in between.
use std::{io::Read, path::Path};

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::{
    error::{FilterError, LoadError},
    filter::ReviewFilter,
    models::Review,
};

#[derive(Debug, Default)]
pub struct ReviewStore {
    reviews: Mutex<Vec<Review>>,
}

impl ReviewStore {
    pub fn new(reviews: Vec<Review>) -> Self {
        Self {
            reviews: Mutex::new(reviews),
        }
    }

    /// Bulk load from a headed CSV file (`ReviewId,Location,Timestamp,ReviewBody`).
    /// Rows are trusted and not re-validated.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let reader = csv::Reader::from_path(path).map_err(|source| LoadError {
            path: path.to_path_buf(),
            source,
        })?;
        let reviews = read_reviews(reader).map_err(|source| LoadError {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Loaded {} reviews from {}", reviews.len(), path.display());
        Ok(Self::new(reviews))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        read_reviews(csv::Reader::from_reader(reader)).map(Self::new)
    }

    /// Runs the filter under the lock and returns owned copies of the matches.
    pub async fn filter(&self, filter: &ReviewFilter) -> Result<Vec<Review>, FilterError> {
        let reviews = self.reviews.lock().await;
        let filtered = filter.apply(&reviews)?;
        debug!("Filter kept {} of {} reviews", filtered.len(), reviews.len());
        Ok(filtered)
    }

    pub async fn append(&self, review: Review) {
        let mut reviews = self.reviews.lock().await;
        debug!("Appending review {}", review.review_id);
        reviews.push(review);
    }

    pub async fn len(&self) -> usize {
        self.reviews.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reviews.lock().await.is_empty()
    }
}

fn read_reviews<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<Review>, csv::Error> {
    reader.deserialize().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::ValidLocations, utils::params::ReviewQuery};
    use std::{io::Write, sync::Arc};

    const CSV: &str = "ReviewId,Location,Timestamp,ReviewBody,Extra\n\
        r1,\"Denver, Colorado\",2021-03-14 09:12:45,\"Great food, friendly staff\",x\n\
        r2,\"Nowhere, Land\",2021-06-02 18:40:03,Cold fries,y\n";

    fn review(id: &str) -> Review {
        Review {
            review_id: id.into(),
            location: "Denver, Colorado".into(),
            timestamp: "2022-05-01 10:00:00".into(),
            review_body: "fine".into(),
        }
    }

    #[tokio::test]
    async fn loads_rows_without_validation() {
        let store = ReviewStore::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(store.len().await, 2);

        let all = store.filter(&ReviewFilter::default()).await.unwrap();
        assert_eq!(all[0].review_body, "Great food, friendly staff");
        // Untrusted-looking locations still load.
        assert_eq!(all[1].location, "Nowhere, Land");
    }

    #[tokio::test]
    async fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();

        let store = ReviewStore::load_csv(file.path()).unwrap();
        assert_eq!(store.len().await, 2);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ReviewStore::load_csv("does/not/exist.csv").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.csv"));
    }

    #[test]
    fn missing_column_is_an_error() {
        let csv = "ReviewId,Location,Timestamp\nr1,Denver,2021-03-14 09:12:45\n";
        assert!(ReviewStore::from_reader(csv.as_bytes()).is_err());
    }

    #[tokio::test]
    async fn append_is_visible_to_later_scans() {
        let store = ReviewStore::default();
        assert!(store.is_empty().await);

        store.append(review("r1")).await;
        store.append(review("r2")).await;

        let filter = ReviewFilter::new(
            &ReviewQuery {
                location: Some("Denver, Colorado".into()),
                ..ReviewQuery::default()
            },
            &ValidLocations::default(),
        )
        .unwrap();
        let ids: Vec<_> = store
            .filter(&filter)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.review_id)
            .collect();
        assert_eq!(ids, vec!["r1", "r2"]);
    }

    #[tokio::test]
    async fn concurrent_appends_are_not_lost() {
        let store = Arc::new(ReviewStore::default());
        let mut handles = Vec::new();
        for i in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.append(review(&format!("r{i}"))).await;
                store.filter(&ReviewFilter::default()).await.unwrap().len()
            }));
        }
        for handle in handles {
            let seen = handle.await.unwrap();
            assert!((1..=32).contains(&seen));
        }
        assert_eq!(store.len().await, 32);
    }
}
