pub mod location;
pub mod review;

pub use location::ValidLocations;
pub use review::{Review, ScoredReview, TIMESTAMP_FORMAT};
