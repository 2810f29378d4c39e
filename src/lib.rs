//! HTTP service over an in-memory collection of customer reviews.
//!
//! `GET /` returns reviews filtered by `location`, `start_date` and `end_date`,
//! each annotated with a sentiment score and ranked by it. `POST /` accepts a
//! form-encoded `Location` and `ReviewBody`, scores the new review and appends
//! it to the store.
pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod filter;
pub mod models;
pub mod pipeline;
pub mod sentiment;
pub mod utils;
