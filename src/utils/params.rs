//! Parameter objects built from decoded `application/x-www-form-urlencoded`
//! pairs, whether they came from the query string or a POST body.
//!
//! Blank values are dropped, so `location=` reads the same as no `location`
//! at all, and the first non-blank occurrence of a repeated key wins.

/// Pairs in the order they appeared on the wire.
pub type FormPairs = Vec<(String, String)>;

fn first_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    pairs
        .iter()
        .find(|(k, v)| k == key && !v.is_empty())
        .map(|(_, v)| v.clone())
}

/// Read-path parameters from the query string. Every field is optional and
/// absence means "do not filter on this".
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReviewQuery {
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl ReviewQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            location: first_value(pairs, "location"),
            start_date: first_value(pairs, "start_date"),
            end_date: first_value(pairs, "end_date"),
        }
    }
}

/// Create-path fields from a form-encoded body.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReviewForm {
    pub location: Option<String>,
    pub review_body: Option<String>,
}

impl ReviewForm {
    pub fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            location: first_value(pairs, "Location"),
            review_body: first_value(pairs, "ReviewBody"),
        }
    }
}
