use std::collections::HashSet;

const DEFAULT_LOCATIONS: [&str; 18] = [
    "Albuquerque, New Mexico",
    "Carlsbad, California",
    "Chula Vista, California",
    "Colorado Springs, Colorado",
    "Denver, Colorado",
    "El Cajon, California",
    "El Paso, Texas",
    "Escondido, California",
    "Fresno, California",
    "La Mesa, California",
    "Las Vegas, Nevada",
    "Los Angeles, California",
    "Oceanside, California",
    "Phoenix, Arizona",
    "Sacramento, California",
    "Salt Lake City, Utah",
    "San Diego, California",
    "Tucson, Arizona",
];

/// Closed set of "City, Region" strings a review may be filed under.
/// Membership is exact string equality.
#[derive(Debug, Clone)]
pub struct ValidLocations {
    locations: HashSet<String>,
}

impl ValidLocations {
    pub fn new<I, S>(locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            locations: locations.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, location: &str) -> bool {
        self.locations.contains(location)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

impl Default for ValidLocations {
    fn default() -> Self {
        Self::new(DEFAULT_LOCATIONS)
    }
}
