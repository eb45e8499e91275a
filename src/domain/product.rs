use serde::Serialize;

pub const TITLE_NOT_FOUND: &str = "Title not found";
pub const PRICE_NOT_AVAILABLE: &str = "Not available";
pub const NO_RATING: &str = "No rating";
pub const NO_REVIEWS: &str = "No reviews";

/// Column order of every output file.
pub const COLUMNS: [&str; 5] = [
    "Product Title",
    "Price (INR)",
    "Rating",
    "Reviews",
    "Availability",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Availability {
    Available,
    Unavailable,
}

impl Availability {
    pub fn as_str(&self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::Unavailable => "Unavailable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRecord {
    #[serde(rename = "Product Title")]
    pub title: String,
    #[serde(rename = "Price (INR)")]
    pub price: String,
    #[serde(rename = "Rating")]
    pub rating: String,
    #[serde(rename = "Reviews")]
    pub review_count: String,
    #[serde(rename = "Availability")]
    pub availability: Availability,
}

impl ProductRecord {
    pub fn is_listable(&self) -> bool {
        !self.title.is_empty() && self.price != PRICE_NOT_AVAILABLE
    }

    /// Cell values in `COLUMNS` order.
    pub fn row(&self) -> [&str; 5] {
        [
            &self.title,
            &self.price,
            &self.rating,
            &self.review_count,
            self.availability.as_str(),
        ]
    }
}

/// Drops records without a title or a price. Every candidate is traced,
/// kept or not.
pub fn retain_listable(products: Vec<ProductRecord>) -> Vec<ProductRecord> {
    products
        .into_iter()
        .filter(|p| {
            log::info!(
                "Title: {}, Price: {}, Rating: {}, Reviews: {}, Availability: {}",
                p.title,
                p.price,
                p.rating,
                p.review_count,
                p.availability.as_str()
            );
            p.is_listable()
        })
        .collect()
}
