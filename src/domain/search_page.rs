use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::product::{
    Availability, ProductRecord, NO_RATING, NO_REVIEWS, PRICE_NOT_AVAILABLE, TITLE_NOT_FOUND,
};

pub const CAPTCHA_PHRASE: &str = "Enter the characters you see below";

const IN_STOCK: &str = "In stock";

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

static SEARCH_RESULT: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"div[data-component-type="s-search-result"]"#));
static TITLE: LazyLock<Selector> = LazyLock::new(|| selector("h2"));
static PRICE: LazyLock<Selector> = LazyLock::new(|| selector("span.a-price"));
static PRICE_WHOLE: LazyLock<Selector> = LazyLock::new(|| selector("span.a-price-whole"));
static PRICE_FRACTION: LazyLock<Selector> = LazyLock::new(|| selector("span.a-price-fraction"));
static RATING: LazyLock<Selector> = LazyLock::new(|| selector("span.a-icon-alt"));
// Not specific to review counts; often picks up other small text in the card.
static REVIEW_COUNT: LazyLock<Selector> = LazyLock::new(|| selector("span.a-size-base"));
static DECLARATIVE: LazyLock<Selector> = LazyLock::new(|| selector("span.a-declarative"));

pub fn is_captcha_blocked(page_source: &str) -> bool {
    page_source.contains(CAPTCHA_PHRASE)
}

/// One record per search result card, in document order.
pub fn extract_products(page_source: &str) -> Vec<ProductRecord> {
    let html_document = Html::parse_document(page_source);

    html_document
        .select(&SEARCH_RESULT)
        .map(extract_product)
        .collect()
}

fn extract_product(item: ElementRef) -> ProductRecord {
    let title = first_text(item, &TITLE).unwrap_or_else(|| TITLE_NOT_FOUND.to_string());
    let rating = first_text(item, &RATING).unwrap_or_else(|| NO_RATING.to_string());
    let review_count = first_text(item, &REVIEW_COUNT).unwrap_or_else(|| NO_REVIEWS.to_string());

    let availability = match first_text(item, &DECLARATIVE) {
        Some(text) if text.contains(IN_STOCK) => Availability::Available,
        _ => Availability::Unavailable,
    };

    ProductRecord {
        title,
        price: extract_price(item),
        rating,
        review_count,
        availability,
    }
}

fn extract_price(item: ElementRef) -> String {
    let Some(price) = item.select(&PRICE).next() else {
        return PRICE_NOT_AVAILABLE.to_string();
    };

    match (
        first_text(price, &PRICE_WHOLE),
        first_text(price, &PRICE_FRACTION),
    ) {
        (Some(whole), Some(fraction)) => format!("{}.{}", whole, fraction),
        _ => stripped_text(price),
    }
}

fn first_text(element: ElementRef, selector: &Selector) -> Option<String> {
    element.select(selector).next().map(stripped_text)
}

/// Every text node trimmed, then joined with nothing in between.
fn stripped_text(element: ElementRef) -> String {
    element.text().map(str::trim).collect()
}
