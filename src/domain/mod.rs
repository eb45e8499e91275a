pub mod product;
pub mod search_page;
