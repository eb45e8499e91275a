pub mod data_persistance;
pub mod droid;
pub mod search_scraper;

pub use data_persistance::*;
pub use droid::*;
pub use search_scraper::*;
