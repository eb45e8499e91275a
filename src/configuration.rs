use std::path::PathBuf;

use serde::Deserialize;
use serde_aux::field_attributes::{deserialize_bool_from_anything, deserialize_number_from_string};
use url::Url;

const CONFIGURATION_FILE: &str = "configuration.yaml";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub browser: BrowserSettings,
    pub search: SearchSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BrowserSettings {
    pub webdriver_url: String,
    pub user_agent: String,
    #[serde(deserialize_with = "deserialize_bool_from_anything")]
    pub headless: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    pub url: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub scroll_count: u8,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub page_load_wait_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub scroll_wait_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputSettings {
    pub directory: PathBuf,
    pub file_stem: String,
    #[serde(deserialize_with = "deserialize_bool_from_anything")]
    pub open_files: bool,
}

impl SearchSettings {
    pub fn parsed_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.url)
    }
}

impl OutputSettings {
    pub fn file_path(&self, extension: &str) -> PathBuf {
        self.directory.join(format!("{}.{}", self.file_stem, extension))
    }
}

fn builder_with_defaults(
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
    config::Config::builder()
        .set_default("browser.webdriver_url", "http://localhost:9515")?
        .set_default(
            "browser.user_agent",
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
        )?
        .set_default("browser.headless", false)?
        .set_default("search.url", "https://www.amazon.in/s?k=laptops")?
        .set_default("search.scroll_count", 3)?
        .set_default("search.page_load_wait_secs", 5)?
        .set_default("search.scroll_wait_secs", 3)?
        .set_default("output.directory", ".")?
        .set_default("output.file_stem", "amazon_laptops")?
        .set_default("output.open_files", true)
}

/// Defaults, then `configuration.yaml` in the working directory if present,
/// then `APP_`-prefixed environment variables (`APP_SEARCH__SCROLL_COUNT=5`).
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("No working directory: {}", e)))?;

    let settings = builder_with_defaults()?
        .add_source(config::File::from(base_path.join(CONFIGURATION_FILE)).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let settings = settings.try_deserialize::<Settings>()?;

    if let Err(e) = settings.search.parsed_url() {
        return Err(config::ConfigError::Message(format!(
            "Invalid search url {:?}: {}",
            settings.search.url, e
        )));
    }

    Ok(settings)
}
