use std::time::Duration;

use anyhow::Context;
use thirtyfour::{By, Key};

use crate::{configuration::SearchSettings, domain::search_page::is_captcha_blocked};

use super::Droid;

pub enum SearchPage {
    Loaded { page_source: String },
    CaptchaBlocked,
}

/// Loads the results page, then presses End on the body `scroll_count` times
/// so lazily loaded cards get rendered.
pub async fn fetch_search_page(
    droid: &Droid,
    settings: &SearchSettings,
) -> anyhow::Result<SearchPage> {
    let driver = &droid.driver;
    let url = settings.parsed_url()?;

    log::info!("Opening {}", url);
    driver
        .goto(url.as_str())
        .await
        .with_context(|| format!("Failed to open {}", url))?;
    tokio::time::sleep(Duration::from_secs(settings.page_load_wait_secs)).await;

    let initial_source = driver
        .source()
        .await
        .context("Failed to read the page source")?;
    if is_captcha_blocked(&initial_source) {
        log::error!("Blocked by captcha on url: {}", url);
        return Ok(SearchPage::CaptchaBlocked);
    }

    let title = driver
        .title()
        .await
        .context("Failed to read the page title")?;
    log::info!("Page title: {}", title);

    log::info!("Scrolling {} times to load more products", settings.scroll_count);
    for _ in 0..settings.scroll_count {
        driver
            .find(By::Tag("body"))
            .await
            .context("Failed to find the page body")?
            .send_keys(Key::End)
            .await
            .context("Failed to scroll the page")?;
        tokio::time::sleep(Duration::from_secs(settings.scroll_wait_secs)).await;
    }

    let page_source = driver
        .source()
        .await
        .context("Failed to read the page source")?;

    Ok(SearchPage::Loaded { page_source })
}
