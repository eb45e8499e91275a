use anyhow::Context;
use thirtyfour::{ChromiumLikeCapabilities, DesiredCapabilities, WebDriver};

use crate::configuration::BrowserSettings;

/// A live browser session. Call `quit` when done; nothing else closes it.
pub struct Droid {
    pub driver: WebDriver,
}

impl Droid {
    pub async fn new(settings: &BrowserSettings) -> anyhow::Result<Self> {
        let mut caps = DesiredCapabilities::chrome();
        caps.add_arg(&format!("--user-agent={}", settings.user_agent))?;
        if settings.headless {
            caps.set_headless()?;
        }

        let driver = WebDriver::new(&settings.webdriver_url, caps)
            .await
            .with_context(|| {
                format!(
                    "Failed to start a browser session at {}",
                    settings.webdriver_url
                )
            })?;

        Ok(Droid { driver })
    }

    pub async fn quit(self) -> anyhow::Result<()> {
        self.driver
            .quit()
            .await
            .context("Failed to close the browser")
    }
}
