use env_logger::Env;
use shelf::{
    configuration::get_configuration,
    startup::{run, RunOutcome},
};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = match get_configuration() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to read configuration: {}", e);
            return;
        }
    };

    match run(configuration).await {
        Ok(RunOutcome::Saved { product_count, .. }) => {
            log::info!("Data saved: {} products found.", product_count);
        }
        Ok(RunOutcome::NoProducts) => {
            log::warn!(
                "No products found. Please check the Amazon page structure or the search query."
            );
        }
        Ok(RunOutcome::CaptchaBlocked) => {
            log::error!("CAPTCHA detected, cannot proceed with scraping.");
        }
        Err(e) => log::error!("An error occurred: {:#}", e),
    }
}
