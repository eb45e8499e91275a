use std::path::PathBuf;

use crate::{
    configuration::{OutputSettings, Settings},
    domain::{
        product::retain_listable,
        search_page::{extract_products, is_captcha_blocked},
    },
    services::{fetch_search_page, open_saved_files, persist_products, Droid, SearchPage},
};

#[derive(Debug, PartialEq)]
pub enum RunOutcome {
    Saved {
        product_count: usize,
        files: Vec<PathBuf>,
    },
    NoProducts,
    CaptchaBlocked,
}

/// Fetches the search page, closes the browser, then processes what was
/// fetched. The browser is closed on every path out of the fetch.
pub async fn run(configuration: Settings) -> anyhow::Result<RunOutcome> {
    let droid = Droid::new(&configuration.browser).await?;

    let fetched = fetch_search_page(&droid, &configuration.search).await;

    log::info!("Closing the browser...");
    if let Err(e) = droid.quit().await {
        log::error!("{:#}", e);
    }

    match fetched? {
        SearchPage::CaptchaBlocked => Ok(RunOutcome::CaptchaBlocked),
        SearchPage::Loaded { page_source } => process_page(&page_source, &configuration.output),
    }
}

pub fn process_page(page_source: &str, output: &OutputSettings) -> anyhow::Result<RunOutcome> {
    if is_captcha_blocked(page_source) {
        return Ok(RunOutcome::CaptchaBlocked);
    }

    log::info!("Extracting product data...");
    let products = retain_listable(extract_products(page_source));

    if products.is_empty() {
        return Ok(RunOutcome::NoProducts);
    }

    let files = persist_products(&products, output)?;
    if output.open_files {
        open_saved_files(&files);
    }

    Ok(RunOutcome::Saved {
        product_count: products.len(),
        files,
    })
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use calamine::{open_workbook, Reader, Xlsx};

    use super::{process_page, RunOutcome};
    use crate::configuration::OutputSettings;

    fn output_in(dir: &Path) -> OutputSettings {
        OutputSettings {
            directory: dir.to_path_buf(),
            file_stem: "amazon_laptops".to_string(),
            open_files: false,
        }
    }

    const RESULTS_PAGE: &str = r#"
        <html><body><div class="s-main-slot">
            <div data-component-type="s-search-result" data-asin="B0C1">
                <h2><span>Lenovo IdeaPad Slim 3</span></h2>
                <span class="a-icon-alt">4.1 out of 5 stars</span>
                <span class="a-size-base">1,234</span>
                <span class="a-price"><span class="a-price-whole">49,999</span><span class="a-price-fraction">00</span></span>
            </div>
            <div data-component-type="s-search-result" data-asin="B0C2">
                <h2>HP 15s</h2>
                <span class="a-price">₹55,000</span>
            </div>
            <div data-component-type="s-search-result" data-asin="B0C3">
                <h2>Acer Aspire Lite</h2>
                <span class="a-size-base">Currently unavailable.</span>
            </div>
        </div></body></html>
    "#;

    #[test]
    fn process_page_saves_listable_products() {
        let dir = tempfile::tempdir().unwrap();

        let outcome = process_page(RESULTS_PAGE, &output_in(dir.path())).unwrap();

        let (product_count, files) = match outcome {
            RunOutcome::Saved {
                product_count,
                files,
            } => (product_count, files),
            other => panic!("expected saved products, got {:?}", other),
        };
        assert_eq!(product_count, 2);
        assert_eq!(files.len(), 3);

        let csv = fs::read_to_string(dir.path().join("amazon_laptops.csv")).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Product Title,Price (INR),Rating,Reviews,Availability",
                "Lenovo IdeaPad Slim 3,\"49,999.00\",4.1 out of 5 stars,\"1,234\",Unavailable",
                "HP 15s,\"₹55,000\",No rating,No reviews,Unavailable",
            ]
        );

        let json = fs::read_to_string(dir.path().join("amazon_laptops.json")).unwrap();
        let json_lines: Vec<&str> = json.lines().collect();
        assert_eq!(
            json_lines,
            vec![
                r#"{"Product Title":"Lenovo IdeaPad Slim 3","Price (INR)":"49,999.00","Rating":"4.1 out of 5 stars","Reviews":"1,234","Availability":"Unavailable"}"#,
                r#"{"Product Title":"HP 15s","Price (INR)":"₹55,000","Rating":"No rating","Reviews":"No reviews","Availability":"Unavailable"}"#,
            ]
        );

        let mut workbook: Xlsx<_> =
            open_workbook(dir.path().join("amazon_laptops.xlsx")).unwrap();
        let rows: Vec<Vec<String>> = workbook
            .worksheet_range("Sheet1")
            .unwrap()
            .rows()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect();
        assert_eq!(
            rows,
            vec![
                vec!["Product Title", "Price (INR)", "Rating", "Reviews", "Availability"],
                vec![
                    "Lenovo IdeaPad Slim 3",
                    "49,999.00",
                    "4.1 out of 5 stars",
                    "1,234",
                    "Unavailable"
                ],
                vec!["HP 15s", "₹55,000", "No rating", "No reviews", "Unavailable"],
            ]
        );
    }

    #[test]
    fn process_page_without_results_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();

        let outcome = process_page("<html><body></body></html>", &output_in(dir.path())).unwrap();

        assert_eq!(outcome, RunOutcome::NoProducts);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn process_page_captcha_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let page = format!(
            "<html><body><h4>Enter the characters you see below</h4>{}</body></html>",
            RESULTS_PAGE
        );

        let outcome = process_page(&page, &output_in(dir.path())).unwrap();

        assert_eq!(outcome, RunOutcome::CaptchaBlocked);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
