//! Page fetching and table extraction.
//!
//! The extractor issues a single GET bounded by the configured timeout. Any
//! transport failure, timeout or non-success status aborts extraction; once
//! the page is in hand, row-level problems are logged and skipped.

use std::time::Duration;

use log::{debug, warn};
use scraper::Selector;

use crate::app::ProgressLog;
use crate::config::Config;
use crate::error_handling::{ConfigError, ExtractError, ExtractErrorKind, PipelineError};
use crate::initialization::init_client;
use crate::models::RecordSet;
use crate::parse::{parse_bank_table, TableExtraction, TableLayout};
use crate::utils::parse_selector;

/// Fetches the ranking page and turns its table into records.
#[derive(Debug, Clone)]
pub struct Extractor {
    client: reqwest::Client,
    table_selector: Selector,
    selector_text: String,
    layout: TableLayout,
}

impl Extractor {
    /// Builds an extractor from the run configuration.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Config` for an invalid selector and
    /// `PipelineError::Initialization` if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, PipelineError> {
        let client = init_client(Duration::from_secs(config.timeout_seconds), &config.user_agent)
            .map_err(crate::error_handling::InitializationError::from)?;
        let layout = TableLayout {
            name_column: config.name_column,
            market_cap_column: config.market_cap_column,
        };
        Ok(Self::with_client(client, &config.table_selector, layout)?)
    }

    /// Builds an extractor around an existing client.
    pub fn with_client(
        client: reqwest::Client,
        table_selector: &str,
        layout: TableLayout,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            client,
            table_selector: parse_selector(table_selector)?,
            selector_text: table_selector.to_string(),
            layout,
        })
    }

    /// Downloads the page body.
    ///
    /// # Errors
    ///
    /// A `Network` `ExtractError` for transport failures, timeouts and
    /// non-success statuses.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ExtractError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ExtractError::network(&e))?;
        let response = response
            .error_for_status()
            .map_err(|e| ExtractError::network(&e))?;
        debug!("Received {} from {}", response.status(), url);
        response.text().await.map_err(|e| ExtractError::network(&e))
    }

    /// Parses an already-fetched page with this extractor's selector and layout.
    pub fn parse_page(&self, html: &str) -> Result<TableExtraction, ExtractError> {
        parse_bank_table(html, &self.table_selector, &self.selector_text, self.layout)
    }

    /// Fetches `url` and extracts the bank records, in table order.
    ///
    /// Skipped rows are reported to `progress` one entry each.
    ///
    /// # Errors
    ///
    /// Returns an `ExtractError` of kind `Network` or `TableNotFound`; no
    /// partial record set is produced in either case.
    pub async fn extract(
        &self,
        url: &str,
        progress: &dyn ProgressLog,
    ) -> Result<RecordSet, ExtractError> {
        progress.record("Requesting data from source");
        let html = match self.fetch_page(url).await {
            Ok(html) => html,
            Err(e) => {
                if e.is_timeout() {
                    progress.record("Request timed out");
                } else {
                    progress.record(&format!("Failed to scrape data: {}", e.detail));
                }
                return Err(e);
            }
        };

        let extraction = match self.parse_page(&html) {
            Ok(extraction) => extraction,
            Err(e) => {
                if e.kind == ExtractErrorKind::TableNotFound {
                    progress.record(&format!(
                        "Failed to find table matching '{}'",
                        self.selector_text
                    ));
                }
                return Err(e);
            }
        };
        progress.record("Extracting data from source table");

        for skipped in &extraction.skipped {
            progress.record(&format!("Ignoring row {}: {}", skipped.index, skipped.fault));
        }
        if extraction.records.is_empty() {
            warn!("Table '{}' produced no bank records", self.selector_text);
        }
        progress.record(&format!(
            "Extracted {} records ({} rows skipped)",
            extraction.records.len(),
            extraction.skipped.len()
        ));
        Ok(extraction.records)
    }
}
