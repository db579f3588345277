//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

/// Builds the client used to fetch the ranking page.
///
/// `timeout` bounds the whole request (connect, headers and body), so a
/// stalled server surfaces as a timeout error instead of hanging the run.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(timeout: Duration, user_agent: &str) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(timeout)
        .user_agent(user_agent.to_string())
        .build()
}
