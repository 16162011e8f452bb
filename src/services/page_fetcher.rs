use thiserror::Error;

// Some sites serve bot-shaped user agents an error page, so identify as a
// plain desktop browser.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{0}")]
    Transport(#[source] reqwest::Error),
    #[error("HTTP error! status: {status}")]
    Http {
        status: u16,
        status_text: String,
        /// Final URL after the transport followed any redirects.
        url: String,
    },
}

/// Retrieves the raw markup of a single page. One unconditional GET, no
/// retries, no caching; redirects are whatever reqwest does by default.
pub struct PageFetcher {
    client: reqwest::Client,
}

impl Default for PageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build reqwest client");

        PageFetcher { client }
    }

    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
                url: response.url().to_string(),
            });
        }

        response.text().await.map_err(FetchError::Transport)
    }
}
