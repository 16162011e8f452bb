use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeClientError {
    #[error("failed to reach the scrape endpoint: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{0}")]
    Upstream(String),
}

/// Client for this service's own scrape endpoint. The extraction endpoints
/// go through HTTP rather than calling the fetcher directly so they see the
/// exact same behavior external callers of /api/scrape do.
pub struct ScrapeClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct ScrapeBody<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ScrapeResponse {
    content: String,
}

#[derive(Deserialize)]
struct ScrapeErrorBody {
    error: Option<String>,
}

impl ScrapeClient {
    pub fn new(base_url: String) -> Self {
        ScrapeClient {
            client: reqwest::Client::new(),
            // a configured base URL often carries a trailing slash
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn scrape(&self, url: &str) -> Result<String, ScrapeClientError> {
        let response = self
            .client
            .post(format!("{}/api/scrape", self.base_url))
            .json(&ScrapeBody { url })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ScrapeErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| format!("scrape endpoint returned {}", status));
            return Err(ScrapeClientError::Upstream(message));
        }

        let body: ScrapeResponse = response.json().await?;
        Ok(body.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn scrape_posts_url_and_returns_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/scrape"))
            .and(body_json(json!({ "url": "https://example.com" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "content": "<html></html>" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let content = ScrapeClient::new(server.uri())
            .scrape("https://example.com")
            .await
            .unwrap();
        assert_eq!(content, "<html></html>");
    }

    #[tokio::test]
    async fn scrape_tolerates_trailing_slash_in_base_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/scrape"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": "ok" })))
            .expect(1)
            .mount(&server)
            .await;

        let content = ScrapeClient::new(format!("{}/", server.uri()))
            .scrape("https://example.com")
            .await
            .unwrap();
        assert_eq!(content, "ok");
    }

    #[tokio::test]
    async fn scrape_surfaces_error_envelope_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/scrape"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "error": "HTTP error! status: 404" })),
            )
            .mount(&server)
            .await;

        let err = ScrapeClient::new(server.uri())
            .scrape("https://example.com/missing")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "HTTP error! status: 404");
    }
}
