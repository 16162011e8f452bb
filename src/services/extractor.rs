use async_openai::error::OpenAIError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::{key_value_schema, page_extract_schema, KeyValueExtract, PageExtract};

use super::{OpenaiClient, ScrapeClient, ScrapeClientError};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to retrieve the webpage: {0}")]
    Source(#[from] ScrapeClientError),
    #[error("model call failed: {0}")]
    Model(#[from] OpenAIError),
    #[error("model output did not match the requested shape: {0}")]
    Schema(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extraction<T> {
    pub extracted_info: T,
    pub total_tokens: u32,
}

// The schema-constrained variants wrap their payload in an extractedInfo
// envelope; the model fills in the whole envelope.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtractedInfoEnvelope<T> {
    extracted_info: T,
}

/// Runs the fetch-then-prompt pipeline for the three extraction variants.
pub struct Extractor {
    scrape_client: ScrapeClient,
    openai_client: OpenaiClient,
}

impl Extractor {
    pub fn new(scrape_client: ScrapeClient, openai_client: OpenaiClient) -> Self {
        Extractor {
            scrape_client,
            openai_client,
        }
    }

    /// Free-text variant: the model's final text is parsed as JSON when it
    /// parses, and returned as the raw string when it does not. The fallback
    /// is deliberate, callers get *something* rather than an error for
    /// free-form model text.
    pub async fn extract_free_text(
        &self,
        url: &str,
        extraction_request: &str,
    ) -> Result<Extraction<Value>, ExtractError> {
        let html = self.scrape_client.scrape(url).await?;
        let prompt = format!(
            "HTML Content: {}\n\nExtraction Request: {}\n\nPlease extract the requested information from the provided HTML.",
            html, extraction_request
        );

        let (text, total_tokens) = self.openai_client.extract_with_tool(&prompt).await?;
        let extracted_info = serde_json::from_str(&text).unwrap_or(Value::String(text));

        Ok(Extraction {
            extracted_info,
            total_tokens,
        })
    }

    pub async fn extract_page_object(
        &self,
        url: &str,
        extraction_request: &str,
    ) -> Result<Extraction<PageExtract>, ExtractError> {
        let html = self.scrape_client.scrape(url).await?;
        let prompt = format!(
            "HTML Content: {}\n\nExtraction Request: {}\n\nPlease extract the requested information from the provided HTML and structure it according to the given schema.",
            html, extraction_request
        );

        self.schema_constrained(&prompt, "page_extract", page_extract_schema())
            .await
    }

    pub async fn extract_key_values(
        &self,
        url: &str,
        extraction_request: &str,
    ) -> Result<Extraction<KeyValueExtract>, ExtractError> {
        let html = self.scrape_client.scrape(url).await?;
        let prompt = format!(
            "HTML Content: {}\n\nExtraction Request: {}\n\nPlease extract the requested information from the provided HTML and structure it as key-value pairs according to the given schema. Each key-value pair should represent a piece of information requested by the user.",
            html, extraction_request
        );

        self.schema_constrained(&prompt, "key_value_extract", key_value_schema())
            .await
    }

    async fn schema_constrained<T: DeserializeOwned>(
        &self,
        prompt: &str,
        schema_name: &str,
        schema: Value,
    ) -> Result<Extraction<T>, ExtractError> {
        let (content, total_tokens) = self
            .openai_client
            .extract_with_schema(prompt, schema_name, schema)
            .await?;

        let envelope: ExtractedInfoEnvelope<T> = serde_json::from_str(&content)?;

        Ok(Extraction {
            extracted_info: envelope.extracted_info,
            total_tokens,
        })
    }
}
