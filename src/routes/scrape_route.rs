use actix_web::{http::StatusCode, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use url::Url;

use crate::services::{FetchError, PageFetcher};

#[derive(Deserialize)]
pub struct ScrapeBody {
    pub url: String,
}

#[post("/scrape")]
async fn scrape(fetcher: web::Data<PageFetcher>, body: web::Json<ScrapeBody>) -> HttpResponse {
    let url = body.url.trim();
    if url.is_empty() {
        return HttpResponse::BadRequest().json(json!({ "error": "URL is required" }));
    }
    if Url::parse(url).is_err() {
        return HttpResponse::BadRequest().json(json!({ "error": "Invalid URL" }));
    }

    match fetcher.fetch(url).await {
        Ok(content) => HttpResponse::Ok().json(json!({ "content": content })),
        Err(FetchError::Http {
            status,
            status_text,
            url: resolved_url,
        }) => {
            log::error!("Upstream returned {} for {}", status, resolved_url);
            let code = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            HttpResponse::build(code).json(json!({
                "error": format!("HTTP error! status: {}", status),
                "details": {
                    "status": status,
                    "statusText": status_text,
                    "url": resolved_url,
                }
            }))
        }
        Err(FetchError::Transport(e)) => {
            log::error!("Failed to fetch {}: {:?}", url, e);
            HttpResponse::InternalServerError().json(json!({
                "error": "Failed to scrape the webpage",
                "details": { "message": e.to_string() }
            }))
        }
    }
}
