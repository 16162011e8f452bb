use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::services::{ExtractError, Extraction, Extractor};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractBody {
    pub url: String,
    pub extraction_request: String,
}

#[post("/freetext")]
async fn extract_freetext(
    extractor: web::Data<Extractor>,
    body: web::Json<ExtractBody>,
) -> HttpResponse {
    if let Some(rejection) = validate(&body) {
        return rejection;
    }

    extraction_response(
        extractor
            .extract_free_text(body.url.trim(), body.extraction_request.trim())
            .await,
    )
}

#[post("/object")]
async fn extract_object(
    extractor: web::Data<Extractor>,
    body: web::Json<ExtractBody>,
) -> HttpResponse {
    if let Some(rejection) = validate(&body) {
        return rejection;
    }

    extraction_response(
        extractor
            .extract_page_object(body.url.trim(), body.extraction_request.trim())
            .await,
    )
}

#[post("/keyvalue")]
async fn extract_keyvalue(
    extractor: web::Data<Extractor>,
    body: web::Json<ExtractBody>,
) -> HttpResponse {
    if let Some(rejection) = validate(&body) {
        return rejection;
    }

    extraction_response(
        extractor
            .extract_key_values(body.url.trim(), body.extraction_request.trim())
            .await,
    )
}

// Rejected before any network call is attempted.
fn validate(body: &ExtractBody) -> Option<HttpResponse> {
    if body.url.trim().is_empty() || body.extraction_request.trim().is_empty() {
        return Some(HttpResponse::BadRequest().json(json!({
            "error": "URL and extraction request are required"
        })));
    }
    None
}

fn extraction_response<T: Serialize>(result: Result<Extraction<T>, ExtractError>) -> HttpResponse {
    match result {
        Ok(extraction) => HttpResponse::Ok().json(extraction),
        Err(e) => {
            log::error!("Extraction failed: {}", e);
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}
