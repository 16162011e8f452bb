use std::net::TcpListener;

use actix_files::Files;
use actix_web::{
    dev::Server,
    error::{self, JsonPayloadError},
    middleware::Logger,
    web, App, HttpRequest, HttpResponse, HttpServer,
};
use serde_json::json;

use crate::{
    routes::{extract_route, page_route, scrape_route},
    services::{Extractor, PageFetcher},
};

pub fn run(
    listener: TcpListener,
    page_fetcher: PageFetcher,
    extractor: Extractor,
) -> Result<Server, std::io::Error> {
    let page_fetcher = web::Data::new(page_fetcher);
    let extractor = web::Data::new(extractor);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(Files::new("/static", "./templates/static").prefer_utf8(true))
            .service(page_route::index)
            .service(page_route::assisted)
            .service(
                web::scope("/api")
                    .service(scrape_route::scrape)
                    .service(
                        web::scope("/extract")
                            .service(extract_route::extract_freetext)
                            .service(extract_route::extract_object)
                            .service(extract_route::extract_keyvalue),
                    ),
            )
            .app_data(page_fetcher.clone())
            .app_data(extractor.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}

// Malformed or incomplete JSON bodies get the same {error} envelope as every
// other client error instead of actix's default plain-text response.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> error::Error {
    let message = err.to_string();
    error::InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(json!({ "error": message })),
    )
    .into()
}
