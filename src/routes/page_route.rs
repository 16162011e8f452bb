use actix_web::{get, HttpResponse};
use askama::Template;

#[derive(Template)]
#[template(path = "scrape.html")]
struct ScrapeTemplate;

#[get("/")]
async fn index() -> HttpResponse {
    HttpResponse::Ok().body(ScrapeTemplate.render().unwrap())
}

#[derive(Template)]
#[template(path = "assisted.html")]
struct AssistedTemplate;

#[get("/assisted")]
async fn assisted() -> HttpResponse {
    HttpResponse::Ok().body(AssistedTemplate.render().unwrap())
}
