use std::net::TcpListener;

use env_logger::Env;
use sift::{
    configuration::get_configuration,
    services::{Extractor, OpenaiClient, PageFetcher, ScrapeClient},
    startup::run,
};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");

    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.port
    );
    let listener = TcpListener::bind(address)?;

    let page_fetcher = PageFetcher::new();
    let openai_client = OpenaiClient::new(
        configuration.api_keys.openai,
        configuration.api_keys.openai_api_base,
    );
    let scrape_client = ScrapeClient::new(configuration.application.base_url);
    let extractor = Extractor::new(scrape_client, openai_client);

    run(listener, page_fetcher, extractor)?.await
}
