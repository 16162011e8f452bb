pub mod extractor;
pub mod openai_client;
pub mod page_fetcher;
pub mod scrape_client;

pub use extractor::*;
pub use openai_client::*;
pub use page_fetcher::*;
pub use scrape_client::*;
