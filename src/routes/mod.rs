pub mod extract_route;
pub mod page_route;
pub mod scrape_route;
