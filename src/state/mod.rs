mod catalog;
mod repository;

pub use catalog::{load_catalog, Catalog, Store};
pub use repository::{refresh_line_prices, Entity, InMemoryRepository, PriceSource, Repository};
