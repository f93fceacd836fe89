mod catalog;
mod entry;
mod error;
mod oracle;

#[cfg(test)]
mod testing;

pub use catalog::Catalog;
pub use entry::CatalogEntry;
pub use error::CatalogError;
pub use oracle::{CatalogOracle, DEFAULT_MIN_MATCH_SECS};
