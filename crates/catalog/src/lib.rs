//! Product catalog module.
//!
//! The engine only consumes the [`ProductCatalog`] seam; where products are
//! stored is the caller's concern. [`InMemoryCatalog`] backs tests, demos and
//! spreadsheet imports.

pub mod catalog;
pub mod import;
pub mod product;

pub use catalog::{CatalogAdapter, InMemoryCatalog, Lookup, ProductCatalog};
pub use import::{CatalogRecord, ImportError, ImportReport};
pub use product::{Barcode, Product};
