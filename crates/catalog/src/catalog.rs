//! Catalog lookup seam and its in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use crate::product::{Barcode, Product};

/// Key-value product lookup backed by some persisted table.
///
/// Implementations must be side-effect free: a lookup never changes what a
/// later lookup returns.
pub trait ProductCatalog {
    fn find_product(&self, barcode: &Barcode) -> Option<Product>;
}

impl<C> ProductCatalog for &C
where
    C: ProductCatalog + ?Sized,
{
    fn find_product(&self, barcode: &Barcode) -> Option<Product> {
        (**self).find_product(barcode)
    }
}

impl<C> ProductCatalog for Arc<C>
where
    C: ProductCatalog + ?Sized,
{
    fn find_product(&self, barcode: &Barcode) -> Option<Product> {
        (**self).find_product(barcode)
    }
}

/// Outcome of a catalog lookup.
///
/// `NotFound` is a normal outcome: the caller either discards the scan or adds
/// a manual placeholder line tagged with the barcode.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(Product),
    NotFound(Barcode),
}

impl Lookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

/// Wraps a [`ProductCatalog`] and normalizes raw scanner input.
#[derive(Debug, Clone)]
pub struct CatalogAdapter<C> {
    catalog: C,
}

impl<C: ProductCatalog> CatalogAdapter<C> {
    pub fn new(catalog: C) -> Self {
        Self { catalog }
    }

    /// Look up raw scanner/keyboard input.
    ///
    /// Returns `None` for empty input, which is rejected before reaching the
    /// catalog.
    pub fn lookup(&self, raw: &str) -> Option<Lookup> {
        let barcode = Barcode::parse(raw).ok()?;
        let outcome = match self.catalog.find_product(&barcode) {
            Some(product) => Lookup::Found(product),
            None => Lookup::NotFound(barcode),
        };
        tracing::debug!(barcode = raw, found = outcome.is_found(), "catalog lookup");
        Some(outcome)
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }
}

/// In-memory catalog for tests, demos and imported price lists.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: HashMap<Barcode, Product>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a product unless its barcode is already present.
    ///
    /// Returns `false` when an entry with the same barcode exists; the first
    /// entry wins.
    pub fn insert(&mut self, product: Product) -> bool {
        if self.products.contains_key(product.barcode()) {
            return false;
        }
        self.products.insert(product.barcode().clone(), product);
        true
    }

    pub fn get(&self, barcode: &Barcode) -> Option<&Product> {
        self.products.get(barcode)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductCatalog for InMemoryCatalog {
    fn find_product(&self, barcode: &Barcode) -> Option<Product> {
        self.products.get(barcode).cloned()
    }
}

impl FromIterator<Product> for InMemoryCatalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for product in iter {
            catalog.insert(product);
        }
        catalog
    }
}
