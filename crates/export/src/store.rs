//! Product store seam and an in-memory implementation for tests/dev.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use catsync_catalog::CatalogProduct;
use catsync_core::ProductId;

/// Read access to the commerce platform's live products.
///
/// Implementations must be safe for concurrent reads; the transformation
/// engine holds no state between calls.
pub trait ProductStore: Send + Sync {
    /// Identifiers of every product and variation eligible for sync.
    fn product_ids(&self) -> Vec<ProductId>;

    /// Load the current state of one product.
    fn load(&self, id: ProductId) -> Option<Arc<CatalogProduct>>;
}

/// In-memory product store.
///
/// - No IO
/// - Variation → parent handles are wired at insert time
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    products: Mutex<BTreeMap<ProductId, Arc<CatalogProduct>>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a top-level product and return its shared handle.
    pub fn insert(&self, product: CatalogProduct) -> Arc<CatalogProduct> {
        let product = Arc::new(product);

        // A poisoned lock loses the insert; readers keep working on the
        // state from before the panic.
        if let Ok(mut products) = self.products.lock() {
            products.insert(product.id, Arc::clone(&product));
        }

        product
    }

    /// Insert a variation wired to an already-inserted parent.
    ///
    /// An unknown parent id leaves the variation parentless, which the
    /// engine treats as "no parent".
    pub fn insert_variation(
        &self,
        mut variation: CatalogProduct,
        parent_id: ProductId,
    ) -> Arc<CatalogProduct> {
        if let Some(parent) = self.load(parent_id) {
            variation.parent = Arc::downgrade(&parent);
        }
        self.insert(variation)
    }

    /// Remove a product, e.g. to simulate deletion mid-run.
    pub fn remove(&self, id: ProductId) {
        if let Ok(mut products) = self.products.lock() {
            products.remove(&id);
        }
    }
}

impl ProductStore for MemoryProductStore {
    fn product_ids(&self) -> Vec<ProductId> {
        match self.products.lock() {
            Ok(products) => products.keys().copied().collect(),
            Err(_) => Vec::new(),
        }
    }

    fn load(&self, id: ProductId) -> Option<Arc<CatalogProduct>> {
        match self.products.lock() {
            Ok(products) => products.get(&id).cloned(),
            Err(_) => None,
        }
    }
}
