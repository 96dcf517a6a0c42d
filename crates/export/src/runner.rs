//! Export run loop.
//!
//! One run walks the store once, builds one record per product, and reports
//! what it produced. Parallelizing across products and retrying uploads are
//! the caller's concerns.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use catsync_catalog::{CatalogItemRecord, ExportMode, FeedRecordBuilder};
use catsync_core::{CatalogError, ProductId};

use crate::store::ProductStore;

/// Identifier of one export run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExportRunId(Uuid);

impl ExportRunId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
    /// for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ExportRunId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for ExportRunId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A product that could not be transformed during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFailure {
    pub product_id: ProductId,
    pub error: CatalogError,
}

/// Outcome of one export run.
#[derive(Debug, Clone)]
pub struct ExportReport {
    pub run_id: ExportRunId,
    pub records: Vec<CatalogItemRecord>,
    pub failures: Vec<ExportFailure>,
}

/// Transform every product in the store into a catalog record.
///
/// A product that fails validation becomes a failure entry and the run
/// continues; a product deleted between listing and load is skipped.
pub fn export_catalog(
    store: &dyn ProductStore,
    builder: &FeedRecordBuilder,
    mode: ExportMode,
) -> ExportReport {
    let run_id = ExportRunId::new();
    let ids = store.product_ids();
    info!(%run_id, ?mode, products = ids.len(), "starting catalog export");

    let mut records = Vec::with_capacity(ids.len());
    let mut failures = Vec::new();

    for id in ids {
        let Some(product) = store.load(id) else {
            continue;
        };

        match builder.build(&product, mode) {
            Ok(record) => records.push(record),
            Err(error) => {
                warn!(%run_id, product_id = %id, %error, "skipping product");
                failures.push(ExportFailure {
                    product_id: id,
                    error,
                });
            }
        }
    }

    info!(
        %run_id,
        records = records.len(),
        failures = failures.len(),
        "catalog export finished"
    );

    ExportReport {
        run_id,
        records,
        failures,
    }
}
