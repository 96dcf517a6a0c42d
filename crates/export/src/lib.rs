//! Batch export of catalog records.
//!
//! Drives the transformation engine over a product store: one record per
//! product, per-product failures collected instead of aborting the run.
//! Upload transport and run scheduling live outside this crate.

pub mod runner;
pub mod store;

pub use runner::{ExportFailure, ExportReport, ExportRunId, export_catalog};
pub use store::{MemoryProductStore, ProductStore};
