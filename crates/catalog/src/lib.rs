//! Catalog transformation engine.
//!
//! This crate contains the business rules for turning live commerce product
//! state into catalog item records, implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage).
//!
//! Each call to [`record::FeedRecordBuilder::build`] is a stateless
//! projection of one product (and, for variations, its parent) into a single
//! field-name → value mapping shaped for either the declarative feed file or
//! the direct items-batch API.

pub mod attributes;
pub mod config;
pub mod price;
pub mod product;
pub mod record;

pub use config::{DescriptionFilter, DescriptionMode, NoopDescriptionFilter, SyncConfig};
pub use price::{SALE_END_SENTINEL, SALE_START_SENTINEL, SalePriceFields};
pub use product::CatalogProduct;
pub use record::{CatalogItemRecord, ExportMode, FeedRecordBuilder};
