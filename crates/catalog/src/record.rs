//! Catalog item record assembly.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use catsync_core::CatalogResult;

use crate::attributes;
use crate::config::{DescriptionFilter, NoopDescriptionFilter, SyncConfig};
use crate::price::{self, SalePriceFields};
use crate::product::CatalogProduct;

/// Output shape selector: declarative feed file vs. direct batch API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportMode {
    Feed,
    ItemsBatch,
}

/// One product, described in the catalog's field vocabulary.
///
/// Field presence is part of the contract: optional data that does not
/// resolve is absent from the mapping, never zeroed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogItemRecord(IndexMap<String, Value>);

impl CatalogItemRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn into_inner(self) -> IndexMap<String, Value> {
        self.0
    }

    fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }
}

/// Builds catalog item records from live product state.
///
/// Holds the per-run configuration and the description filter strategy; each
/// [`build`](Self::build) call is a stateless projection of the product it
/// is given.
pub struct FeedRecordBuilder {
    config: SyncConfig,
    description_filter: Box<dyn DescriptionFilter>,
}

impl FeedRecordBuilder {
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config,
            description_filter: Box::new(NoopDescriptionFilter),
        }
    }

    /// Replace the description post-processing hook.
    pub fn with_description_filter(mut self, filter: Box<dyn DescriptionFilter>) -> Self {
        self.description_filter = filter;
        self
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Produce the catalog item record for one product or variation.
    ///
    /// Never mutates the source product.
    pub fn build(
        &self,
        product: &CatalogProduct,
        mode: ExportMode,
    ) -> CatalogResult<CatalogItemRecord> {
        let mut record = CatalogItemRecord::default();

        // Merged attributes go in first; engine-resolved fields are inserted
        // afterwards and win any key collision.
        for (key, value) in attributes::merge(&product.attributes, &product.enhanced_attributes) {
            record.insert(key, Value::String(value));
        }

        let description = product.resolve_description(self.config.description_mode);

        record.insert("id", Value::String(product.id.to_string()));
        record.insert("title", Value::String(product.title.clone()));
        record.insert("description", Value::String(description.clone()));

        match mode {
            ExportMode::Feed => {
                record.insert(
                    "price",
                    Value::String(price::format_money(
                        product.regular_price,
                        &self.config.currency,
                    )),
                );
            }
            ExportMode::ItemsBatch => {
                record.insert(
                    "price",
                    Value::from(price::to_minor_units(
                        product.id,
                        "price",
                        product.regular_price,
                    )?),
                );
            }
        }

        match price::resolve(
            product.id,
            product.sale_price,
            product.sale_start.as_deref(),
            product.sale_end.as_deref(),
            &self.config.currency,
            mode,
        )? {
            SalePriceFields::Feed {
                sale_price,
                start_date,
                end_date,
            } => {
                record.insert("sale_price", Value::String(sale_price));
                record.insert("sale_price_start_date", Value::String(start_date));
                record.insert("sale_price_end_date", Value::String(end_date));
            }
            SalePriceFields::ItemsBatch {
                sale_price_minor: Some(minor),
                effective_date,
            } => {
                record.insert("sale_price", Value::from(minor));
                record.insert("sale_price_effective_date", Value::String(effective_date));
            }
            SalePriceFields::ItemsBatch {
                sale_price_minor: None,
                ..
            } => {}
        }

        if let Some(quantity) = product.sellable_quantity() {
            record.insert("quantity_to_sell_on_facebook", Value::from(quantity));
        }

        if let Some(gtin) = product.gtin() {
            record.insert("gtin", Value::String(gtin.to_string()));
        }

        if let Some(category) = product.category() {
            let field = match mode {
                ExportMode::Feed => "category",
                ExportMode::ItemsBatch => "google_product_category",
            };
            record.insert(field, Value::String(category.to_string()));
        }

        // The description hook runs exactly once, as the very last step, and
        // touches nothing but the description field.
        let description = self.description_filter.apply(description, product);
        record.insert("description", Value::String(description));

        Ok(record)
    }
}
