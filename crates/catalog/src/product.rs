//! Read-only product projection and variation → parent fallback resolution.

use std::sync::Weak;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use catsync_core::ProductId;

use crate::config::DescriptionMode;

/// The transformation engine's view of one commerce product or variation.
///
/// Constructed on demand from the product store's live state; the engine
/// only ever reads it. For a variation, `parent` is a lookup handle to the
/// parent product — it never keeps the parent alive, the parent is never
/// mutated through it, and a dangling handle behaves exactly like "no
/// parent".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub title: String,
    /// Catalog-specific description override; empty when the merchant never
    /// set one.
    pub description: String,
    /// Short excerpt text.
    pub short_description: String,
    /// Full body text.
    pub body: String,
    /// Regular price in the shop currency.
    pub regular_price: Decimal,
    pub sale_price: Option<Decimal>,
    /// Sale-window start, date-only precision, as stored by the platform.
    pub sale_start: Option<String>,
    /// Sale-window end, date-only precision, as stored by the platform.
    pub sale_end: Option<String>,
    pub manage_stock: bool,
    pub stock_quantity: Option<i64>,
    /// Global trade identifier (GTIN/EAN/UPC).
    pub gtin: Option<String>,
    /// Stored category classification (e.g. a Google product category id).
    pub category: Option<String>,
    /// Native attribute pairs in the platform's order, keys not yet
    /// normalized.
    pub attributes: Vec<(String, String)>,
    /// Enhanced attribute overrides, keyed by normalized key.
    pub enhanced_attributes: IndexMap<String, String>,
    #[serde(skip)]
    pub parent: Weak<CatalogProduct>,
}

impl CatalogProduct {
    /// Resolved catalog description.
    ///
    /// The product's own override wins; otherwise the parent (looked up
    /// live, never cached) resolves recursively; otherwise excerpt and body
    /// in the order the description mode prefers, then the title.
    pub fn resolve_description(&self, mode: DescriptionMode) -> String {
        if !self.description.trim().is_empty() {
            return self.description.clone();
        }

        if let Some(parent) = self.parent.upgrade() {
            let inherited = parent.resolve_description(mode);
            if !inherited.trim().is_empty() {
                return inherited;
            }
        }

        let (preferred, fallback) = match mode {
            DescriptionMode::Full => (&self.body, &self.short_description),
            DescriptionMode::Short => (&self.short_description, &self.body),
        };

        for candidate in [preferred, fallback, &self.title] {
            if !candidate.trim().is_empty() {
                return candidate.clone();
            }
        }

        String::new()
    }

    /// Stock quantity to advertise externally.
    ///
    /// Defined only when stock management is enabled on the product itself
    /// or, failing that, on its parent. Once the product manages its own
    /// stock the parent is not consulted.
    pub fn sellable_quantity(&self) -> Option<i64> {
        if self.manage_stock {
            return self.stock_quantity;
        }

        self.parent
            .upgrade()
            .filter(|parent| parent.manage_stock)
            .and_then(|parent| parent.stock_quantity)
    }

    /// Global trade identifier; own value only, never inherited.
    pub fn gtin(&self) -> Option<&str> {
        self.gtin.as_deref().filter(|gtin| !gtin.is_empty())
    }

    /// Stored category classification; own value only, never inherited.
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|category| !category.is_empty())
    }
}
