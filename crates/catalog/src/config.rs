//! Per-run transformation configuration.

use serde::{Deserialize, Serialize};

use crate::product::CatalogProduct;

/// Which product text the description fallback prefers when the catalog
/// description is empty and no parent resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptionMode {
    /// Prefer the full body text over the short excerpt.
    Full,
    /// Prefer the short excerpt over the full body text.
    Short,
}

/// Transformation settings shared by every product in a run.
///
/// Passed explicitly into the builder; resolution never reads ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// ISO currency code of the shop (e.g., "USD", "EUR").
    pub currency: String,
    pub description_mode: DescriptionMode,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            description_mode: DescriptionMode::Full,
        }
    }
}

impl SyncConfig {
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn with_description_mode(mut self, mode: DescriptionMode) -> Self {
        self.description_mode = mode;
        self
    }
}

/// Post-processing hook for the resolved description.
///
/// Invoked exactly once, as the last step of record assembly.
pub trait DescriptionFilter: Send + Sync {
    fn apply(&self, description: String, product: &CatalogProduct) -> String;
}

/// Default filter: passes the resolved description through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDescriptionFilter;

impl DescriptionFilter for NoopDescriptionFilter {
    fn apply(&self, description: String, _product: &CatalogProduct) -> String {
        description
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_full_mode_usd() {
        let config = SyncConfig::default();
        assert_eq!(config.currency, "USD");
        assert_eq!(config.description_mode, DescriptionMode::Full);
    }

    #[test]
    fn builder_style_overrides() {
        let config = SyncConfig::default()
            .with_currency("EUR")
            .with_description_mode(DescriptionMode::Short);
        assert_eq!(config.currency, "EUR");
        assert_eq!(config.description_mode, DescriptionMode::Short);
    }

    #[test]
    fn noop_filter_leaves_description_unchanged() {
        let product = CatalogProduct::default();
        let out = NoopDescriptionFilter.apply("as resolved".to_string(), &product);
        assert_eq!(out, "as resolved");
    }
}
