//! Domain error model.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the catalog domain.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-level error.
///
/// Normal absence of optional product data (no sale price, no GTIN, no stock
/// quantity) is not an error here; it is absence in the output record. This
/// enum covers malformed input from the product store only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A product field could not be interpreted during transformation.
    #[error("validation failed for product {product_id}, field `{field}`: {message}")]
    Validation {
        product_id: ProductId,
        field: &'static str,
        message: String,
    },

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl CatalogError {
    pub fn validation(
        product_id: ProductId,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::Validation {
            product_id,
            field,
            message: message.into(),
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_product_and_field() {
        let err = CatalogError::validation(
            ProductId::new(1201),
            "sale_price_start_date",
            "unparsable date `whenever`",
        );

        let rendered = err.to_string();
        assert!(rendered.contains("1201"));
        assert!(rendered.contains("sale_price_start_date"));
        assert!(rendered.contains("unparsable date"));
    }
}
