//! Sale price and sale-window resolution.
//!
//! Both output shapes come out of the same defaulting pipeline; only the
//! serialization differs between the flat feed file and the batch API
//! payload. The asymmetry between "both bounds missing" (no window at all)
//! and "one bound missing" (sentinel-filled) is intentional and must not be
//! smoothed over.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use catsync_core::{CatalogError, CatalogResult, ProductId};

use crate::record::ExportMode;

/// Start-of-time bound used when a sale window has an end but no start.
pub const SALE_START_SENTINEL: &str = "1970-01-29T00:00:00+00:00";

/// Far-future bound used when a sale window has a start but no end.
pub const SALE_END_SENTINEL: &str = "2038-01-17T23:59+00:00";

/// Mode-dependent sale price fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SalePriceFields {
    /// Feed columns are always present; undetermined values are empty.
    Feed {
        sale_price: String,
        start_date: String,
        end_date: String,
    },
    /// Batch payloads omit the sale block entirely when no sale price is set
    /// (`sale_price_minor` is `None`).
    ItemsBatch {
        sale_price_minor: Option<i64>,
        effective_date: String,
    },
}

/// Resolve the sale price and its effective window for one product.
///
/// A product without a sale price short-circuits: dates are ignored (not
/// even parsed) and the fields are empty or absent per mode. A sale price of
/// zero is a real sale.
pub fn resolve(
    product_id: ProductId,
    sale_price: Option<Decimal>,
    sale_start: Option<&str>,
    sale_end: Option<&str>,
    currency: &str,
    mode: ExportMode,
) -> CatalogResult<SalePriceFields> {
    let Some(sale_price) = sale_price else {
        return Ok(match mode {
            ExportMode::Feed => SalePriceFields::Feed {
                sale_price: String::new(),
                start_date: String::new(),
                end_date: String::new(),
            },
            ExportMode::ItemsBatch => SalePriceFields::ItemsBatch {
                sale_price_minor: None,
                effective_date: String::new(),
            },
        });
    };

    let window = resolve_window(product_id, sale_start, sale_end)?;

    Ok(match mode {
        ExportMode::Feed => {
            let (start_date, end_date) = window.unwrap_or_default();
            SalePriceFields::Feed {
                sale_price: format_money(sale_price, currency),
                start_date,
                end_date,
            }
        }
        ExportMode::ItemsBatch => SalePriceFields::ItemsBatch {
            sale_price_minor: Some(to_minor_units(product_id, "sale_price", sale_price)?),
            effective_date: window
                .map(|(start, end)| format!("{start}/{end}"))
                .unwrap_or_default(),
        },
    })
}

/// Format a decimal amount in the feed's `"{amount} {CURRENCY}"` form, with
/// trailing zeros stripped (`11.50` prints as `11.5`).
pub(crate) fn format_money(amount: Decimal, currency: &str) -> String {
    format!("{} {}", amount.normalize(), currency)
}

/// Convert a decimal amount to integer minor currency units
/// (`11.5` → `1150`), rounding midpoints away from zero.
pub(crate) fn to_minor_units(
    product_id: ProductId,
    field: &'static str,
    amount: Decimal,
) -> CatalogResult<i64> {
    (amount * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| {
            CatalogError::validation(
                product_id,
                field,
                format!("amount {amount} does not fit in minor currency units"),
            )
        })
}

/// Window defaulting: both bounds absent means no window at all; a single
/// absent bound is filled with the matching sentinel.
fn resolve_window(
    product_id: ProductId,
    start: Option<&str>,
    end: Option<&str>,
) -> CatalogResult<Option<(String, String)>> {
    let start = parse_bound(product_id, "sale_price_start_date", start)?;
    let end = parse_bound(product_id, "sale_price_end_date", end)?;

    Ok(match (start, end) {
        (None, None) => None,
        (start, end) => Some((
            start.unwrap_or_else(|| SALE_START_SENTINEL.to_string()),
            end.unwrap_or_else(|| SALE_END_SENTINEL.to_string()),
        )),
    })
}

/// Parse a date-only bound as stored by the platform and normalize it to
/// midnight UTC. Empty strings count as absent.
fn parse_bound(
    product_id: ProductId,
    field: &'static str,
    raw: Option<&str>,
) -> CatalogResult<Option<String>> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };

    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
        CatalogError::validation(product_id, field, format!("unparsable date `{raw}`: {e}"))
    })?;

    Ok(Some(format!("{}T00:00:00+00:00", date.format("%Y-%m-%d"))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id() -> ProductId {
        ProductId::new(1201)
    }

    fn resolve_both(
        sale_price: Option<Decimal>,
        start: Option<&str>,
        end: Option<&str>,
    ) -> (SalePriceFields, SalePriceFields) {
        let feed = resolve(id(), sale_price, start, end, "USD", ExportMode::Feed).unwrap();
        let batch = resolve(id(), sale_price, start, end, "USD", ExportMode::ItemsBatch).unwrap();
        (feed, batch)
    }

    #[test]
    fn sale_price_with_no_dates_has_no_window() {
        let (feed, batch) = resolve_both(Some(Decimal::new(115, 1)), None, None);

        assert_eq!(
            feed,
            SalePriceFields::Feed {
                sale_price: "11.5 USD".to_string(),
                start_date: String::new(),
                end_date: String::new(),
            }
        );
        assert_eq!(
            batch,
            SalePriceFields::ItemsBatch {
                sale_price_minor: Some(1150),
                effective_date: String::new(),
            }
        );
    }

    #[test]
    fn zero_sale_price_is_a_real_sale() {
        let (feed, batch) = resolve_both(Some(Decimal::ZERO), None, None);

        assert_eq!(
            feed,
            SalePriceFields::Feed {
                sale_price: "0 USD".to_string(),
                start_date: String::new(),
                end_date: String::new(),
            }
        );
        assert_eq!(
            batch,
            SalePriceFields::ItemsBatch {
                sale_price_minor: Some(0),
                effective_date: String::new(),
            }
        );
    }

    #[test]
    fn no_sale_price_empties_every_sale_field() {
        let (feed, batch) = resolve_both(None, None, None);

        assert_eq!(
            feed,
            SalePriceFields::Feed {
                sale_price: String::new(),
                start_date: String::new(),
                end_date: String::new(),
            }
        );
        assert_eq!(
            batch,
            SalePriceFields::ItemsBatch {
                sale_price_minor: None,
                effective_date: String::new(),
            }
        );
    }

    #[test]
    fn dates_without_a_sale_price_have_no_effect() {
        let (feed, batch) = resolve_both(None, Some("2024-08-08"), Some("2024-08-18"));

        assert_eq!(
            feed,
            SalePriceFields::Feed {
                sale_price: String::new(),
                start_date: String::new(),
                end_date: String::new(),
            }
        );
        assert_eq!(
            batch,
            SalePriceFields::ItemsBatch {
                sale_price_minor: None,
                effective_date: String::new(),
            }
        );
    }

    #[test]
    fn malformed_dates_are_not_parsed_without_a_sale_price() {
        let (_, batch) = resolve_both(None, Some("whenever"), None);
        assert!(matches!(
            batch,
            SalePriceFields::ItemsBatch {
                sale_price_minor: None,
                ..
            }
        ));
    }

    #[test]
    fn missing_end_defaults_to_the_far_future_sentinel() {
        let (feed, batch) = resolve_both(Some(Decimal::from(11)), Some("2024-08-08"), None);

        assert_eq!(
            feed,
            SalePriceFields::Feed {
                sale_price: "11 USD".to_string(),
                start_date: "2024-08-08T00:00:00+00:00".to_string(),
                end_date: SALE_END_SENTINEL.to_string(),
            }
        );
        assert_eq!(
            batch,
            SalePriceFields::ItemsBatch {
                sale_price_minor: Some(1100),
                effective_date: "2024-08-08T00:00:00+00:00/2038-01-17T23:59+00:00".to_string(),
            }
        );
    }

    #[test]
    fn missing_start_defaults_to_the_historical_sentinel() {
        let (feed, batch) = resolve_both(Some(Decimal::from(11)), None, Some("2024-08-08"));

        assert_eq!(
            feed,
            SalePriceFields::Feed {
                sale_price: "11 USD".to_string(),
                start_date: SALE_START_SENTINEL.to_string(),
                end_date: "2024-08-08T00:00:00+00:00".to_string(),
            }
        );
        assert_eq!(
            batch,
            SalePriceFields::ItemsBatch {
                sale_price_minor: Some(1100),
                effective_date: "1970-01-29T00:00:00+00:00/2024-08-08T00:00:00+00:00".to_string(),
            }
        );
    }

    #[test]
    fn both_bounds_are_used_as_given() {
        let (feed, batch) =
            resolve_both(Some(Decimal::from(11)), Some("2024-08-08"), Some("2024-08-09"));

        assert_eq!(
            feed,
            SalePriceFields::Feed {
                sale_price: "11 USD".to_string(),
                start_date: "2024-08-08T00:00:00+00:00".to_string(),
                end_date: "2024-08-09T00:00:00+00:00".to_string(),
            }
        );
        assert_eq!(
            batch,
            SalePriceFields::ItemsBatch {
                sale_price_minor: Some(1100),
                effective_date: "2024-08-08T00:00:00+00:00/2024-08-09T00:00:00+00:00".to_string(),
            }
        );
    }

    #[test]
    fn trailing_zeros_are_normalized_in_feed_prices() {
        let fields = resolve(
            id(),
            Some(Decimal::new(1150, 2)),
            None,
            None,
            "USD",
            ExportMode::Feed,
        )
        .unwrap();

        assert!(matches!(
            fields,
            SalePriceFields::Feed { ref sale_price, .. } if sale_price == "11.5 USD"
        ));
    }

    #[test]
    fn currency_code_is_taken_from_config() {
        let fields = resolve(
            id(),
            Some(Decimal::from(11)),
            None,
            None,
            "EUR",
            ExportMode::Feed,
        )
        .unwrap();

        assert!(matches!(
            fields,
            SalePriceFields::Feed { ref sale_price, .. } if sale_price == "11 EUR"
        ));
    }

    #[test]
    fn empty_date_strings_count_as_absent() {
        let (_, batch) = resolve_both(Some(Decimal::from(11)), Some(""), Some("  "));

        assert_eq!(
            batch,
            SalePriceFields::ItemsBatch {
                sale_price_minor: Some(1100),
                effective_date: String::new(),
            }
        );
    }

    #[test]
    fn malformed_start_date_names_field_and_product() {
        let err = resolve(
            id(),
            Some(Decimal::from(11)),
            Some("08/08/2024"),
            None,
            "USD",
            ExportMode::ItemsBatch,
        )
        .unwrap_err();

        match err {
            CatalogError::Validation {
                product_id, field, ..
            } => {
                assert_eq!(product_id, id());
                assert_eq!(field, "sale_price_start_date");
            }
            other => panic!("expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_end_date_names_field_and_product() {
        let err = resolve(
            id(),
            Some(Decimal::from(11)),
            None,
            Some("next tuesday"),
            "USD",
            ExportMode::Feed,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            CatalogError::Validation {
                field: "sale_price_end_date",
                ..
            }
        ));
    }

    #[test]
    fn fractional_cents_round_away_from_zero() {
        assert_eq!(
            to_minor_units(id(), "sale_price", Decimal::new(11005, 3)).unwrap(),
            1101
        );
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: resolution is deterministic.
            #[test]
            fn resolve_is_deterministic(cents in 0i64..10_000_000, day in 1u32..28) {
                let price = Decimal::new(cents, 2);
                let start = format!("2024-08-{day:02}");

                let a = resolve(id(), Some(price), Some(&start), None, "USD", ExportMode::ItemsBatch).unwrap();
                let b = resolve(id(), Some(price), Some(&start), None, "USD", ExportMode::ItemsBatch).unwrap();
                prop_assert_eq!(a, b);
            }

            /// Property: minor-unit conversion inverts a two-decimal price.
            #[test]
            fn minor_units_invert_two_decimal_prices(cents in 0i64..10_000_000) {
                let price = Decimal::new(cents, 2);
                prop_assert_eq!(to_minor_units(id(), "sale_price", price).unwrap(), cents);
            }

            /// Property: a set sale price with at least one bound always
            /// yields a `{start}/{end}` combined field.
            #[test]
            fn one_bound_always_yields_a_window(day in 1u32..28) {
                let start = format!("2024-08-{day:02}");
                let fields = resolve(
                    id(),
                    Some(Decimal::from(11)),
                    Some(&start),
                    None,
                    "USD",
                    ExportMode::ItemsBatch,
                )
                .unwrap();

                match fields {
                    SalePriceFields::ItemsBatch { effective_date, .. } => {
                        prop_assert!(effective_date.ends_with(SALE_END_SENTINEL));
                        prop_assert!(effective_date.contains('/'));
                    }
                    other => prop_assert!(false, "expected batch fields, got {:?}", other),
                }
            }
        }
    }
}
