//! # Sales Ledger
//!
//! Running tally of units sold per product, fed by completed checkouts and
//! read by the admin revenue screen.
//!
//! The ledger is an ordinary value: checkout takes it by `&mut` to record,
//! reporting takes it by `&`. Sharing it across threads is the owner's call.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, Sale};

/// Units sold, keyed by product id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesLedger {
    units: HashMap<String, i64>,
}

impl SalesLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units to `product_id`.
    pub fn record_sale(&mut self, product_id: &str, quantity: i64) {
        *self.units.entry(product_id.to_string()).or_insert(0) += quantity;
    }

    /// Records every line of `cart`.
    pub fn record_cart(&mut self, cart: &Cart) {
        for line in cart.lines() {
            self.record_sale(&line.product_id, line.quantity);
        }
    }

    /// Rebuilds a ledger from stored sale records.
    pub fn from_sales<'a>(sales: impl IntoIterator<Item = &'a Sale>) -> Self {
        let mut ledger = Self::new();
        for sale in sales {
            ledger.record_sale(&sale.product_id, sale.quantity);
        }
        ledger
    }

    /// Units sold for `product_id`; zero if never sold.
    pub fn total_sales(&self, product_id: &str) -> i64 {
        self.units.get(product_id).copied().unwrap_or(0)
    }

    /// Units sold × current price, summed over `products`.
    ///
    /// Products missing from `products` contribute nothing.
    ///
    /// # Errors
    /// [`CoreError::AmountOverflow`] if the revenue does not fit in cents.
    pub fn total_revenue(&self, products: &[Product]) -> CoreResult<Money> {
        products.iter().try_fold(Money::zero(), |acc, p| {
            acc.checked_add(self.product_revenue(p)?)
                .ok_or_else(|| CoreError::amount_overflow("total revenue"))
        })
    }

    /// One report row per product, in the order of `products`.
    ///
    /// # Errors
    /// [`CoreError::AmountOverflow`] if a row total does not fit in cents.
    pub fn report(&self, products: &[Product]) -> CoreResult<Vec<SalesReportRow>> {
        products
            .iter()
            .map(|p| {
                Ok(SalesReportRow {
                    product_id: p.id.clone(),
                    name: p.name.clone(),
                    quantity: self.total_sales(&p.id),
                    unit_price: p.price(),
                    total: self.product_revenue(p)?,
                })
            })
            .collect()
    }

    fn product_revenue(&self, product: &Product) -> CoreResult<Money> {
        product
            .price()
            .checked_multiply_quantity(self.total_sales(&product.id))
            .ok_or_else(|| CoreError::amount_overflow("product revenue"))
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// A row of the admin sales report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesReportRow {
    pub product_id: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub total: Money,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::cart::CartLine;

    fn product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            price_cents,
            description: String::new(),
            image_url: None,
            owner_id: "owner".to_string(),
            options: "Standard".to_string(),
            category: "misc".to_string(),
        }
    }

    #[test]
    fn test_record_and_total_sales() {
        let mut ledger = SalesLedger::new();
        assert!(ledger.is_empty());

        ledger.record_sale("p1", 2);
        ledger.record_sale("p1", 3);
        ledger.record_sale("p2", 1);

        assert_eq!(ledger.total_sales("p1"), 5);
        assert_eq!(ledger.total_sales("p2"), 1);
        assert_eq!(ledger.total_sales("unknown"), 0);
    }

    #[test]
    fn test_record_cart() {
        let p1 = product("p1", 1000);
        let mut cart = Cart::new();
        cart.add_or_increment(&p1, "A");
        cart.add_or_increment(&p1, "A");
        cart.add_or_increment(&p1, "B");

        let mut ledger = SalesLedger::new();
        ledger.record_cart(&cart);

        // Variants of the same product roll up together
        assert_eq!(ledger.total_sales("p1"), 3);
    }

    #[test]
    fn test_total_revenue_uses_current_prices() {
        let products = vec![product("p1", 1000), product("p2", 250)];
        let mut ledger = SalesLedger::new();
        ledger.record_sale("p1", 2);
        ledger.record_sale("p2", 4);
        ledger.record_sale("gone", 10);

        assert_eq!(ledger.total_revenue(&products).unwrap().cents(), 3000);
        assert!(SalesLedger::new().total_revenue(&products).unwrap().is_zero());
    }

    #[test]
    fn test_report_rows_follow_product_order() {
        let products = vec![product("p2", 250), product("p1", 1000)];
        let mut ledger = SalesLedger::new();
        ledger.record_sale("p1", 2);

        let rows = ledger.report(&products).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].product_id, "p2");
        assert_eq!(rows[0].quantity, 0);
        assert!(rows[0].total.is_zero());
        assert_eq!(rows[1].quantity, 2);
        assert_eq!(rows[1].total.cents(), 2000);
    }

    #[test]
    fn test_revenue_overflow_is_an_error() {
        let products = vec![product("p1", i64::MAX / 2)];
        let mut ledger = SalesLedger::new();
        ledger.record_sale("p1", 3);

        assert!(matches!(
            ledger.total_revenue(&products),
            Err(CoreError::AmountOverflow { .. })
        ));
        assert!(ledger.report(&products).is_err());
    }

    #[test]
    fn test_from_sales() {
        let p1 = product("p1", 1000);
        let line = CartLine {
            quantity: 4,
            ..CartLine::new(&p1, "A")
        };
        let sales = vec![Sale::from_line(&line, Utc::now()), Sale::from_line(&line, Utc::now())];

        let ledger = SalesLedger::from_sales(&sales);
        assert_eq!(ledger.total_sales("p1"), 8);
    }
}
