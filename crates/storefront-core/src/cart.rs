//! # Cart
//!
//! The shopping cart and its aggregation rules.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Shopper Action           Operation               Cart Change           │
//! │  ──────────────           ─────────               ───────────           │
//! │                                                                         │
//! │  "Add to cart" ──────────► add_or_increment() ──► qty += 1 or push     │
//! │                                                                         │
//! │  Swipe to delete ────────► remove_line() ───────► retain(id != x)      │
//! │                                                                         │
//! │  Checkout done ──────────► clear() ─────────────► lines.clear()        │
//! │                                                                         │
//! │  Totals ─────────────────► total() ─────────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart is a plain owned value. Whoever holds it serializes their own
//! mutations; nothing in here is shared.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;

/// One (product, selected variant, quantity) entry in the cart.
///
/// ## Design Notes
/// - `id`: handle used to remove the line (UUID v4)
/// - product fields are a snapshot taken when the line is created, so the
///   cart keeps its price even if the catalog changes afterwards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: String,

    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub product_name: String,

    /// Product owner at time of adding (frozen), carried onto the sale record.
    pub owner_id: String,

    pub selected_variant: String,

    /// Always >= 1.
    pub quantity: i64,

    /// Price in cents at time of adding (frozen).
    pub unit_price_cents: i64,
}

impl CartLine {
    /// Creates a line with quantity 1 for `product` in `variant`.
    pub fn new(product: &Product, variant: &str) -> Self {
        CartLine {
            id: Uuid::new_v4().to_string(),
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            owner_id: product.owner_id.clone(),
            selected_variant: variant.to_string(),
            quantity: 1,
            unit_price_cents: product.price_cents,
        }
    }

    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Unit price × quantity.
    ///
    /// # Errors
    /// [`CoreError::AmountOverflow`] if the product does not fit in cents.
    pub fn line_total(&self) -> CoreResult<Money> {
        self.unit_price()
            .checked_multiply_quantity(self.quantity)
            .ok_or_else(|| CoreError::amount_overflow("cart line total"))
    }

    /// Whether this line holds `product_id` in `variant`.
    fn matches(&self, product_id: &str, variant: &str) -> bool {
        self.product_id == product_id && self.selected_variant == variant
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by (product id, variant)
/// - Every line has quantity >= 1
/// - `total()` is the sum of line totals, zero when empty, and fails
///   rather than wrapping when the sum leaves `i64` cents
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds one unit of `product` in `variant`.
    ///
    /// If a line for the same product and variant exists its quantity goes
    /// up by one, otherwise a new line with quantity 1 is appended.
    ///
    /// ```rust
    /// use storefront_core::{Cart, Product};
    ///
    /// let product = Product {
    ///     id: "p1".into(),
    ///     name: "Phone".into(),
    ///     price_cents: 1000,
    ///     description: String::new(),
    ///     image_url: None,
    ///     owner_id: "admin".into(),
    ///     options: "128GB".into(),
    ///     category: "phones".into(),
    /// };
    ///
    /// let mut cart = Cart::new();
    /// cart.add_or_increment(&product, "Black");
    /// cart.add_or_increment(&product, "Black");
    /// assert_eq!(cart.line_count(), 1);
    /// assert_eq!(cart.total_quantity(), 2);
    /// ```
    pub fn add_or_increment(&mut self, product: &Product, variant: &str) -> &CartLine {
        let existing = self
            .lines
            .iter()
            .position(|l| l.matches(&product.id, variant));
        let index = match existing {
            Some(index) => {
                self.lines[index].quantity += 1;
                index
            }
            None => {
                self.lines.push(CartLine::new(product, variant));
                self.lines.len() - 1
            }
        };
        &self.lines[index]
    }

    /// Removes the line with `line_id`.
    ///
    /// Unknown ids leave the cart untouched. Returns whether a line was removed.
    pub fn remove_line(&mut self, line_id: &str) -> bool {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.id != line_id);
        self.lines.len() != initial_len
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up a line by id.
    pub fn line(&self, line_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    /// Number of distinct (product, variant) lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of unit price × quantity over all lines.
    ///
    /// # Errors
    /// [`CoreError::AmountOverflow`] if a line total or the sum does not fit
    /// in cents.
    pub fn total(&self) -> CoreResult<Money> {
        self.lines.iter().try_fold(Money::zero(), |acc, line| {
            acc.checked_add(line.line_total()?)
                .ok_or_else(|| CoreError::amount_overflow("cart total"))
        })
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Cart totals summary for the app's cart badge and cart screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub total: Money,
}

impl TryFrom<&Cart> for CartTotals {
    type Error = CoreError;

    fn try_from(cart: &Cart) -> CoreResult<Self> {
        Ok(CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            total: cart.total()?,
        })
    }
}
