//! # Domain Types
//!
//! Core domain types shared by the cart, pricing and sales modules.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │ InstallmentPlan │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (doc id)    │   │  id (UUID)      │   │  months         │       │
//! │  │  name, category │   │  product_id     │   │  monthly rate   │       │
//! │  │  price_cents    │   │  quantity       │   │  3 / 6 / 12     │       │
//! │  │  options        │   │  price_cents    │   └─────────────────┘       │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  DiscountRate   │   │ PaymentMethod   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  bps (u32)      │   │  BankTransfer   │                             │
//! │  │  1000 = 10%     │   │  Installment    │                             │
//! │  └─────────────────┘   │  ApplePay       │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::CartLine;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Discount Rate
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 1000 bps = 10% and 500 bps = 5%.
/// Used for voucher discounts, the student discount and monthly interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// 100% expressed in basis points.
    pub const FULL_BPS: u32 = 10_000;

    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a rate from a whole percentage (`from_percent(5)` = 5%).
    #[inline]
    pub const fn from_percent(pct: u32) -> Self {
        DiscountRate(pct * 100)
    }

    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog, as stored in the products collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Document identifier from the product store.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Price in cents.
    pub price_cents: i64,

    pub description: String,

    /// Public URL of the uploaded product image, if any.
    pub image_url: Option<String>,

    /// Admin account that created the product.
    pub owner_id: String,

    /// Specification chosen on the admin form, e.g. `"64GB/8GB RAM"`.
    ///
    /// Descriptive only. The variant a shopper picks is a separate string
    /// carried on the cart line.
    pub options: String,

    pub category: String,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the shopper pays at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Bank transfer, paid in full.
    BankTransfer,
    /// Deferred payment over one of the installment plans.
    Installment,
    /// Apple Pay, paid in full.
    ApplePay,
}

impl PaymentMethod {
    /// Whether the amount due is spread over an installment plan.
    pub fn is_installment(&self) -> bool {
        matches!(self, PaymentMethod::Installment)
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::BankTransfer => write!(f, "bank_transfer"),
            PaymentMethod::Installment => write!(f, "installment"),
            PaymentMethod::ApplePay => write!(f, "apple_pay"),
        }
    }
}

// =============================================================================
// Installment Plan
// =============================================================================

/// A fixed-duration, fixed-rate deferred payment plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InstallmentPlan {
    /// Number of monthly payments.
    pub months: u32,

    /// Interest compounded once per month.
    pub monthly_rate_bps: DiscountRate,
}

impl InstallmentPlan {
    pub const fn new(months: u32, monthly_rate_bps: u32) -> Self {
        InstallmentPlan {
            months,
            monthly_rate_bps: DiscountRate::from_bps(monthly_rate_bps),
        }
    }
}

/// The installment plans offered at checkout, selected by index.
pub const INSTALLMENT_PLANS: [InstallmentPlan; 3] = [
    InstallmentPlan::new(3, 200),
    InstallmentPlan::new(6, 300),
    InstallmentPlan::new(12, 500),
];

// =============================================================================
// Sale
// =============================================================================

/// A sale record, one per cart line at checkout.
/// Uses the snapshot pattern: the price is frozen at time of sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    pub product_id: String,
    pub quantity: i64,
    /// Unit price in cents at time of sale.
    pub price_cents: i64,
    #[ts(as = "String")]
    pub date: DateTime<Utc>,
    /// Owner of the product sold.
    pub owner_id: String,
}

impl Sale {
    /// Builds the sale record for a checked-out cart line.
    pub fn from_line(line: &CartLine, date: DateTime<Utc>) -> Self {
        Sale {
            id: Uuid::new_v4().to_string(),
            product_id: line.product_id.clone(),
            quantity: line.quantity,
            price_cents: line.unit_price_cents,
            date,
            owner_id: line.owner_id.clone(),
        }
    }

    /// Returns the revenue of this sale (price × quantity).
    pub fn revenue(&self) -> CoreResult<Money> {
        Money::from_cents(self.price_cents)
            .checked_multiply_quantity(self.quantity)
            .ok_or_else(|| CoreError::amount_overflow("sale revenue"))
    }
}
