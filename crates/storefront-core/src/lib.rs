//! # storefront-core: Pure Pricing Logic for the Storefront
//!
//! This crate holds the storefront's domain logic as pure functions with zero
//! I/O: cart aggregation, checkout pricing, installment interest and the
//! sales tally.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                       Mobile App (views)                        │   │
//! │  │     Catalog ──► Product Detail ──► Cart ──► Checkout            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            storefront-checkout (CheckoutSession)                │   │
//! │  │        config (TOML + env) • tracing • typed errors             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌─────────┐           │   │
//! │  │   │  money  │  │  cart   │  │ pricing │  │  sales  │           │   │
//! │  │   │  Money  │  │  Cart   │  │ voucher │  │ Ledger  │           │   │
//! │  │   │         │  │CartLine │  │ student │  │ report  │           │   │
//! │  │   │         │  │         │  │ install │  │         │           │   │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └─────────┘           │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, InstallmentPlan, etc.)
//! - [`money`] - Money type with integer cents
//! - [`cart`] - Cart and merge-by-(product, variant) rules
//! - [`pricing`] - Voucher/student discounts, final price, installments
//! - [`sales`] - Units-sold ledger and revenue report
//! - [`validation`] - Product form validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::money::Money;
//! use storefront_core::pricing::{
//!     final_price, installment_schedule, student_discount, voucher_discount,
//! };
//!
//! let total = Money::from_major_minor(1200, 0);
//! let voucher = voucher_discount(total, "giam10");
//! let student = student_discount(total, "SV001");
//! let due = final_price(total, voucher, student);
//! assert_eq!(due, Money::from_major_minor(1020, 0));
//!
//! let schedule = installment_schedule(due, 1).unwrap();
//! assert_eq!(schedule.plan.months, 6);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod sales;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::{InstallmentSchedule, PriceBreakdown, PricingRules, VoucherRule};
pub use sales::{SalesLedger, SalesReportRow};
pub use types::*;
