//! # storefront-checkout: Checkout Orchestration
//!
//! Drives a shopper's checkout over the pure pricing engine in
//! `storefront-core`, and owns the ambient concerns the core stays free of:
//! configuration loading, structured logging and I/O errors.
//!
//! ## Modules
//! - [`config`] - Pricing tables and defaults from TOML + environment
//! - [`session`] - Cart, checkout selections, quotes and completion
//! - [`error`] - Checkout error types
//!
//! ## Example
//! ```rust
//! use storefront_checkout::{CheckoutConfig, CheckoutSession};
//! use storefront_core::{PaymentMethod, Product, SalesLedger};
//!
//! let config = CheckoutConfig::default();
//! let mut session = CheckoutSession::from_config(&config);
//! let product = Product {
//!     id: "p1".into(),
//!     name: "Tablet".into(),
//!     price_cents: 120_000,
//!     description: String::new(),
//!     image_url: None,
//!     owner_id: "admin".into(),
//!     options: "256GB".into(),
//!     category: "tablets".into(),
//! };
//!
//! session.add_to_cart(&product, "LTE");
//! session.select_payment_method(PaymentMethod::Installment);
//! let quote = session.quote().unwrap();
//! assert_eq!(quote.amount_due().cents(), 127345);
//!
//! let mut ledger = SalesLedger::new();
//! session.complete(&mut ledger).unwrap();
//! assert_eq!(ledger.total_sales("p1"), 1);
//! ```

pub mod config;
pub mod error;
pub mod session;

pub use config::{CheckoutConfig, CheckoutSettings};
pub use error::{CheckoutError, CheckoutResult};
pub use session::{CheckoutQuote, CheckoutReceipt, CheckoutSession};

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_checkout=trace` - Trace this crate only
/// - Default: INFO, DEBUG for the storefront crates
///
/// Safe to call more than once; later calls leave the first subscriber in place.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront_checkout=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
