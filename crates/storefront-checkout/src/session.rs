//! # Checkout Session
//!
//! One shopper's cart plus the choices made on the checkout screen.
//!
//! ## Checkout Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Checkout Lifecycle                                   │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│ Receipt  │       │
//! │  │  Cart    │     │          │     │  Screen  │     │          │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                 │                │             │
//! │                  add_to_cart       set_voucher_code    complete()       │
//! │                  remove_line       set_student_id      records sales,   │
//! │                                    select_payment_     clears the cart  │
//! │                                    method / plan                        │
//! │                                    quote()                              │
//! │                        ▲                                  │             │
//! │                        └──────────────────────────────────┘             │
//! │                               (back to empty)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_core::{
    Cart, CartLine, InstallmentSchedule, Money, PaymentMethod, PriceBreakdown, PricingRules,
    Product, Sale, SalesLedger,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::CheckoutConfig;
use crate::error::{CheckoutError, CheckoutResult};

/// Price shown on the checkout screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutQuote {
    pub breakdown: PriceBreakdown,

    /// Present only when the installment payment method is selected.
    pub installment: Option<InstallmentSchedule>,
}

impl CheckoutQuote {
    /// What the shopper ends up paying in total.
    pub fn amount_due(&self) -> Money {
        match &self.installment {
            Some(schedule) => schedule.total_with_interest,
            None => self.breakdown.final_price,
        }
    }
}

/// Result of a confirmed checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub id: String,
    pub payment_method: PaymentMethod,
    pub quote: CheckoutQuote,
    /// The cart lines as they were when checkout was confirmed.
    pub lines: Vec<CartLine>,
    /// One sale record per line, for the sales collection.
    pub sales: Vec<Sale>,
    pub completed_at: DateTime<Utc>,
}

/// A shopper's cart and checkout selections.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    rules: PricingRules,
    cart: Cart,
    voucher_code: String,
    student_id: String,
    payment_method: Option<PaymentMethod>,
    installment_plan: usize,
}

impl CheckoutSession {
    /// Creates a session with an empty cart priced by `rules`.
    pub fn new(rules: PricingRules) -> Self {
        CheckoutSession {
            rules,
            cart: Cart::new(),
            voucher_code: String::new(),
            student_id: String::new(),
            payment_method: None,
            installment_plan: 0,
        }
    }

    /// Creates a session from loaded configuration.
    pub fn from_config(config: &CheckoutConfig) -> Self {
        CheckoutSession {
            installment_plan: config.checkout.default_installment_plan,
            ..Self::new(config.pricing.clone())
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn rules(&self) -> &PricingRules {
        &self.rules
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    pub fn installment_plan(&self) -> usize {
        self.installment_plan
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Adds one unit of `product` in `variant` to the cart. Never fails.
    pub fn add_to_cart(&mut self, product: &Product, variant: &str) -> &CartLine {
        let line = self.cart.add_or_increment(product, variant);
        debug!(
            product_id = %line.product_id,
            variant = %line.selected_variant,
            quantity = line.quantity,
            "Added to cart"
        );
        line
    }

    /// Removes a cart line; unknown ids are ignored.
    pub fn remove_line(&mut self, line_id: &str) -> bool {
        let removed = self.cart.remove_line(line_id);
        debug!(line_id, removed, "Remove cart line");
        removed
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        debug!("Cart cleared");
    }

    // =========================================================================
    // Checkout Selections
    // =========================================================================

    pub fn set_voucher_code(&mut self, code: impl Into<String>) {
        self.voucher_code = code.into();
        debug!(code = %self.voucher_code, "Voucher code set");
    }

    pub fn set_student_id(&mut self, student_id: impl Into<String>) {
        self.student_id = student_id.into();
        debug!("Student id set");
    }

    pub fn select_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = Some(method);
        debug!(%method, "Payment method selected");
    }

    /// Selects an installment plan by index into the plan table.
    ///
    /// # Errors
    /// [`CheckoutError::Core`] wrapping `InvalidArgument` if the index does
    /// not exist; the current selection is kept.
    pub fn select_installment_plan(&mut self, plan_index: usize) -> CheckoutResult<()> {
        let plan = self.rules.installment_plan(plan_index)?;
        self.installment_plan = plan_index;
        debug!(plan_index, months = plan.months, "Installment plan selected");
        Ok(())
    }

    // =========================================================================
    // Pricing
    // =========================================================================

    /// Prices the cart with the current selections.
    ///
    /// # Errors
    /// [`CheckoutError::Core`] if the cart total overflows, or the selected
    /// installment plan no longer exists.
    pub fn quote(&self) -> CheckoutResult<CheckoutQuote> {
        let breakdown = self
            .rules
            .quote(&self.cart, &self.voucher_code, &self.student_id)?;

        let installment = match self.payment_method {
            Some(method) if method.is_installment() => Some(
                self.rules
                    .installment_schedule(breakdown.final_price, self.installment_plan)?,
            ),
            _ => None,
        };

        Ok(CheckoutQuote {
            breakdown,
            installment,
        })
    }

    /// Confirms checkout.
    ///
    /// Records every cart line into `ledger`, empties the cart and returns the
    /// receipt. Voucher, student id and payment selections are kept for the
    /// next order, matching the checkout screen.
    ///
    /// # Errors
    /// - [`CheckoutError::PaymentMethodRequired`] if no method is selected
    /// - [`CheckoutError::EmptyCart`] if there is nothing to buy
    ///
    /// Nothing is recorded when an error is returned.
    pub fn complete(&mut self, ledger: &mut SalesLedger) -> CheckoutResult<CheckoutReceipt> {
        let payment_method = self
            .payment_method
            .ok_or(CheckoutError::PaymentMethodRequired)?;
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let quote = self.quote()?;
        let completed_at = Utc::now();

        ledger.record_cart(&self.cart);
        let lines = self.cart.lines().to_vec();
        let sales = lines
            .iter()
            .map(|line| Sale::from_line(line, completed_at))
            .collect();
        self.cart.clear();

        let receipt = CheckoutReceipt {
            id: Uuid::new_v4().to_string(),
            payment_method,
            quote,
            lines,
            sales,
            completed_at,
        };

        info!(
            receipt_id = %receipt.id,
            %payment_method,
            lines = receipt.lines.len(),
            amount_due = %quote.amount_due(),
            "Checkout completed"
        );

        Ok(receipt)
    }
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new(PricingRules::default())
    }
}
