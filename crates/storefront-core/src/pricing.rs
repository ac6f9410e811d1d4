//! # Pricing
//!
//! Checkout pricing: voucher and student discounts, the final price and
//! installment schedules.
//!
//! ## Checkout Price Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Cart.total ─┬─► voucher_discount(code)      GIAM10 10%, SALE50 50%     │
//! │              │                                                          │
//! │              ├─► student_discount(id)        "SV…" / "VNEDU…" 5%        │
//! │              │                                                          │
//! │              └─► final_price = max(0, total − voucher − student)        │
//! │                        │                                                │
//! │                        ▼                                                │
//! │              installment_schedule(plan)      final × (1 + r)^months     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both discounts are taken from the undiscounted total and are not capped
//! individually. Their sum is absorbed by the zero clamp in [`final_price`].
//!
//! The free functions use the standard tables. [`PricingRules`] carries the
//! same tables as data so a deployment can load its own.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{DiscountRate, InstallmentPlan, INSTALLMENT_PLANS};

/// Voucher codes and their discount, matched case-insensitively.
pub const STANDARD_VOUCHERS: [(&str, DiscountRate); 2] = [
    ("GIAM10", DiscountRate::from_percent(10)),
    ("SALE50", DiscountRate::from_percent(50)),
];

/// Student id prefixes that qualify for the student discount (case-sensitive).
pub const STUDENT_ID_PREFIXES: [&str; 2] = ["SV", "VNEDU"];

pub const STUDENT_DISCOUNT: DiscountRate = DiscountRate::from_percent(5);

// =============================================================================
// Free functions over the standard tables
// =============================================================================

/// Discount granted by a voucher `code` on `total`.
///
/// Unknown and empty codes give zero. The code must match exactly apart
/// from letter case; surrounding whitespace is not stripped.
///
/// ```rust
/// use storefront_core::money::Money;
/// use storefront_core::pricing::voucher_discount;
///
/// let total = Money::from_major_minor(100, 0);
/// assert_eq!(voucher_discount(total, "giam10"), Money::from_major_minor(10, 0));
/// assert_eq!(voucher_discount(total, "SALE50"), Money::from_major_minor(50, 0));
/// assert_eq!(voucher_discount(total, "bogus"), Money::zero());
/// ```
pub fn voucher_discount(total: Money, code: &str) -> Money {
    STANDARD_VOUCHERS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .map(|(_, rate)| total.percentage_of(*rate))
        .unwrap_or_default()
}

/// Discount granted for a student id on `total`.
///
/// ```rust
/// use storefront_core::money::Money;
/// use storefront_core::pricing::student_discount;
///
/// let total = Money::from_major_minor(100, 0);
/// assert_eq!(student_discount(total, "SV12345"), Money::from_major_minor(5, 0));
/// assert_eq!(student_discount(total, "random"), Money::zero());
/// ```
pub fn student_discount(total: Money, student_id: &str) -> Money {
    if STUDENT_ID_PREFIXES
        .iter()
        .any(|prefix| student_id.starts_with(prefix))
    {
        total.percentage_of(STUDENT_DISCOUNT)
    } else {
        Money::zero()
    }
}

/// `total − voucher − student`, clamped at zero.
///
/// ```rust
/// use storefront_core::money::Money;
/// use storefront_core::pricing::final_price;
///
/// let m = |d| Money::from_major_minor(d, 0);
/// assert_eq!(final_price(m(100), m(10), m(5)), m(85));
/// assert_eq!(final_price(m(100), m(60), m(50)), Money::zero());
/// ```
pub fn final_price(total: Money, voucher_discount: Money, student_discount: Money) -> Money {
    (total - voucher_discount - student_discount).clamp_non_negative()
}

/// Installment schedule for `final_price` on the standard plan at `plan_index`.
///
/// # Errors
/// [`CoreError::InvalidArgument`] if `plan_index` is not 0, 1 or 2.
pub fn installment_schedule(
    final_price: Money,
    plan_index: usize,
) -> CoreResult<InstallmentSchedule> {
    let plan = plan_at(&INSTALLMENT_PLANS, plan_index)?;
    InstallmentSchedule::compute(final_price, plan)
}

fn plan_at(plans: &[InstallmentPlan], plan_index: usize) -> CoreResult<InstallmentPlan> {
    plans.get(plan_index).copied().ok_or_else(|| {
        CoreError::invalid_argument(
            "plan_index",
            format!("index {} out of range (0..{})", plan_index, plans.len()),
        )
    })
}

// =============================================================================
// Installment Schedule
// =============================================================================

/// What the shopper pays on an installment plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentSchedule {
    pub plan: InstallmentPlan,

    /// `principal × (1 + monthly rate)^months`, rounded to the cent.
    pub total_with_interest: Money,

    /// `total_with_interest / months`, rounded to the cent.
    pub monthly_payment: Money,
}

impl InstallmentSchedule {
    /// Compounds monthly interest on `principal` over the plan duration.
    ///
    /// The compounding and the monthly split both run on the exact decimal
    /// value; each output is rounded to the cent on its own.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    /// use storefront_core::pricing::InstallmentSchedule;
    /// use storefront_core::types::InstallmentPlan;
    ///
    /// let schedule = InstallmentSchedule::compute(
    ///     Money::from_major_minor(1200, 0),
    ///     InstallmentPlan::new(3, 200),
    /// ).unwrap();
    /// assert_eq!(schedule.total_with_interest.cents(), 127345); // 1273.45
    /// assert_eq!(schedule.monthly_payment.cents(), 42448);      // 424.48
    /// ```
    pub fn compute(principal: Money, plan: InstallmentPlan) -> CoreResult<Self> {
        if plan.months == 0 {
            return Err(CoreError::invalid_argument(
                "months",
                "installment plan must span at least one month",
            ));
        }

        let overflow = || CoreError::amount_overflow("installment interest");

        let growth = Decimal::ONE + Decimal::new(i64::from(plan.monthly_rate_bps.bps()), 4);
        let exact_total = (0..plan.months).try_fold(principal.to_decimal(), |acc, _| {
            acc.checked_mul(growth)
        });
        let exact_total = exact_total.ok_or_else(overflow)?;
        let exact_monthly = exact_total / Decimal::from(plan.months);

        Ok(InstallmentSchedule {
            plan,
            total_with_interest: Money::from_decimal(exact_total).ok_or_else(overflow)?,
            monthly_payment: Money::from_decimal(exact_monthly).ok_or_else(overflow)?,
        })
    }

    /// Interest paid on top of the principal.
    pub fn interest(&self, principal: Money) -> Money {
        self.total_with_interest - principal
    }
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// Checkout price with each discount itemized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub subtotal: Money,
    pub voucher_discount: Money,
    pub student_discount: Money,
    pub final_price: Money,
}

impl PriceBreakdown {
    /// Sum of both discounts before clamping.
    pub fn total_discount(&self) -> Money {
        self.voucher_discount + self.student_discount
    }
}

// =============================================================================
// Pricing Rules
// =============================================================================

/// A voucher code and the discount it grants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherRule {
    pub code: String,
    pub discount_bps: DiscountRate,
}

/// The discount and installment tables, as data.
///
/// `PricingRules::default()` is exactly the standard tables used by the free
/// functions in this module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRules {
    #[serde(default = "default_student_discount")]
    pub student_discount_bps: DiscountRate,

    #[serde(default = "default_student_id_prefixes")]
    pub student_id_prefixes: Vec<String>,

    #[serde(default = "default_vouchers")]
    pub vouchers: Vec<VoucherRule>,

    #[serde(default = "default_installment_plans")]
    pub installment_plans: Vec<InstallmentPlan>,
}

fn default_student_discount() -> DiscountRate {
    STUDENT_DISCOUNT
}

fn default_student_id_prefixes() -> Vec<String> {
    STUDENT_ID_PREFIXES.iter().map(|p| p.to_string()).collect()
}

fn default_vouchers() -> Vec<VoucherRule> {
    STANDARD_VOUCHERS
        .iter()
        .map(|(code, rate)| VoucherRule {
            code: code.to_string(),
            discount_bps: *rate,
        })
        .collect()
}

fn default_installment_plans() -> Vec<InstallmentPlan> {
    INSTALLMENT_PLANS.to_vec()
}

impl Default for PricingRules {
    fn default() -> Self {
        PricingRules {
            student_discount_bps: default_student_discount(),
            student_id_prefixes: default_student_id_prefixes(),
            vouchers: default_vouchers(),
            installment_plans: default_installment_plans(),
        }
    }
}

impl PricingRules {
    /// See [`voucher_discount`].
    pub fn voucher_discount(&self, total: Money, code: &str) -> Money {
        self.vouchers
            .iter()
            .find(|v| v.code.eq_ignore_ascii_case(code))
            .map(|v| total.percentage_of(v.discount_bps))
            .unwrap_or_default()
    }

    /// See [`student_discount`].
    pub fn student_discount(&self, total: Money, student_id: &str) -> Money {
        if self
            .student_id_prefixes
            .iter()
            .any(|prefix| student_id.starts_with(prefix.as_str()))
        {
            total.percentage_of(self.student_discount_bps)
        } else {
            Money::zero()
        }
    }

    /// Returns the plan at `plan_index`.
    ///
    /// # Errors
    /// [`CoreError::InvalidArgument`] if the index is past the plan table.
    pub fn installment_plan(&self, plan_index: usize) -> CoreResult<InstallmentPlan> {
        plan_at(&self.installment_plans, plan_index)
    }

    /// See [`installment_schedule`].
    pub fn installment_schedule(
        &self,
        final_price: Money,
        plan_index: usize,
    ) -> CoreResult<InstallmentSchedule> {
        InstallmentSchedule::compute(final_price, self.installment_plan(plan_index)?)
    }

    /// Prices `cart` with the given voucher code and student id.
    ///
    /// # Errors
    /// [`CoreError::AmountOverflow`] if the cart total does not fit in cents.
    pub fn quote(
        &self,
        cart: &Cart,
        voucher_code: &str,
        student_id: &str,
    ) -> CoreResult<PriceBreakdown> {
        let subtotal = cart.total()?;
        let voucher = self.voucher_discount(subtotal, voucher_code);
        let student = self.student_discount(subtotal, student_id);

        Ok(PriceBreakdown {
            subtotal,
            voucher_discount: voucher,
            student_discount: student,
            final_price: final_price(subtotal, voucher, student),
        })
    }

    /// Checks the tables for values the engine cannot price with.
    ///
    /// ## Rules
    /// - every rate is at most 100%
    /// - voucher codes are non-blank and unique (ignoring case)
    /// - student prefixes are non-blank
    /// - at least one installment plan, none with zero months
    pub fn validate(&self) -> CoreResult<()> {
        validate_rate("student discount", self.student_discount_bps)?;

        for prefix in &self.student_id_prefixes {
            if prefix.trim().is_empty() {
                return Err(ValidationError::Required {
                    field: "student id prefix".to_string(),
                }
                .into());
            }
        }

        for (i, voucher) in self.vouchers.iter().enumerate() {
            if voucher.code.trim().is_empty() {
                return Err(ValidationError::Required {
                    field: "voucher code".to_string(),
                }
                .into());
            }
            validate_rate("voucher discount", voucher.discount_bps)?;

            let duplicate = self.vouchers[..i]
                .iter()
                .any(|earlier| earlier.code.eq_ignore_ascii_case(&voucher.code));
            if duplicate {
                return Err(ValidationError::Duplicate {
                    field: "voucher code".to_string(),
                    value: voucher.code.clone(),
                }
                .into());
            }
        }

        if self.installment_plans.is_empty() {
            return Err(ValidationError::Required {
                field: "installment plans".to_string(),
            }
            .into());
        }
        for plan in &self.installment_plans {
            if plan.months == 0 {
                return Err(ValidationError::MustBePositive {
                    field: "installment months".to_string(),
                }
                .into());
            }
            validate_rate("installment rate", plan.monthly_rate_bps)?;
        }

        Ok(())
    }
}

fn validate_rate(field: &str, rate: DiscountRate) -> CoreResult<()> {
    if rate.bps() > DiscountRate::FULL_BPS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::from(DiscountRate::FULL_BPS),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    fn dollars(d: i64) -> Money {
        Money::from_major_minor(d, 0)
    }

    fn product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            name: id.to_string(),
            price_cents,
            description: String::new(),
            image_url: None,
            owner_id: "owner".to_string(),
            options: "Default".to_string(),
            category: "misc".to_string(),
        }
    }

    #[test]
    fn test_voucher_discount_lookup() {
        assert_eq!(voucher_discount(dollars(100), "giam10"), dollars(10));
        assert_eq!(voucher_discount(dollars(100), "GIAM10"), dollars(10));
        assert_eq!(voucher_discount(dollars(100), "SALE50"), dollars(50));
        assert_eq!(voucher_discount(dollars(100), "Sale50"), dollars(50));
        assert_eq!(voucher_discount(dollars(100), "bogus"), Money::zero());
        assert_eq!(voucher_discount(dollars(100), ""), Money::zero());
    }

    #[test]
    fn test_voucher_code_with_surrounding_whitespace_is_unknown() {
        assert_eq!(voucher_discount(dollars(100), " giam10 "), Money::zero());
        assert_eq!(voucher_discount(dollars(100), "SALE50\n"), Money::zero());
        let rules = PricingRules::default();
        assert_eq!(rules.voucher_discount(dollars(100), " giam10 "), Money::zero());
    }

    #[test]
    fn test_student_discount_prefixes() {
        assert_eq!(student_discount(dollars(100), "SV12345"), dollars(5));
        assert_eq!(student_discount(dollars(100), "VNEDU-998"), dollars(5));
        assert_eq!(student_discount(dollars(100), "random"), Money::zero());
        assert_eq!(student_discount(dollars(100), ""), Money::zero());
    }

    #[test]
    fn test_student_prefix_is_case_sensitive() {
        assert_eq!(student_discount(dollars(100), "sv12345"), Money::zero());
        assert_eq!(student_discount(dollars(100), "vnedu1"), Money::zero());
    }

    #[test]
    fn test_final_price() {
        assert_eq!(final_price(dollars(100), dollars(10), dollars(5)), dollars(85));
        assert_eq!(final_price(dollars(100), dollars(60), dollars(50)), Money::zero());
        assert_eq!(final_price(Money::zero(), Money::zero(), Money::zero()), Money::zero());
    }

    #[test]
    fn test_discounts_stack_then_clamp() {
        // SALE50 + student on $100 → 50 + 5 off, both from the full total
        let total = dollars(100);
        let voucher = voucher_discount(total, "SALE50");
        let student = student_discount(total, "SV1");
        assert_eq!(final_price(total, voucher, student), dollars(45));
    }

    #[test]
    fn test_installment_schedule_three_months() {
        let schedule = installment_schedule(dollars(1200), 0).unwrap();
        assert_eq!(schedule.plan.months, 3);
        assert_eq!(schedule.total_with_interest.cents(), 127345);
        assert_eq!(schedule.monthly_payment.cents(), 42448);
        assert_eq!(schedule.interest(dollars(1200)).cents(), 7345);
    }

    #[test]
    fn test_installment_schedule_twelve_months() {
        // 1000 × 1.05^12 = 1795.856326...
        let schedule = installment_schedule(dollars(1000), 2).unwrap();
        assert_eq!(schedule.total_with_interest.cents(), 179586);
        // 1795.856326... / 12 = 149.654693...
        assert_eq!(schedule.monthly_payment.cents(), 14965);
    }

    #[test]
    fn test_installment_schedule_zero_principal() {
        let schedule = installment_schedule(Money::zero(), 1).unwrap();
        assert!(schedule.total_with_interest.is_zero());
        assert!(schedule.monthly_payment.is_zero());
    }

    #[test]
    fn test_installment_schedule_rejects_out_of_range_index() {
        let err = installment_schedule(dollars(100), 3).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidArgument { ref argument, .. } if argument == "plan_index"
        ));
    }

    #[test]
    fn test_zero_month_plan_is_rejected() {
        let err =
            InstallmentSchedule::compute(dollars(100), InstallmentPlan::new(0, 200)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument { .. }));
    }

    #[test]
    fn test_default_rules_match_free_functions() {
        let rules = PricingRules::default();
        for code in ["giam10", "SALE50", "nope", ""] {
            assert_eq!(
                rules.voucher_discount(dollars(80), code),
                voucher_discount(dollars(80), code)
            );
        }
        for id in ["SV1", "VNEDU2", "XX"] {
            assert_eq!(
                rules.student_discount(dollars(80), id),
                student_discount(dollars(80), id)
            );
        }
        assert_eq!(
            rules.installment_schedule(dollars(1200), 0).unwrap(),
            installment_schedule(dollars(1200), 0).unwrap()
        );
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_quote_cart() {
        let mut cart = Cart::new();
        cart.add_or_increment(&product("a", 4000), "Default");
        cart.add_or_increment(&product("a", 4000), "Default");
        cart.add_or_increment(&product("b", 2000), "Default");

        let rules = PricingRules::default();
        let quote = rules.quote(&cart, "GIAM10", "SV42").unwrap();
        assert_eq!(quote.subtotal, dollars(100));
        assert_eq!(quote.voucher_discount, dollars(10));
        assert_eq!(quote.student_discount, dollars(5));
        assert_eq!(quote.total_discount(), dollars(15));
        assert_eq!(quote.final_price, dollars(85));
    }

    #[test]
    fn test_quote_overflowing_cart() {
        let mut cart = Cart::new();
        let pricey = product("gold", i64::MAX / 2);
        for _ in 0..3 {
            cart.add_or_increment(&pricey, "Default");
        }

        let err = PricingRules::default().quote(&cart, "", "").unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow { .. }));
    }

    #[test]
    fn test_quote_empty_cart() {
        let quote = PricingRules::default()
            .quote(&Cart::new(), "SALE50", "SV1")
            .unwrap();
        assert!(quote.subtotal.is_zero());
        assert!(quote.final_price.is_zero());
    }

    #[test]
    fn test_custom_rules() {
        let rules = PricingRules {
            student_discount_bps: DiscountRate::from_percent(10),
            student_id_prefixes: vec!["STU".to_string()],
            vouchers: vec![VoucherRule {
                code: "WELCOME".to_string(),
                discount_bps: DiscountRate::from_percent(20),
            }],
            installment_plans: vec![InstallmentPlan::new(2, 0)],
        };
        assert_eq!(rules.voucher_discount(dollars(50), "welcome"), dollars(10));
        assert_eq!(rules.voucher_discount(dollars(50), "GIAM10"), Money::zero());
        assert_eq!(rules.student_discount(dollars(50), "STU-1"), dollars(5));
        assert_eq!(rules.student_discount(dollars(50), "SV1"), Money::zero());

        let schedule = rules.installment_schedule(dollars(50), 0).unwrap();
        assert_eq!(schedule.total_with_interest, dollars(50));
        assert_eq!(schedule.monthly_payment, dollars(25));
        assert!(rules.installment_plan(1).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_tables() {
        let mut rules = PricingRules::default();
        rules.vouchers.push(VoucherRule {
            code: "giam10".to_string(),
            discount_bps: DiscountRate::from_percent(15),
        });
        assert!(matches!(
            rules.validate(),
            Err(CoreError::Validation(ValidationError::Duplicate { .. }))
        ));

        let mut rules = PricingRules::default();
        rules.student_discount_bps = DiscountRate::from_bps(10_001);
        assert!(rules.validate().is_err());

        let mut rules = PricingRules::default();
        rules.installment_plans.clear();
        assert!(rules.validate().is_err());

        let mut rules = PricingRules::default();
        rules.installment_plans.push(InstallmentPlan::new(0, 100));
        assert!(rules.validate().is_err());

        let mut rules = PricingRules::default();
        rules.student_id_prefixes.push("  ".to_string());
        assert!(rules.validate().is_err());
    }
}
