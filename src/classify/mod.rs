//! VAT classification of payout line items.
//!
//! Maps each line item of a payout onto a VAT report category with a
//! taxed amount. The mapping is an ordered rule table evaluated
//! first-match-wins: rule order matters because the description
//! prefixes are not mutually exclusive in principle (two rules share
//! the "Subscription" prefix and are told apart by the item kind).

mod oss;

pub use oss::{AccountingBucket, accounting_bucket};

use serde::{Deserialize, Serialize};

use crate::core::{AccountingError, Money, Payout, PayoutLineItem};

/// VAT report category of a payout line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VatCategory {
    Billing,
    TaxProductFees,
    ProcessingFeesCard,
    ProcessingFeesOther,
    RadarFees,
    RefundForCharges,
    ChargebackWithdrawal,
    BankAccount,
}

impl VatCategory {
    /// Label under which the category appears in VAT reports.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Billing => "Billing Fees",
            Self::TaxProductFees => "Tax Product Fees",
            Self::ProcessingFeesCard => "Stripe Processing Fees (card)",
            Self::ProcessingFeesOther => "Stripe Processing Fees (other)",
            Self::RadarFees => "Radar Stripe Fees",
            Self::RefundForCharges => "Disputes",
            Self::ChargebackWithdrawal => "Dispute Fees",
            Self::BankAccount => "Bank account",
        }
    }
}

/// A classified line item. The amount is always non-negative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VatReportItem {
    pub category: VatCategory,
    pub amount: Money,
    pub source: PayoutLineItem,
}

/// Which amount of the line item feeds the report.
#[derive(Debug, Clone, Copy)]
enum AmountSource {
    /// Absolute gross amount.
    Gross,
    /// Absolute fee amount (gross minus net).
    Fee,
}

struct ClassificationRule {
    category: VatCategory,
    amount: AmountSource,
    matches: fn(&PayoutLineItem) -> bool,
}

/// The rule table, in evaluation order. First match wins.
static RULES: &[ClassificationRule] = &[
    ClassificationRule {
        category: VatCategory::Billing,
        amount: AmountSource::Gross,
        matches: |i| i.description.starts_with("Billing"),
    },
    ClassificationRule {
        category: VatCategory::TaxProductFees,
        amount: AmountSource::Gross,
        matches: |i| i.description.starts_with("Automatic Taxes"),
    },
    ClassificationRule {
        category: VatCategory::ProcessingFeesCard,
        amount: AmountSource::Fee,
        matches: |i| i.description.starts_with("Subscription") && i.is_charge(),
    },
    ClassificationRule {
        category: VatCategory::ProcessingFeesOther,
        amount: AmountSource::Fee,
        matches: |i| i.description.starts_with("Subscription") && i.is_payment(),
    },
    ClassificationRule {
        category: VatCategory::RadarFees,
        amount: AmountSource::Gross,
        matches: |i| i.description.starts_with("Radar"),
    },
    ClassificationRule {
        category: VatCategory::RefundForCharges,
        amount: AmountSource::Fee,
        matches: |i| i.description.starts_with("REFUND FOR CHARGE"),
    },
    ClassificationRule {
        category: VatCategory::BankAccount,
        amount: AmountSource::Fee,
        matches: |i| i.description.starts_with("REFUND FOR PAYMENT"),
    },
    ClassificationRule {
        category: VatCategory::ChargebackWithdrawal,
        amount: AmountSource::Fee,
        matches: |i| i.description.starts_with("Chargeback withdrawal"),
    },
];

/// Classify a payout line item into its VAT report category.
///
/// Total over the recognized description prefixes; anything else fails
/// with [`AccountingError::UnclassifiableLineItem`] carrying the
/// payout's id, arrival date, and type so the operator can extend the
/// rule table.
pub fn classify(
    item: &PayoutLineItem,
    payout: &Payout,
) -> Result<VatReportItem, AccountingError> {
    for rule in RULES {
        if (rule.matches)(item) {
            let amount = match rule.amount {
                AmountSource::Gross => item.gross.abs(),
                AmountSource::Fee => item.fee().abs(),
            };
            return Ok(VatReportItem {
                category: rule.category,
                amount,
                source: item.clone(),
            });
        }
    }
    Err(AccountingError::UnclassifiableLineItem {
        description: item.description.clone(),
        payout_id: payout.id.clone(),
        arrival_date: payout.arrival_date,
        payout_kind: payout.kind.clone(),
    })
}
