use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::currencies::Currency;
use super::money::Money;

/// Postal address of a customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub postal_code: String,
    pub state: Option<String>,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: String,
}

/// A billed customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    pub address: Address,
    /// VAT identifier. Presence of a VAT id is what makes a customer b2b.
    pub vat_id: Option<String>,
}

impl Customer {
    pub fn is_b2b(&self) -> bool {
        self.vat_id.is_some()
    }
}

/// A VAT rate attached to an invoice, resolved once per tax-rate id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRate {
    pub percentage: Decimal,
    /// ISO 3166-1 alpha-2 country the rate belongs to.
    pub country_code: String,
}

/// Invoice lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Open,
    Paid,
    Void,
    Uncollectible,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Open => "open",
            Self::Paid => "paid",
            Self::Void => "void",
            Self::Uncollectible => "uncollectible",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "open" => Some(Self::Open),
            "paid" => Some(Self::Paid),
            "void" => Some(Self::Void),
            "uncollectible" => Some(Self::Uncollectible),
            _ => None,
        }
    }
}

/// A product line on an invoice, tax-exclusive amounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceLine {
    /// Processor-side line identifier.
    pub source_id: String,
    pub description: String,
    pub quantity: u32,
    pub unit_amount_excl_tax: Money,
    pub amount_excl_tax: Money,
}

/// An invoice as retrieved from the processor.
///
/// Invoice numbers are formatted `<prefix>-<NNNN>`; ordering between
/// invoices is by the numeric suffix, never by the raw string
/// (see [`crate::core::InvoiceNumber`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub number: String,
    pub status: InvoiceStatus,
    pub currency: Currency,
    pub customer: Customer,
    pub lines: Vec<InvoiceLine>,
    pub amount_due: Money,
    pub subtotal: Money,
    pub subtotal_excl_tax: Money,
    pub total: Money,
    pub total_excl_tax: Money,
    /// Total tax on the invoice; `None` when untaxed.
    pub tax: Option<Money>,
    pub tax_rate: Option<TaxRate>,
    pub created: NaiveDateTime,
    /// Set once the invoice has been finalized. Draft invoices have none.
    pub finalized: Option<NaiveDateTime>,
    pub period_start: NaiveDateTime,
}

impl Invoice {
    pub fn is_draft(&self) -> bool {
        self.status == InvoiceStatus::Draft
    }

    pub fn is_open(&self) -> bool {
        self.status == InvoiceStatus::Open
    }

    pub fn is_paid(&self) -> bool {
        self.status == InvoiceStatus::Paid
    }

    pub fn is_void(&self) -> bool {
        self.status == InvoiceStatus::Void
    }

    pub fn is_uncollectible(&self) -> bool {
        self.status == InvoiceStatus::Uncollectible
    }

    pub fn is_taxable(&self) -> bool {
        self.tax_rate.is_some()
    }

    /// Display name used by the external document downloader:
    /// `YYYYMMDD - Invoice <number> - Status <status>`.
    pub fn document_name(&self) -> String {
        let date = self.finalized.unwrap_or(self.period_start);
        format!(
            "{} - Invoice {} - Status {}",
            date.format("%Y%m%d"),
            self.number,
            self.status.as_str()
        )
    }
}

/// Balance-transaction type of a payout line item. Open set on the
/// wire; unrecognized types map to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    Charge,
    Payment,
    Adjustment,
    StripeFee,
    BankAccount,
    Payout,
    #[serde(other)]
    Other,
}

impl LineItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Charge => "charge",
            Self::Payment => "payment",
            Self::Adjustment => "adjustment",
            Self::StripeFee => "stripe_fee",
            Self::BankAccount => "bank_account",
            Self::Payout => "payout",
            Self::Other => "other",
        }
    }
}

/// A single line item of a payout, immutable once retrieved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutLineItem {
    pub description: String,
    pub kind: LineItemKind,
    pub gross: Money,
    pub net: Money,
    pub created: NaiveDateTime,
    /// Processor-side id of the underlying balance transaction source.
    pub source_id: String,
    /// Resolved by the retrieval collaborator for charge/payment items;
    /// needed only for OSS bucket assignment, not for classification.
    pub related_invoice: Option<Invoice>,
}

impl PayoutLineItem {
    /// Processor fee on this item: gross minus net.
    pub fn fee(&self) -> Money {
        Money::new(self.gross.amount - self.net.amount, self.gross.currency)
    }

    pub fn is_charge(&self) -> bool {
        self.kind == LineItemKind::Charge
    }

    pub fn is_payment(&self) -> bool {
        self.kind == LineItemKind::Payment
    }
}

/// A transfer of funds from the processor to the merchant bank account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payout {
    pub id: String,
    /// Processor payout type, e.g. "bank_account". Kept raw for
    /// diagnostics.
    pub kind: String,
    pub amount: Money,
    pub created: NaiveDateTime,
    pub arrival_date: NaiveDateTime,
}

/// Refund lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundStatus {
    Succeeded,
    Pending,
    Failed,
    Canceled,
    #[serde(other)]
    Other,
}

/// A refund, resolved to the invoice it reverses.
///
/// The candidate selector takes every refund the collaborator hands it,
/// whatever the status; the status rides along for report consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Refund {
    pub status: RefundStatus,
    pub created: NaiveDateTime,
    pub invoice: Invoice,
}

/// Dispute lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisputeStatus {
    WarningNeedsResponse,
    WarningUnderReview,
    WarningClosed,
    NeedsResponse,
    UnderReview,
    Won,
    Lost,
    #[serde(other)]
    Other,
}

/// A chargeback dispute, resolved to the disputed invoice.
///
/// As with refunds, every dispute in the window is a credit-note
/// candidate regardless of status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dispute {
    pub status: DisputeStatus,
    pub created: NaiveDateTime,
    pub invoice: Invoice,
}

/// A credit note the processor itself already issued.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditNoteMeta {
    pub number: String,
    pub created: NaiveDateTime,
    /// Id of the invoice the credit note reverses.
    pub invoice_id: String,
    pub pdf_link: Option<String>,
}

impl CreditNoteMeta {
    /// Display name used by the external document downloader:
    /// `YYYYMMDD - Credit note - <number>`.
    pub fn document_name(&self) -> String {
        format!(
            "{} - Credit note - {}",
            self.created.format("%Y%m%d"),
            self.number
        )
    }
}
