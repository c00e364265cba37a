//! Typed mirrors of the processor's raw billing payloads.
//!
//! The processor sends amounts as minor-unit integers and timestamps
//! as unix seconds. These structs give that shape explicit required
//! and optional fields, and the `into_*` conversions validate on the
//! way into the domain types: a missing required field or an unknown
//! currency fails the record instead of surfacing later as a half-built
//! entity.

use chrono::{DateTime, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::core::{
    AccountingError, Address, CreditNoteMeta, Currency, Customer, Dispute, DisputeStatus, Invoice,
    InvoiceLine, InvoiceStatus, LineItemKind, Money, Payout, PayoutLineItem, Refund, RefundStatus,
    TaxRate,
};

fn money_from_minor(minor: i64, currency_code: &str) -> Result<Money, AccountingError> {
    let currency = Currency::from_iso(currency_code)
        .ok_or_else(|| AccountingError::UnsupportedCurrency(currency_code.to_string()))?;
    Ok(Money::new(Decimal::new(minor, 2), currency))
}

fn timestamp(
    entity: &'static str,
    field: &'static str,
    secs: i64,
) -> Result<NaiveDateTime, AccountingError> {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.naive_utc())
        .ok_or(AccountingError::InvalidField { entity, field })
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireAddress {
    pub city: Option<String>,
    pub country: Option<String>,
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub postal_code: Option<String>,
    pub state: Option<String>,
}

impl WireAddress {
    fn into_address(self) -> Address {
        Address {
            line1: self.line1.unwrap_or_default(),
            line2: self.line2,
            city: self.city.unwrap_or_default(),
            postal_code: self.postal_code.unwrap_or_default(),
            state: self.state,
            country_code: self.country.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireTaxId {
    pub value: String,
}

/// At most one tax id per customer is supported; more is ambiguous and
/// fails fast rather than picking one silently.
fn single_tax_id(
    customer: &str,
    tax_ids: Vec<WireTaxId>,
) -> Result<Option<String>, AccountingError> {
    match tax_ids.len() {
        0 => Ok(None),
        1 => Ok(tax_ids.into_iter().next().map(|t| t.value)),
        n => Err(AccountingError::AmbiguousTaxIdentity {
            customer: customer.to_string(),
            count: n,
        }),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireCustomer {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<WireAddress>,
    #[serde(default)]
    pub customer_tax_ids: Vec<WireTaxId>,
}

impl WireCustomer {
    pub fn into_customer(self) -> Result<Customer, AccountingError> {
        let name = self.name.ok_or(AccountingError::MissingField {
            entity: "customer",
            field: "name",
        })?;
        let vat_id = single_tax_id(&name, self.customer_tax_ids)?;
        Ok(Customer {
            email: self.email.ok_or(AccountingError::MissingField {
                entity: "customer",
                field: "email",
            })?,
            address: self.address.unwrap_or_default().into_address(),
            vat_id,
            name,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireInvoiceLines {
    #[serde(default)]
    pub data: Vec<WireInvoiceLine>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireInvoiceLine {
    pub id: String,
    pub description: Option<String>,
    pub currency: String,
    pub quantity: u32,
    pub amount_excluding_tax: i64,
    pub unit_amount_excluding_tax: i64,
}

impl WireInvoiceLine {
    fn into_line(self) -> Result<InvoiceLine, AccountingError> {
        Ok(InvoiceLine {
            description: self.description.unwrap_or_default(),
            quantity: self.quantity,
            unit_amount_excl_tax: money_from_minor(self.unit_amount_excluding_tax, &self.currency)?,
            amount_excl_tax: money_from_minor(self.amount_excluding_tax, &self.currency)?,
            source_id: self.id,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireTaxAmount {
    pub tax_rate: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireStatusTransitions {
    pub finalized_at: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireInvoice {
    pub id: String,
    pub number: Option<String>,
    pub status: String,
    pub currency: String,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub customer_address: Option<WireAddress>,
    #[serde(default)]
    pub customer_tax_ids: Vec<WireTaxId>,
    #[serde(default)]
    pub lines: WireInvoiceLines,
    pub amount_due: i64,
    pub subtotal: i64,
    pub subtotal_excluding_tax: i64,
    pub total: i64,
    pub total_excluding_tax: i64,
    pub tax: Option<i64>,
    #[serde(default)]
    pub total_tax_amounts: Vec<WireTaxAmount>,
    pub created: i64,
    pub status_transitions: Option<WireStatusTransitions>,
    pub period_start: i64,
}

impl WireInvoice {
    /// The tax-rate id to resolve (through the per-run cache) before
    /// conversion. `None` when the invoice carries no tax.
    pub fn tax_rate_id(&self) -> Option<&str> {
        match self.tax {
            Some(t) if t != 0 => self.total_tax_amounts.first().map(|a| a.tax_rate.as_str()),
            _ => None,
        }
    }

    /// Convert into a domain invoice. `tax_rate` is the resolved rate
    /// for [`Self::tax_rate_id`], if any.
    pub fn into_invoice(self, tax_rate: Option<TaxRate>) -> Result<Invoice, AccountingError> {
        let number = self.number.ok_or(AccountingError::MissingField {
            entity: "invoice",
            field: "number",
        })?;
        let status =
            InvoiceStatus::parse(&self.status).ok_or(AccountingError::InvalidField {
                entity: "invoice",
                field: "status",
            })?;
        let currency = Currency::from_iso(&self.currency)
            .ok_or_else(|| AccountingError::UnsupportedCurrency(self.currency.clone()))?;

        let name = self.customer_name.ok_or(AccountingError::MissingField {
            entity: "invoice",
            field: "customer_name",
        })?;
        let vat_id = single_tax_id(&name, self.customer_tax_ids)?;
        let customer = Customer {
            email: self.customer_email.ok_or(AccountingError::MissingField {
                entity: "invoice",
                field: "customer_email",
            })?,
            address: self.customer_address.unwrap_or_default().into_address(),
            vat_id,
            name,
        };

        let tax = match self.tax {
            Some(t) if t != 0 => Some(money_from_minor(t, &self.currency)?),
            _ => None,
        };
        let finalized = self
            .status_transitions
            .and_then(|st| st.finalized_at)
            .map(|secs| timestamp("invoice", "finalized_at", secs))
            .transpose()?;

        Ok(Invoice {
            number,
            status,
            currency,
            customer,
            lines: self
                .lines
                .data
                .into_iter()
                .map(WireInvoiceLine::into_line)
                .collect::<Result<_, _>>()?,
            amount_due: money_from_minor(self.amount_due, &self.currency)?,
            subtotal: money_from_minor(self.subtotal, &self.currency)?,
            subtotal_excl_tax: money_from_minor(self.subtotal_excluding_tax, &self.currency)?,
            total: money_from_minor(self.total, &self.currency)?,
            total_excl_tax: money_from_minor(self.total_excluding_tax, &self.currency)?,
            tax,
            tax_rate,
            created: timestamp("invoice", "created", self.created)?,
            finalized,
            period_start: timestamp("invoice", "period_start", self.period_start)?,
            id: self.id,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WirePayout {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: i64,
    pub currency: String,
    pub created: i64,
    pub arrival_date: i64,
}

impl WirePayout {
    pub fn into_payout(self) -> Result<Payout, AccountingError> {
        Ok(Payout {
            kind: self.kind,
            amount: money_from_minor(self.amount, &self.currency)?,
            created: timestamp("payout", "created", self.created)?,
            arrival_date: timestamp("payout", "arrival_date", self.arrival_date)?,
            id: self.id,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireBalanceTransaction {
    pub id: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: LineItemKind,
    pub amount: i64,
    pub net: i64,
    pub currency: String,
    pub created: i64,
    pub source: Option<String>,
}

impl WireBalanceTransaction {
    /// Convert into a payout line item. `related_invoice` is resolved
    /// by the caller for charge/payment transactions.
    pub fn into_line_item(
        self,
        related_invoice: Option<Invoice>,
    ) -> Result<PayoutLineItem, AccountingError> {
        Ok(PayoutLineItem {
            description: self.description.ok_or(AccountingError::MissingField {
                entity: "balance_transaction",
                field: "description",
            })?,
            kind: self.kind,
            gross: money_from_minor(self.amount, &self.currency)?,
            net: money_from_minor(self.net, &self.currency)?,
            created: timestamp("balance_transaction", "created", self.created)?,
            source_id: self.source.unwrap_or_default(),
            related_invoice,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireRefund {
    pub status: RefundStatus,
    pub created: i64,
}

impl WireRefund {
    pub fn into_refund(self, invoice: Invoice) -> Result<Refund, AccountingError> {
        Ok(Refund {
            status: self.status,
            created: timestamp("refund", "created", self.created)?,
            invoice,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireDispute {
    pub status: DisputeStatus,
    pub created: i64,
}

impl WireDispute {
    pub fn into_dispute(self, invoice: Invoice) -> Result<Dispute, AccountingError> {
        Ok(Dispute {
            status: self.status,
            created: timestamp("dispute", "created", self.created)?,
            invoice,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireCreditNote {
    pub number: String,
    pub created: i64,
    /// Id of the reversed invoice.
    pub invoice: String,
    pub pdf: Option<String>,
}

impl WireCreditNote {
    pub fn into_meta(self) -> Result<CreditNoteMeta, AccountingError> {
        Ok(CreditNoteMeta {
            number: self.number,
            created: timestamp("credit_note", "created", self.created)?,
            invoice_id: self.invoice,
            pdf_link: self.pdf,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireTaxRate {
    pub percentage: f64,
    pub country: String,
}

impl WireTaxRate {
    pub fn into_tax_rate(self) -> Result<TaxRate, AccountingError> {
        Ok(TaxRate {
            percentage: Decimal::try_from(self.percentage).map_err(|_| {
                AccountingError::InvalidField {
                    entity: "tax_rate",
                    field: "percentage",
                }
            })?,
            country_code: self.country,
        })
    }
}
