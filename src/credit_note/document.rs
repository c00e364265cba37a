use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::select::CreditNoteCandidate;
use crate::core::{CreditNoteSequence, Currency, Customer, Invoice, InvoiceLine, Money, TaxRate};

/// A credit note generated by this system, immutable once numbered.
///
/// Carries everything the external document renderer needs: the
/// reversed invoice's customer, product lines, and totals. The credit
/// note reverses the invoice in full, so the adjustment amounts equal
/// the invoice total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedCreditNote {
    pub number: String,
    pub invoice_number: String,
    pub issue_date: NaiveDate,
    pub customer: Customer,
    pub lines: Vec<InvoiceLine>,
    pub subtotal: Money,
    pub amount: Money,
    pub tax_rate: Option<TaxRate>,
    pub subtotal_tax: Option<Money>,
    pub total_adjustment: Money,
    pub adjustment_applied: Money,
}

impl GeneratedCreditNote {
    /// Build a full-reversal credit note for `invoice` under the given
    /// number.
    pub fn from_invoice(invoice: &Invoice, number: String, issue_date: NaiveDate) -> Self {
        Self {
            number,
            invoice_number: invoice.number.clone(),
            issue_date,
            customer: invoice.customer.clone(),
            lines: invoice.lines.clone(),
            subtotal: invoice.subtotal,
            amount: invoice.amount_due,
            tax_rate: invoice.tax_rate.clone(),
            subtotal_tax: invoice.tax,
            total_adjustment: invoice.total,
            adjustment_applied: invoice.total,
        }
    }

    /// Whether the reversed invoice carried tax. Decides which document
    /// template the renderer picks.
    pub fn is_taxable(&self) -> bool {
        self.tax_rate.is_some()
    }

    /// Output file stem used by the renderer and PDF converter:
    /// `YYYYMMDD-CN-<number>-INVOICE-<invoice number>`.
    pub fn file_stem(&self) -> String {
        format!(
            "{}-CN-{}-INVOICE-{}",
            self.issue_date.format("%Y%m%d"),
            self.number,
            self.invoice_number
        )
    }
}

/// Assign sequential credit-note numbers to candidates, in their
/// selector order.
///
/// Numbers start at `first_index` and increment by one per candidate —
/// no gaps, no reuse within one invocation. The caller is responsible
/// for a `first_index` that does not collide with previously issued
/// numbers; nothing is persisted between runs.
pub fn assign_numbers(
    candidates: &[CreditNoteCandidate],
    first_index: u32,
    issue_date: NaiveDate,
    currency: Currency,
) -> Vec<GeneratedCreditNote> {
    let mut sequence = CreditNoteSequence::new(issue_date.year(), currency, first_index);
    candidates
        .iter()
        .map(|c| GeneratedCreditNote::from_invoice(&c.invoice, sequence.next_number(), issue_date))
        .collect()
}
