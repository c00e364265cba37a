//! Run orchestration over a [`BillingSource`].
//!
//! One reporting run retrieves everything it needs up front, then works
//! on the materialized lists: items are classified only after the full
//! item list of every payout is in hand, and OSS buckets are assigned
//! from the already-resolved related invoices. No state survives a run
//! except the caller-supplied starting sequence index.

use chrono::{Datelike, NaiveDate};
use tracing::info;

use crate::classify::{VatReportItem, classify};
use crate::core::{AccountingError, CreditNoteSequence, Currency, Invoice, Payout, ReportWindow};
use crate::credit_note::{
    GeneratedCreditNote, SelectionInputs, SkipSet, assign_numbers, select_candidates,
};
use crate::report::{CountryVatRow, DetailedRow, DetailedVatReport, totals_by_category};
use crate::source::BillingSource;

/// Options for a credit-note emission run.
#[derive(Debug, Clone)]
pub struct EmitOptions {
    /// ISO 4217 code of the reporting currency.
    pub currency_code: String,
    /// Also emit credit notes for still-open invoices.
    pub include_open: bool,
    /// First sequence index; must not collide with previously issued
    /// numbers.
    pub first_index: u32,
    /// Issue date stamped on every generated credit note; its year
    /// feeds the number format.
    pub issue_date: NaiveDate,
    /// Invoice numbers excluded from emission.
    pub skip: SkipSet,
}

/// Build the detailed VAT report for a window: every payout line item
/// classified and joined with its related invoice, plus per-category
/// totals.
///
/// The full payout history is scanned and items are filtered by their
/// own creation timestamp, so an item that settles in a payout arriving
/// after the window is still reported. A single unclassifiable item
/// fails the whole pass; the error carries the context needed to extend
/// the rule table.
pub fn detailed_vat_report(
    source: &dyn BillingSource,
    window: &ReportWindow,
) -> Result<DetailedVatReport, AccountingError> {
    let payouts = source.fetch_payouts()?;
    info!(count = payouts.len(), "retrieved payouts");

    let mut classified: Vec<(VatReportItem, Payout)> = Vec::new();
    for payout in &payouts {
        let items = source.fetch_payout_items(&payout.id)?;
        for item in items {
            if !window.contains(item.created) {
                continue;
            }
            classified.push((classify(&item, payout)?, payout.clone()));
        }
    }

    let rows: Vec<DetailedRow> = classified
        .iter()
        .map(|(item, payout)| DetailedRow::build(item, payout))
        .collect();

    // An empty window yields an empty report; per-category sums are
    // only taken over categories that actually occur.
    let totals = if classified.is_empty() {
        Default::default()
    } else {
        let items: Vec<VatReportItem> = classified.into_iter().map(|(i, _)| i).collect();
        totals_by_category(&items)?
    };

    Ok(DetailedVatReport { rows, totals })
}

/// Per-country split of paid, taxable invoices in the window.
pub fn vat_per_country(
    source: &dyn BillingSource,
    window: &ReportWindow,
) -> Result<Vec<CountryVatRow>, AccountingError> {
    let invoices = source.fetch_invoices(window)?;
    info!(count = invoices.len(), "retrieved invoices");
    crate::report::vat_per_country(&invoices)
}

/// Emit credit notes for a window: retrieval, candidate selection, and
/// number assignment, in that order. Returns the generated notes in
/// their numbered order; rendering them is the consumer's job.
pub fn credit_notes_for_window(
    source: &dyn BillingSource,
    window: &ReportWindow,
    options: &EmitOptions,
) -> Result<Vec<GeneratedCreditNote>, AccountingError> {
    let currency = Currency::from_iso(&options.currency_code)
        .ok_or_else(|| AccountingError::UnsupportedCurrency(options.currency_code.clone()))?;

    // Invoices the processor already credited, to keep the numbering
    // continuous. Only the credit note's own creation date is window
    // bounded, not the invoice's.
    let processor_credited: Vec<Invoice> = source
        .fetch_credit_notes(window)?
        .iter()
        .map(|cn| source.resolve_invoice(&cn.invoice_id))
        .collect::<Result<_, _>>()?;

    let refunded: Vec<Invoice> = source
        .fetch_refunds(window)?
        .into_iter()
        .map(|r| r.invoice)
        .collect();

    let disputed: Vec<Invoice> = source
        .fetch_disputes(window)?
        .into_iter()
        .map(|d| d.invoice)
        .collect();

    let invoices = source.fetch_invoices(window)?;

    let inputs = SelectionInputs {
        invoices,
        processor_credited,
        disputed,
        refunded,
    };
    let candidates = select_candidates(
        &inputs,
        &options.currency_code,
        options.include_open,
        &options.skip,
    )?;
    info!(
        count = candidates.len(),
        first_index = options.first_index,
        "selected credit-note candidates"
    );

    Ok(assign_numbers(
        &candidates,
        options.first_index,
        options.issue_date,
        currency,
    ))
}

/// Emit a single credit note for one invoice, outside any window.
pub fn credit_note_for_invoice(
    source: &dyn BillingSource,
    invoice_id: &str,
    index: u32,
    issue_date: NaiveDate,
    currency_code: &str,
) -> Result<GeneratedCreditNote, AccountingError> {
    let currency = Currency::from_iso(currency_code)
        .ok_or_else(|| AccountingError::UnsupportedCurrency(currency_code.to_string()))?;
    let invoice = source.resolve_invoice(invoice_id)?;
    info!(number = %invoice.number, "processing invoice");

    let mut sequence = CreditNoteSequence::new(issue_date.year(), currency, index);
    Ok(GeneratedCreditNote::from_invoice(
        &invoice,
        sequence.next_number(),
        issue_date,
    ))
}
