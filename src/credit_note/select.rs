use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::skip::SkipSet;
use crate::core::{AccountingError, Currency, Invoice, InvoiceNumber};

/// Why an invoice was selected for a credit note. Kept for
/// traceability; an invoice discovered through several paths keeps the
/// reason of its first discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateReason {
    Void,
    Uncollectible,
    Open,
    /// The processor already issued a credit note for this invoice;
    /// re-emitted to keep the numbering continuous.
    ProcessorIssued,
    Disputed,
    /// Refunded without any credit note on record.
    Refunded,
}

/// An invoice flagged for credit-note emission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditNoteCandidate {
    pub invoice: Invoice,
    pub reason: CandidateReason,
}

/// The four independently retrieved collections the selector works on.
/// All are window-filtered by the retrieval collaborator: invoices by
/// their own creation date; the other three by the creation date of the
/// credit note / dispute / refund that references them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionInputs {
    pub invoices: Vec<Invoice>,
    pub processor_credited: Vec<Invoice>,
    pub disputed: Vec<Invoice>,
    pub refunded: Vec<Invoice>,
}

/// Select the invoices needing a new credit note, ordered for numbering.
///
/// Voided/uncollectible invoices (plus open ones when `include_open`)
/// in the requested currency are unioned with processor-credited and
/// disputed invoices. These three sets are expected disjoint and are
/// deliberately NOT deduplicated against each other. Refund-derived
/// invoices are then appended only when their number is not already
/// present — a refund normally overlaps a processor-issued credit note,
/// but one may have been forgotten. Skip-set matches are dropped, and
/// the result is stably sorted ascending by the numeric suffix of the
/// invoice number (unparsable numbers sort last in discovery order).
pub fn select_candidates(
    inputs: &SelectionInputs,
    currency_code: &str,
    include_open: bool,
    skip: &SkipSet,
) -> Result<Vec<CreditNoteCandidate>, AccountingError> {
    let currency = Currency::from_iso(currency_code)
        .ok_or_else(|| AccountingError::UnsupportedCurrency(currency_code.to_string()))?;

    let mut candidates: Vec<CreditNoteCandidate> = Vec::new();

    for invoice in &inputs.invoices {
        if invoice.currency != currency {
            continue;
        }
        let reason = if invoice.is_void() {
            CandidateReason::Void
        } else if invoice.is_uncollectible() {
            CandidateReason::Uncollectible
        } else if invoice.is_open() && include_open {
            CandidateReason::Open
        } else {
            continue;
        };
        candidates.push(CreditNoteCandidate {
            invoice: invoice.clone(),
            reason,
        });
    }

    for invoice in &inputs.processor_credited {
        candidates.push(CreditNoteCandidate {
            invoice: invoice.clone(),
            reason: CandidateReason::ProcessorIssued,
        });
    }

    for invoice in &inputs.disputed {
        candidates.push(CreditNoteCandidate {
            invoice: invoice.clone(),
            reason: CandidateReason::Disputed,
        });
    }

    let mut present: HashSet<&str> = candidates
        .iter()
        .map(|c| c.invoice.number.as_str())
        .collect();
    let mut refund_derived: Vec<CreditNoteCandidate> = Vec::new();
    for invoice in &inputs.refunded {
        if present.insert(invoice.number.as_str()) {
            refund_derived.push(CreditNoteCandidate {
                invoice: invoice.clone(),
                reason: CandidateReason::Refunded,
            });
        }
    }
    candidates.extend(refund_derived);

    candidates.retain(|c| !skip.contains(&c.invoice.number));

    // Stable: equal suffixes keep discovery order.
    candidates.sort_by_key(|c| {
        InvoiceNumber::parse(&c.invoice.number)
            .map(|n| n.suffix())
            .unwrap_or(u32::MAX)
    });

    Ok(candidates)
}
