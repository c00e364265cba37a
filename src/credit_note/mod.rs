//! Credit-note candidate selection and number assignment.
//!
//! Over a reporting window, the invoices needing a credit note are the
//! union of voided/uncollectible (optionally open) invoices, invoices
//! the processor already credited, and disputed invoices, plus any
//! refunded invoice not already in that union — minus explicit skips.
//! Candidates are then numbered sequentially in ascending
//! invoice-number order.

mod document;
mod select;
mod skip;

pub use document::{GeneratedCreditNote, assign_numbers};
pub use select::{CandidateReason, CreditNoteCandidate, SelectionInputs, select_candidates};
pub use skip::SkipSet;
