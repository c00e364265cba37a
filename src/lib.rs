//! # avoir
//!
//! Accounting library for Stripe payouts: classifies payout line items
//! into VAT report categories, derives OSS accounting buckets, selects
//! the invoices that need a credit note over a reporting window, and
//! assigns jurisdiction-encoded sequential credit-note numbers.
//!
//! All monetary values use [`rust_decimal::Decimal`] tagged with a
//! [`Currency`] — never floating point, never cross-currency arithmetic.
//!
//! Retrieval from the payment processor, PDF rendering, and CSV/XLSX
//! export are external collaborators: retrieval is abstracted behind
//! [`source::BillingSource`], and this crate produces plain data
//! ([`credit_note::GeneratedCreditNote`] records and report rows) for
//! the renderers to consume.
//!
//! ## Quick Start
//!
//! ```rust
//! use avoir::classify::{classify, VatCategory};
//! use avoir::core::{Currency, LineItemKind, Money, Payout, PayoutLineItem};
//! use chrono::NaiveDate;
//! use rust_decimal_macros::dec;
//!
//! let eur = Currency::from_iso("EUR").unwrap();
//! let created = NaiveDate::from_ymd_opt(2024, 3, 2)
//!     .unwrap()
//!     .and_hms_opt(9, 30, 0)
//!     .unwrap();
//! let item = PayoutLineItem {
//!     description: "Billing Stripe fee".into(),
//!     kind: LineItemKind::StripeFee,
//!     gross: Money::new(dec!(-2.90), eur),
//!     net: Money::new(dec!(-2.90), eur),
//!     created,
//!     source_id: "txn_1".into(),
//!     related_invoice: None,
//! };
//! let payout = Payout {
//!     id: "po_1".into(),
//!     kind: "bank_account".into(),
//!     amount: Money::new(dec!(120.00), eur),
//!     created,
//!     arrival_date: created,
//! };
//!
//! let report_item = classify(&item, &payout).unwrap();
//! assert_eq!(report_item.category, VatCategory::Billing);
//! assert_eq!(report_item.amount, Money::new(dec!(2.90), eur));
//! ```

pub mod classify;
pub mod core;
pub mod credit_note;
pub mod pipeline;
pub mod report;
pub mod source;

// Re-export core types at crate root for convenience
pub use crate::core::*;
