use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors that can occur while classifying, selecting, or aggregating
/// billing records.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum AccountingError {
    /// Arithmetic between two amounts in different currencies.
    #[error("currency mismatch: {left} vs {right}")]
    CurrencyMismatch { left: &'static str, right: &'static str },

    /// Summing an empty sequence of amounts has no defined currency.
    #[error("cannot sum an empty sequence of amounts")]
    EmptySum,

    /// The requested ISO 4217 code has no entry in the internal
    /// currency table.
    #[error("currency '{0}' is not supported")]
    UnsupportedCurrency(String),

    /// A payout line item matched none of the VAT classification rules.
    /// Carries enough context for the operator to extend the rule table.
    #[error(
        "cannot assign a VAT report category: description '{description}', \
         payout {payout_id} ({arrival_date}) of type {payout_kind}"
    )]
    UnclassifiableLineItem {
        description: String,
        payout_id: String,
        arrival_date: NaiveDateTime,
        payout_kind: String,
    },

    /// A customer record carries more than one tax id. Only a single
    /// tax id per customer is supported.
    #[error("customer '{customer}' has {count} tax ids; only one is supported")]
    AmbiguousTaxIdentity { customer: String, count: usize },

    /// A required field was absent from a raw processor record.
    #[error("{entity} record is missing required field '{field}'")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    /// A raw processor record carried a value that cannot be
    /// represented (e.g. an out-of-range timestamp).
    #[error("{entity} record has an invalid value for field '{field}'")]
    InvalidField {
        entity: &'static str,
        field: &'static str,
    },

    /// The retrieval collaborator failed.
    #[error("source error: {0}")]
    Source(String),
}
