use serde::{Deserialize, Serialize};

use super::currencies::Currency;

/// A parsed `<prefix>-<NNNN>` invoice number.
///
/// Ordering between invoice numbers is defined by the numeric suffix:
/// `25001-0002` sorts before `25001-0010`, which lexical string order
/// would get wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceNumber {
    prefix: String,
    suffix: u32,
}

impl InvoiceNumber {
    /// Parse a raw number. The suffix must be all digits; anything else
    /// returns `None` rather than guessing.
    pub fn parse(raw: &str) -> Option<Self> {
        let (prefix, suffix) = raw.split_once('-')?;
        if prefix.is_empty() || suffix.is_empty() {
            return None;
        }
        let suffix: u32 = suffix.parse().ok()?;
        Some(Self {
            prefix: prefix.to_string(),
            suffix,
        })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> u32 {
        self.suffix
    }
}

impl std::fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:04}", self.prefix, self.suffix)
    }
}

impl Ord for InvoiceNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.suffix
            .cmp(&other.suffix)
            .then_with(|| self.prefix.cmp(&other.prefix))
    }
}

impl PartialOrd for InvoiceNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Gapless credit-note number sequence.
///
/// Number layout: `S<YY><CC><OSS>-<NNNN>`
/// - `YY`   two-digit issue year
/// - `CC`   zero-padded currency index (00 = EUR, 01 = USD)
/// - `OSS`  1 when the sale falls under the OSS scheme; every flow here
///   originates from the processor and is therefore OSS-eligible, so
///   the flag is fixed at 1
/// - `NNNN` zero-padded sequence number
///
/// The sequence is stateless across runs: the caller supplies a
/// `first_index` that does not collide with previously issued numbers.
/// Within one run there are no gaps and no reuse.
#[derive(Debug, Clone)]
pub struct CreditNoteSequence {
    year: i32,
    currency: Currency,
    next_index: u32,
}

impl CreditNoteSequence {
    pub fn new(issue_year: i32, currency: Currency, first_index: u32) -> Self {
        Self {
            year: issue_year,
            currency,
            next_index: first_index,
        }
    }

    fn format(&self, index: u32) -> String {
        format!(
            "S{:02}{:02}1-{:04}",
            self.year.rem_euclid(100),
            self.currency.internal_index,
            index
        )
    }

    /// Generate the next credit-note number.
    pub fn next_number(&mut self) -> String {
        let n = self.format(self.next_index);
        self.next_index += 1;
        n
    }

    /// Preview the next number without consuming it.
    pub fn peek(&self) -> String {
        self.format(self.next_index)
    }

    /// The next index that will be issued, without formatting.
    pub fn next_raw(&self) -> u32 {
        self.next_index
    }
}
