use std::collections::HashSet;

use tracing::warn;

use crate::core::InvoiceNumber;

/// Explicit invoice-number exclusions for credit-note emission.
///
/// Parsed from a comma-separated list. A token containing `:` is an
/// inclusive range between two numbers sharing one prefix
/// (`25001-0010:25001-0020` expands to `25001-0010` through
/// `25001-0020`). Malformed tokens are logged and kept literal; they
/// never abort the run.
#[derive(Debug, Clone, Default)]
pub struct SkipSet {
    numbers: HashSet<String>,
}

impl SkipSet {
    /// An empty set: nothing is skipped.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a comma-separated list of invoice numbers and ranges.
    pub fn parse(raw: &str) -> Self {
        let mut numbers = HashSet::new();
        for token in raw.split(',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            if token.contains(':') {
                match expand_range(token) {
                    Some(expanded) => numbers.extend(expanded),
                    None => {
                        warn!(
                            token,
                            "invalid invoice range, expected PREFIX-NNNN:PREFIX-NNNN; \
                             keeping the literal token"
                        );
                        numbers.insert(token.to_string());
                    }
                }
            } else {
                numbers.insert(token.to_string());
            }
        }
        Self { numbers }
    }

    /// Whether `number` is excluded.
    pub fn contains(&self, number: &str) -> bool {
        self.numbers.contains(number)
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

/// Expand `PFX-NNNN:PFX-MMMM` into every number in between, inclusive.
/// `None` when either side fails to parse or the prefixes differ.
fn expand_range(token: &str) -> Option<Vec<String>> {
    let (start, end) = token.split_once(':')?;
    let start = InvoiceNumber::parse(start.trim())?;
    let end = InvoiceNumber::parse(end.trim())?;
    if start.prefix() != end.prefix() {
        return None;
    }
    Some(
        (start.suffix()..=end.suffix())
            .map(|n| format!("{}-{:04}", start.prefix(), n))
            .collect(),
    )
}
