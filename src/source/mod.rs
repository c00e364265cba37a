//! The retrieval collaborator boundary.
//!
//! Everything network-shaped lives behind [`BillingSource`]: pagination,
//! retries, and lookups are the implementor's concern, and the core
//! receives fully materialized lists. [`wire`] provides typed mirrors of
//! the processor's raw payloads for implementors to parse with.

pub mod wire;

use std::collections::HashMap;

use crate::core::{
    AccountingError, CreditNoteMeta, Customer, Dispute, Invoice, Payout, PayoutLineItem, Refund,
    ReportWindow, TaxRate,
};

/// Access to the payment processor's billing records.
///
/// Window-taking methods return every record whose own creation
/// timestamp falls inside the window — fully paginated, never a
/// partial page. Referenced entities
/// (`PayoutLineItem::related_invoice`, `Refund::invoice`,
/// `Dispute::invoice`) are resolved by the implementor.
pub trait BillingSource {
    /// The complete payout history, never window-bounded: a line item
    /// created inside a reporting window can settle in a payout that
    /// arrives after it, so the report scans every payout and bounds
    /// the items by their own creation timestamp instead.
    fn fetch_payouts(&self) -> Result<Vec<Payout>, AccountingError>;

    fn fetch_payout_items(&self, payout_id: &str)
    -> Result<Vec<PayoutLineItem>, AccountingError>;

    fn fetch_invoices(&self, window: &ReportWindow) -> Result<Vec<Invoice>, AccountingError>;

    fn fetch_refunds(&self, window: &ReportWindow) -> Result<Vec<Refund>, AccountingError>;

    fn fetch_disputes(&self, window: &ReportWindow) -> Result<Vec<Dispute>, AccountingError>;

    fn fetch_credit_notes(
        &self,
        window: &ReportWindow,
    ) -> Result<Vec<CreditNoteMeta>, AccountingError>;

    fn resolve_invoice(&self, id_or_number: &str) -> Result<Invoice, AccountingError>;

    fn resolve_customer(&self, id: &str) -> Result<Customer, AccountingError>;

    fn resolve_tax_rate(&self, id: &str) -> Result<TaxRate, AccountingError>;
}

/// Per-run cache of tax rates by processor id.
///
/// Tax rates are immutable once created, so resolving each id once per
/// run is enough. The cache is an explicit object with the run's
/// lifetime, passed to whoever converts raw invoices.
#[derive(Debug, Default)]
pub struct TaxRateCache {
    entries: HashMap<String, TaxRate>,
}

impl TaxRateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a tax rate, resolving through `source` on first use.
    pub fn get(
        &mut self,
        id: &str,
        source: &dyn BillingSource,
    ) -> Result<TaxRate, AccountingError> {
        if let Some(rate) = self.entries.get(id) {
            return Ok(rate.clone());
        }
        let rate = source.resolve_tax_rate(id)?;
        self.entries.insert(id.to_string(), rate.clone());
        Ok(rate)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
