//! Report aggregation.
//!
//! Groups classified payout items by VAT category and paid invoices by
//! customer country, summing with [`Money::sum`] semantics. Produces
//! plain rows; table, CSV, and XLSX rendering belong to the consumer.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::classify::{AccountingBucket, VatCategory, VatReportItem, accounting_bucket};
use crate::core::{AccountingError, Invoice, Money, Payout};

/// Sum classified items per VAT category.
///
/// A run always uses one reporting currency, so each bucket sums
/// cleanly; a mixed-currency bucket surfaces the underlying
/// `CurrencyMismatch`. An empty input fails with `EmptySum` — a report
/// over nothing is a caller bug, not a zero.
pub fn totals_by_category(
    items: &[VatReportItem],
) -> Result<BTreeMap<VatCategory, Money>, AccountingError> {
    if items.is_empty() {
        return Err(AccountingError::EmptySum);
    }
    let mut grouped: BTreeMap<VatCategory, Vec<Money>> = BTreeMap::new();
    for item in items {
        grouped.entry(item.category).or_default().push(item.amount);
    }
    let mut totals = BTreeMap::new();
    for (category, amounts) in grouped {
        totals.insert(category, Money::sum(amounts)?);
    }
    Ok(totals)
}

/// Paid-invoice VAT split for one customer country.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryVatRow {
    /// ISO 3166-1 alpha-2 code of the customer country.
    pub country_code: String,
    pub total_excl_tax: Money,
    pub total_incl_tax: Money,
}

/// Per-country totals over paid, taxable invoices, sorted by country
/// code. Invoices that are unpaid or untaxed do not contribute.
pub fn vat_per_country(invoices: &[Invoice]) -> Result<Vec<CountryVatRow>, AccountingError> {
    let mut grouped: BTreeMap<String, Vec<&Invoice>> = BTreeMap::new();
    for invoice in invoices {
        if invoice.is_paid() && invoice.is_taxable() {
            grouped
                .entry(invoice.customer.address.country_code.clone())
                .or_default()
                .push(invoice);
        }
    }
    let mut rows = Vec::with_capacity(grouped.len());
    for (country_code, group) in grouped {
        rows.push(CountryVatRow {
            country_code,
            total_excl_tax: Money::sum(group.iter().map(|i| i.total_excl_tax))?,
            total_incl_tax: Money::sum(group.iter().map(|i| i.total))?,
        });
    }
    Ok(rows)
}

/// One line of the detailed VAT report: the raw payout item joined with
/// its classification, related invoice, and accounting bucket.
#[derive(Debug, Clone, Serialize)]
pub struct DetailedRow {
    pub description: String,
    pub kind: &'static str,
    pub gross: Money,
    pub net: Money,
    pub fee: Money,
    pub created: NaiveDateTime,
    pub invoice_number: Option<String>,
    pub customer_email: Option<String>,
    pub customer_country: Option<String>,
    pub bucket: Option<AccountingBucket>,
    pub taxed_amount: Money,
    pub category: VatCategory,
    pub payout_id: String,
    pub payout_arrival: NaiveDateTime,
}

impl DetailedRow {
    /// Join a classified item with its payout. Invoice-derived columns
    /// stay empty for items without a related invoice, as on the
    /// original report.
    pub fn build(item: &VatReportItem, payout: &Payout) -> Self {
        let source = &item.source;
        let invoice = source.related_invoice.as_ref();
        Self {
            description: source.description.clone(),
            kind: source.kind.as_str(),
            gross: source.gross,
            net: source.net,
            fee: source.fee(),
            created: source.created,
            invoice_number: invoice.map(|i| i.number.clone()),
            customer_email: invoice.map(|i| i.customer.email.clone()),
            customer_country: invoice.map(|i| i.customer.address.country_code.clone()),
            bucket: invoice.map(|i| accounting_bucket(&i.customer)),
            taxed_amount: item.amount,
            category: item.category,
            payout_id: payout.id.clone(),
            payout_arrival: payout.arrival_date,
        }
    }
}

/// The detailed VAT report over a window: one row per payout line item
/// plus the per-category totals.
#[derive(Debug, Clone, Serialize)]
pub struct DetailedVatReport {
    pub rows: Vec<DetailedRow>,
    pub totals: BTreeMap<VatCategory, Money>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{
        Address, Currency, Customer, InvoiceStatus, LineItemKind, PayoutLineItem, TaxRate,
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn dt(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, d)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn eur(amount: Decimal) -> Money {
        Money::new(amount, Currency::from_iso("EUR").unwrap())
    }

    fn report_item(category: VatCategory, amount: Decimal) -> VatReportItem {
        VatReportItem {
            category,
            amount: eur(amount),
            source: PayoutLineItem {
                description: "test".into(),
                kind: LineItemKind::StripeFee,
                gross: eur(-amount),
                net: eur(-amount),
                created: dt(1),
                source_id: "txn".into(),
                related_invoice: None,
            },
        }
    }

    fn paid_invoice(number: &str, country: &str, excl: Decimal, incl: Decimal) -> Invoice {
        let currency = Currency::from_iso("EUR").unwrap();
        Invoice {
            id: format!("in_{number}"),
            number: number.into(),
            status: InvoiceStatus::Paid,
            currency,
            customer: Customer {
                name: "Customer".into(),
                email: "c@example.org".into(),
                address: Address {
                    line1: "Street 1".into(),
                    line2: None,
                    city: "City".into(),
                    postal_code: "1000".into(),
                    state: None,
                    country_code: country.into(),
                },
                vat_id: None,
            },
            lines: Vec::new(),
            amount_due: eur(incl),
            subtotal: eur(excl),
            subtotal_excl_tax: eur(excl),
            total: eur(incl),
            total_excl_tax: eur(excl),
            tax: Some(eur(incl - excl)),
            tax_rate: Some(TaxRate {
                percentage: dec!(21),
                country_code: country.into(),
            }),
            created: dt(1),
            finalized: Some(dt(1)),
            period_start: dt(1),
        }
    }

    #[test]
    fn totals_group_and_sum() {
        let items = [
            report_item(VatCategory::Billing, dec!(2.90)),
            report_item(VatCategory::Billing, dec!(1.10)),
            report_item(VatCategory::RadarFees, dec!(0.06)),
        ];
        let totals = totals_by_category(&items).unwrap();
        assert_eq!(totals[&VatCategory::Billing], eur(dec!(4.00)));
        assert_eq!(totals[&VatCategory::RadarFees], eur(dec!(0.06)));
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn totals_of_nothing_is_an_error() {
        assert!(matches!(
            totals_by_category(&[]),
            Err(AccountingError::EmptySum)
        ));
    }

    #[test]
    fn totals_of_one_item_is_that_item() {
        let items = [report_item(VatCategory::BankAccount, dec!(0.40))];
        let totals = totals_by_category(&items).unwrap();
        assert_eq!(totals[&VatCategory::BankAccount], eur(dec!(0.40)));
    }

    #[test]
    fn per_country_sums_paid_taxable_only() {
        let mut untaxed = paid_invoice("25001-0003", "US", dec!(50), dec!(50));
        untaxed.tax = None;
        untaxed.tax_rate = None;
        let mut open = paid_invoice("25001-0004", "BE", dec!(10), dec!(12.10));
        open.status = InvoiceStatus::Open;

        let invoices = [
            paid_invoice("25001-0001", "BE", dec!(100), dec!(121)),
            paid_invoice("25001-0002", "BE", dec!(200), dec!(242)),
            paid_invoice("25001-0005", "FR", dec!(80), dec!(96)),
            untaxed,
            open,
        ];
        let rows = vat_per_country(&invoices).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].country_code, "BE");
        assert_eq!(rows[0].total_excl_tax, eur(dec!(300)));
        assert_eq!(rows[0].total_incl_tax, eur(dec!(363)));
        assert_eq!(rows[1].country_code, "FR");
        assert_eq!(rows[1].total_incl_tax, eur(dec!(96)));
    }

    #[test]
    fn detailed_row_without_invoice_leaves_columns_empty() {
        let item = report_item(VatCategory::Billing, dec!(2.90));
        let payout = Payout {
            id: "po_1".into(),
            kind: "bank_account".into(),
            amount: eur(dec!(100)),
            created: dt(1),
            arrival_date: dt(2),
        };
        let row = DetailedRow::build(&item, &payout);
        assert_eq!(row.invoice_number, None);
        assert_eq!(row.bucket, None);
        assert_eq!(row.category, VatCategory::Billing);
        assert_eq!(row.taxed_amount, eur(dec!(2.90)));
        assert_eq!(row.payout_id, "po_1");
    }

    #[test]
    fn detailed_row_with_invoice_carries_bucket() {
        let mut item = report_item(VatCategory::ProcessingFeesCard, dec!(0.87));
        item.source.related_invoice =
            Some(paid_invoice("25001-0001", "BE", dec!(100), dec!(121)));
        let payout = Payout {
            id: "po_2".into(),
            kind: "bank_account".into(),
            amount: eur(dec!(100)),
            created: dt(1),
            arrival_date: dt(2),
        };
        let row = DetailedRow::build(&item, &payout);
        assert_eq!(row.invoice_number.as_deref(), Some("25001-0001"));
        assert_eq!(row.customer_country.as_deref(), Some("BE"));
        assert_eq!(row.bucket, Some(AccountingBucket::Oss("Belgium")));
    }
}
