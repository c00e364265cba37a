//! OSS accounting-bucket assignment.
//!
//! B2C customers are bucketed by country under the One-Stop-Shop
//! scheme; B2B customers book against an internal account named after
//! the customer. The bucket is attached to report rows only, never
//! persisted on the invoice.

use std::fmt;

use serde::Serialize;

use crate::core::{Customer, intra_community_name};

/// Accounting account a classified item books against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AccountingBucket {
    /// B2C customer outside the intra-community set.
    OssExtracom,
    /// B2C customer in an intra-community country.
    Oss(&'static str),
    /// B2B customer: internal reference, not a VAT bucket.
    Internal(String),
}

impl fmt::Display for AccountingBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OssExtracom => write!(f, "OSS EXTRACOM"),
            Self::Oss(country) => write!(f, "OSS {country}"),
            Self::Internal(name) => write!(f, "{name}"),
        }
    }
}

/// Assign the accounting bucket for a customer.
pub fn accounting_bucket(customer: &Customer) -> AccountingBucket {
    if customer.is_b2b() {
        return AccountingBucket::Internal(customer.name.clone());
    }
    match intra_community_name(&customer.address.country_code) {
        Some(country) => AccountingBucket::Oss(country),
        None => AccountingBucket::OssExtracom,
    }
}
