//! Core money, currency, country, and numbering foundations.
//!
//! This module provides the canonical entity types retrieved from the
//! payment processor, the [`Money`] arithmetic used everywhere above
//! it, and the credit-note number sequence.

mod countries;
mod currencies;
mod error;
mod money;
mod numbering;
mod types;
mod window;

pub use countries::*;
pub use currencies::*;
pub use error::*;
pub use money::*;
pub use numbering::*;
pub use types::*;
pub use window::*;
