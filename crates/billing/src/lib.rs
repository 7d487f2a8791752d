//! `printdesk-billing` — invoice aggregation.
//!
//! Turns a session's invoice set and the operator's discount choices into an
//! [`InvoiceSummary`]: every intermediate amount plus the fixed-order summary
//! lines the exporters and the accounting sync both consume.

pub mod summary;

pub use summary::{
    CARD_FEE_RATE, DiscountInputs, InvoiceSummary, SummaryLine, TAX_RATE, compute_summary,
};
