//! `printdesk-pricing` — pure pricing engine.
//!
//! Maps (print type, dimensions, quantity, price book) to itemized cost
//! breakdowns, and prices the flat/simply-tiered add-on services. No I/O, no
//! state; callers feed breakdowns into the order model.

pub mod addons;
pub mod book;
pub mod breakdown;
pub mod tier;

pub use addons::{
    AddOnCharge, AddOnKind, AddOnSelection, AddonRates, OriginalDims, compute_addon_charges,
};
pub use book::{CaptureRates, Media, PriceBook, PriceSheet, StretchBand, WrapStyle};
pub use breakdown::{CostBreakdown, PrintJob, compute_breakdowns};
pub use tier::{Tier, select_tier};
