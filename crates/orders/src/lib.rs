//! `printdesk-orders` — the in-memory order model.
//!
//! A [`Session`] owns the draft and invoice line-item sets, the ordered title
//! registry, per-title custom items and display state. Every mutation goes
//! through a `Session` method so the invariants (stable-id removal, rename
//! atomicity, custom-item deletion symmetry, draft/invoice exclusivity) live
//! in one place.

pub mod custom;
pub mod line_item;
pub mod session;

pub use custom::{CustomItem, CustomItemDraft};
pub use line_item::{LineItem, LineSource};
pub use printdesk_pricing::AddOnKind;
pub use session::Session;
