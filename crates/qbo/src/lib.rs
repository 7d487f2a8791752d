//! `printdesk-qbo` — QuickBooks Online synchronization adapter.
//!
//! One submission runs a fixed sequence: refresh the OAuth tokens, resolve
//! the customer, resolve every invoice item, post the invoice. Each step
//! aborts the whole flow on failure and nothing is retried automatically;
//! re-invoking the submission re-runs the sequence from the token refresh.
//!
//! All HTTP goes through the [`QboTransport`] trait so the resolution logic
//! can be exercised against a stub server.

pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod sanitize;
pub mod transport;

pub use client::{QboClient, SubmissionReceipt};
pub use config::{EnvStore, QboConfig, QboEnvironment};
pub use error::{QboErrorReport, SyncError, SyncResult};
pub use sanitize::{escape_query, strip_emoji};
pub use transport::{Entity, HttpTransport, QboResponse, QboTransport};
