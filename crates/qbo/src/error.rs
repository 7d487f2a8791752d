//! Sync-layer errors and API diagnostics.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use crate::transport::QboResponse;

pub type SyncResult<T> = Result<T, SyncError>;

/// Everything QBO support asks for when triaging a failed call. The
/// `intuit_tid` is the provider's request correlation id; it appears in the
/// structured log and in the error surfaced to the operator.
#[derive(Debug, Clone, Serialize)]
pub struct QboErrorReport {
    pub timestamp: DateTime<Utc>,
    pub context: &'static str,
    pub status: u16,
    pub intuit_tid: Option<String>,
    pub body: String,
    pub extra: Option<String>,
}

impl QboErrorReport {
    pub fn from_response(context: &'static str, response: &QboResponse) -> Self {
        Self {
            timestamp: Utc::now(),
            context,
            status: response.status,
            intuit_tid: response.intuit_tid.clone(),
            body: response.body.clone(),
            extra: None,
        }
    }

    pub fn with_extra(mut self, extra: impl Into<String>) -> Self {
        self.extra = Some(extra.into());
        self
    }

    /// Emit the structured error record. Called for every non-200, including
    /// the lookup failures the flow survives.
    pub fn log(&self) {
        tracing::error!(
            context = self.context,
            status = self.status,
            intuit_tid = self.intuit_tid.as_deref().unwrap_or("-"),
            body = %self.body,
            extra = self.extra.as_deref().unwrap_or("-"),
            "QBO request failed"
        );
    }
}

impl fmt::Display for QboErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rejected with status {} (intuit_tid: {})",
            self.context,
            self.status,
            self.intuit_tid.as_deref().unwrap_or("unknown")
        )
    }
}

/// Sync-layer error.
///
/// Validation failures are local rejections raised before any request is
/// made; the other variants abort an in-flight submission.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("network error during {context}: {message}")]
    Network { context: &'static str, message: String },

    #[error("{0}")]
    Api(QboErrorReport),

    #[error("could not parse response: {0}")]
    Parse(String),
}

impl SyncError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Log a transport-level exception (connect failure, timeout, body read
    /// error) and turn it into the error that aborts the flow.
    pub fn network(context: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!(context, message = %message, "QBO request exception");
        Self::Network { context, message }
    }

    /// Log the failure and turn it into the error that aborts the flow.
    pub fn api(context: &'static str, response: &QboResponse) -> Self {
        let report = QboErrorReport::from_response(context, response);
        report.log();
        Self::Api(report)
    }

    /// The provider correlation id, when the failure carried one.
    pub fn intuit_tid(&self) -> Option<&str> {
        match self {
            Self::Api(report) => report.intuit_tid.as_deref(),
            _ => None,
        }
    }
}
