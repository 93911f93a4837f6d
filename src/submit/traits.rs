//! Trait abstraction for submit collaborators to enable mocking in tests

use crate::state::FormState;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Acknowledgement returned by a sink after accepting a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub id: Uuid,
    pub form: String,
    pub submitted_at: DateTime<Utc>,
    /// Where the submission was written, if it was written anywhere
    pub location: Option<PathBuf>,
}

impl SubmitReceipt {
    pub fn new(form: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            form: form.to_string(),
            submitted_at: Utc::now(),
            location: None,
        }
    }
}

/// Receives the full form state once the submit gate opens
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmitSink: Send + Sync {
    /// Accept a finished form
    async fn submit(&self, form: &str, state: &FormState) -> Result<SubmitReceipt>;

    /// Short human-readable description for the status bar
    fn describe(&self) -> String;
}
