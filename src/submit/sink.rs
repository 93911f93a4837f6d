//! Submit sinks: JSON files on disk, or the log

use super::traits::{SubmitReceipt, SubmitSink};
use crate::state::FormState;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use uuid::Uuid;

/// What a sink records for one submission
#[derive(Debug, Serialize)]
struct SubmissionRecord<'a> {
    id: Uuid,
    form: &'a str,
    submitted_at: DateTime<Utc>,
    data: &'a FormState,
}

impl<'a> SubmissionRecord<'a> {
    fn new(receipt: &'a SubmitReceipt, state: &'a FormState) -> Self {
        Self {
            id: receipt.id,
            form: &receipt.form,
            submitted_at: receipt.submitted_at,
            data: state,
        }
    }
}

/// Writes each submission to its own pretty-printed JSON file
pub struct JsonFileSink {
    dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file_name(receipt: &SubmitReceipt) -> String {
        let form = receipt
            .form
            .to_ascii_lowercase()
            .replace(|c: char| !c.is_ascii_alphanumeric(), "-");
        format!(
            "{form}-{}-{}.json",
            receipt.submitted_at.format("%Y%m%dT%H%M%S"),
            receipt.id.simple()
        )
    }
}

#[async_trait]
impl SubmitSink for JsonFileSink {
    async fn submit(&self, form: &str, state: &FormState) -> Result<SubmitReceipt> {
        let mut receipt = SubmitReceipt::new(form);
        let content = serde_json::to_string_pretty(&SubmissionRecord::new(&receipt, state))?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let path = self.dir.join(Self::file_name(&receipt));
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::info!("saved submission {} to {}", receipt.id, path.display());
        receipt.location = Some(path);
        Ok(receipt)
    }

    fn describe(&self) -> String {
        format!("saving to {}", self.dir.display())
    }
}

/// Emits each submission as JSON through tracing
#[derive(Default)]
pub struct LogSink;

#[async_trait]
impl SubmitSink for LogSink {
    async fn submit(&self, form: &str, state: &FormState) -> Result<SubmitReceipt> {
        let receipt = SubmitReceipt::new(form);
        let content = serde_json::to_string(&SubmissionRecord::new(&receipt, state))?;
        tracing::info!("submission {content}");
        Ok(receipt)
    }

    fn describe(&self) -> String {
        "logging submissions".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FieldSpec;
    use pretty_assertions::assert_eq;

    fn state() -> FormState {
        let fields = [
            FieldSpec::text("billCity", "City"),
            FieldSpec::checkbox("sendUpdates", "Updates"),
        ];
        let mut state = FormState::from_fields(fields.iter());
        state.set_field("billCity", "Austin").unwrap();
        state
    }

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("stepform-test-{}", Uuid::new_v4().simple()))
    }

    #[test]
    fn test_file_name_is_sanitized() {
        let receipt = SubmitReceipt::new("My Form/1");
        let name = JsonFileSink::file_name(&receipt);
        assert!(name.starts_with("my-form-1-"));
        assert!(name.ends_with(&format!("{}.json", receipt.id.simple())));
    }

    #[tokio::test]
    async fn test_json_file_sink_writes_record() {
        let dir = temp_dir();
        let sink = JsonFileSink::new(&dir);

        let receipt = sink.submit("Checkout", &state()).await.unwrap();
        let path = receipt.location.clone().unwrap();
        assert!(path.starts_with(&dir));

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["form"], "Checkout");
        assert_eq!(written["id"], receipt.id.to_string());
        assert_eq!(
            written["data"],
            serde_json::json!({ "billCity": "Austin", "sendUpdates": false })
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_log_sink_returns_receipt_without_location() {
        let receipt = tokio_test::block_on(LogSink.submit("Onboarding", &state())).unwrap();
        assert_eq!(receipt.form, "Onboarding");
        assert!(receipt.location.is_none());
    }

    #[test]
    fn test_describe() {
        assert_eq!(LogSink.describe(), "logging submissions");
        assert!(JsonFileSink::new("/tmp/out").describe().contains("/tmp/out"));
    }
}
