//! audit
//!
//! Audit records for attribute generation calls.
//!
//! Every pass through the generation pipeline produces exactly one
//! [`AuditRecord`], whether it succeeded or fell back. Records are written
//! through the [`AuditSink`] trait so the pipeline does not depend on where
//! they end up.
//!
//! # Record shape
//!
//! Serialized with camelCase keys:
//!
//! ```json
//! {
//!   "timestamp": "2025-01-01T00:00:00Z",
//!   "requestId": "9b1d...",
//!   "request": { "intent": "...", "fieldType": "text", "groupType": "...", "hasScreenshot": false },
//!   "response": { "success": true, "data": { "display_name": "..." } },
//!   "sentPayload": { ... },
//!   "receivedPayload": { ... },
//!   "duration": 812
//! }
//! ```
//!
//! # Sinks
//!
//! - [`JsonlAuditSink`]: one JSON object per line, appended under an
//!   exclusive file lock and fsynced
//! - [`MemoryAuditSink`]: keeps records in memory, for tests

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::core::types::UtcTimestamp;

/// Errors from audit sinks.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("audit log i/o error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode audit record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("audit writer task failed: {0}")]
    Task(String),
}

/// Correlates the log lines and the audit record of one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the caller asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRequest {
    pub intent: String,
    pub field_type: String,
    pub group_type: String,
    pub has_screenshot: bool,
}

/// Outcome of the call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditResponse {
    pub fn success(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// A failed call; `data` holds whatever was parsed before the failure.
    pub fn failure(error: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            success: false,
            data,
            error: Some(error.into()),
        }
    }
}

/// One audit entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub timestamp: UtcTimestamp,
    pub request_id: RequestId,
    pub request: AuditRequest,
    pub response: AuditResponse,
    /// Exactly what was sent to the generator, if anything was
    pub sent_payload: Option<Value>,
    /// Exactly what came back, if anything did
    pub received_payload: Option<Value>,
    /// Wall time of the call in milliseconds
    pub duration: u64,
}

/// Destination for audit records.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Persist one record.
    async fn record(&self, record: &AuditRecord) -> Result<(), AuditError>;
}

/// Appends records to a JSON-lines file.
#[derive(Debug, Clone)]
pub struct JsonlAuditSink {
    path: PathBuf,
}

impl JsonlAuditSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every record in the file. A missing file reads as empty.
    pub fn read_all(&self) -> Result<Vec<AuditRecord>, AuditError> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(AuditError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let mut records = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|source| AuditError::Io {
                path: self.path.clone(),
                source,
            })?;
            if !line.trim().is_empty() {
                records.push(serde_json::from_str(&line)?);
            }
        }
        Ok(records)
    }
}

fn append_line(path: &Path, line: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    FileExt::lock_exclusive(&file)?;
    let written = file
        .write_all(line.as_bytes())
        .and_then(|()| file.sync_all());
    FileExt::unlock(&file)?;
    written
}

#[async_trait]
impl AuditSink for JsonlAuditSink {
    async fn record(&self, record: &AuditRecord) -> Result<(), AuditError> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            append_line(&path, &line).map_err(|source| AuditError::Io { path, source })
        })
        .await
        .map_err(|e| AuditError::Task(e.to_string()))??;

        tracing::debug!(request_id = %record.request_id, path = %self.path.display(), "audit record written");
        Ok(())
    }
}

/// Keeps records in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryAuditSink {
    records: Arc<Mutex<Vec<AuditRecord>>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records so far.
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn record(&self, record: &AuditRecord) -> Result<(), AuditError> {
        self.records
            .lock()
            .map_err(|e| AuditError::Task(e.to_string()))?
            .push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample(success: bool) -> AuditRecord {
        AuditRecord {
            timestamp: UtcTimestamp::now(),
            request_id: RequestId::new(),
            request: AuditRequest {
                intent: "buyer phone".into(),
                field_type: "text".into(),
                group_type: "single".into(),
                has_screenshot: false,
            },
            response: if success {
                AuditResponse::success(json!({ "display_name": "Phone" }))
            } else {
                AuditResponse::failure("generator unreachable", None)
            },
            sent_payload: Some(json!({ "model": "m" })),
            received_payload: None,
            duration: 12,
        }
    }

    mod record_shape {
        use super::*;

        #[test]
        fn camel_case_keys() {
            let value = serde_json::to_value(sample(true)).unwrap();
            let obj = value.as_object().unwrap();
            for key in [
                "timestamp",
                "requestId",
                "request",
                "response",
                "sentPayload",
                "receivedPayload",
                "duration",
            ] {
                assert!(obj.contains_key(key), "missing {key}");
            }
            assert_eq!(value["request"]["fieldType"], "text");
            assert_eq!(value["request"]["hasScreenshot"], false);
            assert!(value["response"].get("error").is_none());
        }

        #[test]
        fn failure_carries_error() {
            let value = serde_json::to_value(sample(false)).unwrap();
            assert_eq!(value["response"]["success"], false);
            assert_eq!(value["response"]["error"], "generator unreachable");
            assert!(value["response"].get("data").is_none());
        }

        #[test]
        fn request_ids_unique() {
            assert_ne!(RequestId::new(), RequestId::new());
        }

        #[test]
        fn request_id_is_a_plain_string() {
            let record = sample(true);
            let value = serde_json::to_value(&record).unwrap();
            assert_eq!(value["requestId"], json!(record.request_id.to_string()));

            let back: AuditRecord = serde_json::from_value(value).unwrap();
            assert_eq!(back.request_id, record.request_id);
        }
    }

    mod jsonl_sink {
        use super::*;

        #[tokio::test]
        async fn appends_one_line_per_record() {
            let temp = tempfile::tempdir().unwrap();
            let sink = JsonlAuditSink::new(temp.path().join("logs/audit.jsonl"));

            let first = sample(true);
            let second = sample(false);
            sink.record(&first).await.unwrap();
            sink.record(&second).await.unwrap();

            let text = fs::read_to_string(sink.path()).unwrap();
            assert_eq!(text.lines().count(), 2);
            assert_eq!(sink.read_all().unwrap(), vec![first, second]);
        }

        #[test]
        fn missing_file_reads_empty() {
            let temp = tempfile::tempdir().unwrap();
            let sink = JsonlAuditSink::new(temp.path().join("none.jsonl"));
            assert!(sink.read_all().unwrap().is_empty());
        }
    }

    mod memory_sink {
        use super::*;

        #[tokio::test]
        async fn keeps_records() {
            let sink = MemoryAuditSink::new();
            let record = sample(true);
            sink.record(&record).await.unwrap();
            assert_eq!(sink.records(), vec![record]);
        }
    }
}
