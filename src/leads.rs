//! Lead capture: persist `(timestamp, contact, url, score)` after a scan.
//!
//! Persistence runs on a background worker fed by a channel. Submitting never
//! blocks or fails; store errors are logged and dropped.

use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(5);

/// One captured lead
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    /// RFC 3339
    pub timestamp: String,
    pub contact: String,
    pub url: String,
    pub score: u8,
}

impl LeadRecord {
    pub fn new(contact: &str, url: &str, score: u8) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            contact: contact.to_string(),
            url: url.to_string(),
            score,
        }
    }
}

#[derive(Debug, Error)]
pub enum LeadError {
    #[error("failed to write lead store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode lead: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("lead webhook request failed: {0}")]
    Webhook(String),
    #[error("lead webhook returned HTTP {0}")]
    WebhookStatus(u16),
}

/// Append-only destination for leads
pub trait LeadStore: Send {
    fn append(&mut self, record: &LeadRecord) -> Result<(), LeadError>;
}

/// One JSON object per line, appended to a local file
pub struct JsonlLeadStore {
    path: PathBuf,
}

impl JsonlLeadStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LeadStore for JsonlLeadStore {
    fn append(&mut self, record: &LeadRecord) -> Result<(), LeadError> {
        let line = serde_json::to_string(record)?;
        let io_err = |source| LeadError::Io {
            path: self.path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_err)?;
        writeln!(file, "{}", line).map_err(io_err)
    }
}

/// POSTs each record as JSON, e.g. to a spreadsheet web-app endpoint
pub struct WebhookLeadStore {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl WebhookLeadStore {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(WEBHOOK_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            endpoint: endpoint.into(),
            client,
        }
    }
}

impl LeadStore for WebhookLeadStore {
    fn append(&mut self, record: &LeadRecord) -> Result<(), LeadError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(record)
            .send()
            .map_err(|e| LeadError::Webhook(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(LeadError::WebhookStatus(status.as_u16()))
        }
    }
}

/// Background writer for leads
pub struct LeadRecorder {
    sender: Option<Sender<LeadRecord>>,
    worker: Option<JoinHandle<usize>>,
}

impl LeadRecorder {
    /// Start a worker that appends every submitted record to each store
    pub fn spawn(mut stores: Vec<Box<dyn LeadStore>>) -> Self {
        let (sender, receiver) = mpsc::channel::<LeadRecord>();
        let worker = std::thread::spawn(move || {
            let mut written = 0;
            for record in receiver {
                for store in stores.iter_mut() {
                    match store.append(&record) {
                        Ok(()) => {
                            written += 1;
                            debug!(url = %record.url, "lead recorded");
                        }
                        Err(e) => warn!(url = %record.url, error = %e, "failed to record lead"),
                    }
                }
            }
            written
        });
        Self {
            sender: Some(sender),
            worker: Some(worker),
        }
    }

    /// Hand a record to the worker. Never blocks.
    pub fn submit(&self, record: LeadRecord) {
        let Some(sender) = &self.sender else {
            return;
        };
        if sender.send(record).is_err() {
            warn!("lead worker has stopped; record dropped");
        }
    }

    /// Close the channel and wait for pending writes. Returns how many
    /// store appends succeeded.
    pub fn finish(mut self) -> usize {
        self.shutdown()
    }

    fn shutdown(&mut self) -> usize {
        drop(self.sender.take());
        match self.worker.take().map(|w| w.join()) {
            Some(Ok(written)) => written,
            Some(Err(_)) => {
                warn!("lead worker panicked");
                0
            }
            None => 0,
        }
    }
}

impl Drop for LeadRecorder {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    struct MemoryStore(Arc<Mutex<Vec<LeadRecord>>>);

    impl LeadStore for MemoryStore {
        fn append(&mut self, record: &LeadRecord) -> Result<(), LeadError> {
            self.0.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    struct FailingStore;

    impl LeadStore for FailingStore {
        fn append(&mut self, _record: &LeadRecord) -> Result<(), LeadError> {
            Err(LeadError::WebhookStatus(500))
        }
    }

    #[test]
    fn jsonl_store_appends_lines() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonlLeadStore::new(dir.path().join("leads.jsonl"));
        store
            .append(&LeadRecord::new("a@example.com", "https://a.example/", 72))
            .unwrap();
        store
            .append(&LeadRecord::new("b@example.com", "https://b.example/", 40))
            .unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: LeadRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.contact, "a@example.com");
        assert_eq!(first.score, 72);
    }

    #[test]
    fn jsonl_store_reports_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let mut store = JsonlLeadStore::new(dir.path().join("missing").join("leads.jsonl"));
        let err = store
            .append(&LeadRecord::new("a@example.com", "https://a.example/", 1))
            .unwrap_err();
        assert!(matches!(err, LeadError::Io { .. }));
    }

    #[test]
    fn recorder_delivers_in_submission_order() {
        let sink = Arc::new(Mutex::new(Vec::new()));
        let recorder = LeadRecorder::spawn(vec![Box::new(MemoryStore(sink.clone()))]);
        recorder.submit(LeadRecord::new("x", "https://1.example/", 10));
        recorder.submit(LeadRecord::new("x", "https://2.example/", 20));
        assert_eq!(recorder.finish(), 2);

        let urls: Vec<String> = sink.lock().unwrap().iter().map(|r| r.url.clone()).collect();
        assert_eq!(urls, vec!["https://1.example/", "https://2.example/"]);
    }

    #[test]
    fn store_failures_are_absorbed() {
        let sink = Arc::new(Mutex::new(Vec::new()));
        let recorder = LeadRecorder::spawn(vec![
            Box::new(FailingStore),
            Box::new(MemoryStore(sink.clone())),
        ]);
        recorder.submit(LeadRecord::new("x", "https://1.example/", 10));
        assert_eq!(recorder.finish(), 1);
        assert_eq!(sink.lock().unwrap().len(), 1);
    }

    #[test]
    fn dropping_recorder_flushes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("leads.jsonl");
        {
            let recorder = LeadRecorder::spawn(vec![Box::new(JsonlLeadStore::new(&path))]);
            recorder.submit(LeadRecord::new("c@example.com", "https://c.example/", 99));
        }
        assert!(fs::read_to_string(&path).unwrap().contains("c@example.com"));
    }
}
