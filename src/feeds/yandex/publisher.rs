//! Validate-then-store publication of externally produced feed documents.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use super::report::ValidationReport;
use super::validator;
use crate::config::YandexPublishConfig;

/// Result of one publish attempt. A rejected document leaves storage
/// untouched; a published one is persisted byte-for-byte as received.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishOutcome {
    Published {
        feed_id: String,
        url: String,
        report: ValidationReport,
    },
    Rejected {
        report: ValidationReport,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// The generated identifier is already taken in storage. Retryable;
    /// existing documents are never overwritten.
    #[error("a feed with id {id} already exists in storage")]
    DuplicateFeedId { id: String },
    #[error("failed to persist feed document: {0}")]
    Storage(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct FeedPublisher {
    storage_dir: PathBuf,
    base_url: String,
}

impl FeedPublisher {
    pub fn new(config: &YandexPublishConfig) -> Self {
        Self {
            storage_dir: config.storage_dir.clone(),
            base_url: config.base_url.clone(),
        }
    }

    /// Runs the streaming validator once and, only when the document is
    /// valid, stores the original bytes under a fresh identifier.
    pub fn publish(&self, document: &[u8]) -> Result<PublishOutcome, PublishError> {
        let report = validator::validate(document);
        if !report.valid {
            debug!(
                error_count = report.errors.len(),
                "feed document rejected by validation"
            );
            return Ok(PublishOutcome::Rejected { report });
        }

        let feed_id = Uuid::new_v4().to_string();
        self.store(&feed_id, document)?;
        info!(%feed_id, "published feed document");

        Ok(PublishOutcome::Published {
            url: format!("{}/{feed_id}.xml", self.base_url),
            feed_id,
            report,
        })
    }

    fn store(&self, feed_id: &str, document: &[u8]) -> Result<(), PublishError> {
        fs::create_dir_all(&self.storage_dir)?;
        let path = self.storage_dir.join(format!("{feed_id}.xml"));

        // Storage is create-only; an existing file is an identifier
        // collision, never a rewrite.
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|err| {
                if err.kind() == ErrorKind::AlreadyExists {
                    PublishError::DuplicateFeedId {
                        id: feed_id.to_string(),
                    }
                } else {
                    PublishError::Storage(err)
                }
            })?;
        file.write_all(document)?;
        Ok(())
    }
}
