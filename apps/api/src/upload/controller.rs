//! Upload controller — owns the client-visible lifecycle and the single
//! authoritative résumé record.
//!
//! The lifecycle is one tagged value: `Idle | Uploading | Ready | Failed`.
//! A loading flag, an error string, and a data-or-null never exist as
//! separate variables, so states like "loading with an error set" are
//! unrepresentable. The state lives in a `watch` channel: this controller
//! is the single writer, consumers subscribe or read the current value.

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::models::resume::ResumeRecord;
use crate::upload::ingest::IngestionService;
use crate::upload::mutator::{self, InvalidPath};

/// Client-visible lifecycle state. The `Ready` record is the sole
/// authoritative value; both views are projections of this enum.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UploadState {
    Idle,
    Uploading,
    Ready { record: ResumeRecord },
    Failed { message: String },
}

impl UploadState {
    pub fn record(&self) -> Option<&ResumeRecord> {
        match self {
            UploadState::Ready { record } => Some(record),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("no document selected")]
    EmptySubmission,

    #[error("an upload is already in progress")]
    AlreadyUploading,

    #[error("{0}")]
    Ingestion(String),
}

#[derive(Debug, Error)]
pub enum EditError {
    #[error("no parsed résumé to edit")]
    NoRecord,

    #[error(transparent)]
    InvalidPath(#[from] InvalidPath),
}

pub struct UploadController {
    ingestion: IngestionService,
    state: watch::Sender<UploadState>,
}

impl UploadController {
    pub fn new(ingestion: IngestionService) -> Self {
        let (state, _) = watch::channel(UploadState::Idle);
        Self { ingestion, state }
    }

    /// Current lifecycle state, as a cloned snapshot.
    pub fn current(&self) -> UploadState {
        self.state.borrow().clone()
    }

    /// Current record, if the lifecycle is `Ready`.
    pub fn record(&self) -> Option<ResumeRecord> {
        self.state.borrow().record().cloned()
    }

    /// Subscribes to lifecycle transitions. Records are immutable values,
    /// so a subscriber never observes one mid-mutation. HTTP handlers poll
    /// `current`; this is the notify seam for in-process consumers.
    #[allow(dead_code)]
    pub fn subscribe(&self) -> watch::Receiver<UploadState> {
        self.state.subscribe()
    }

    /// Submits a document and runs one full ingestion lifecycle.
    ///
    /// An empty submission is rejected before any transition. A submit while
    /// `Uploading` is ignored — at most one ingestion is in flight per
    /// controller, regardless of UI discipline. On failure any previously
    /// held record is cleared: a failed re-upload never leaves stale data
    /// visible as if it were current.
    pub async fn submit(
        &self,
        document: Bytes,
        filename: &str,
        mime_type: &str,
    ) -> Result<ResumeRecord, SubmitError> {
        if document.is_empty() {
            return Err(SubmitError::EmptySubmission);
        }
        if !self.try_begin() {
            warn!("submit ignored: an upload is already in flight");
            return Err(SubmitError::AlreadyUploading);
        }

        match self.ingestion.parse(&document, filename, mime_type).await {
            Ok(record) => {
                info!("ingestion succeeded for {filename}; installing record");
                self.state.send_replace(UploadState::Ready {
                    record: record.clone(),
                });
                Ok(record)
            }
            Err(e) => {
                let message = e.to_string();
                warn!("ingestion failed for {filename}: {message}");
                self.state.send_replace(UploadState::Failed {
                    message: message.clone(),
                });
                Err(SubmitError::Ingestion(message))
            }
        }
    }

    /// Applies one field edit through the mutator and installs the
    /// resulting snapshot. A rejected edit leaves the held record untouched
    /// and notifies nobody.
    pub fn apply_edit(&self, path: &str, value: &str) -> Result<ResumeRecord, EditError> {
        let mut outcome = Err(EditError::NoRecord);
        self.state.send_if_modified(|state| {
            let UploadState::Ready { record } = state else {
                return false;
            };
            match mutator::apply(record, path, value) {
                Ok(next) => {
                    *record = next.clone();
                    outcome = Ok(next);
                    true
                }
                Err(e) => {
                    outcome = Err(EditError::InvalidPath(e));
                    false
                }
            }
        });
        outcome
    }

    // Atomic check-and-set on the watch channel's internal lock, so exactly
    // one of any racing submits wins the transition into `Uploading`.
    fn try_begin(&self) -> bool {
        let mut began = false;
        self.state.send_if_modified(|state| {
            if matches!(state, UploadState::Uploading) {
                return false;
            }
            *state = UploadState::Uploading;
            began = true;
            true
        });
        began
    }
}
