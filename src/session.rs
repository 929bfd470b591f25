//! Explicit session state for the capture → record flow.
//!
//! One record with named fields instead of scattered per-screen flags: the
//! staged photo survives failed uploads so the user can retry without
//! recapturing, and the last failure notice is kept for display.

use crate::analysis::AnalysisError;
use crate::client::AnalysisClient;
use crate::entry::Entry;
use crate::journal::Journal;

/// State of the active capture session.
#[derive(Debug, Default)]
pub struct CaptureSession {
    pending_photo: Option<Vec<u8>>,
    last_notice: Option<String>,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a freshly captured or gallery-picked photo for upload,
    /// replacing any previously staged one.
    pub fn stage(&mut self, photo: Vec<u8>) {
        self.pending_photo = Some(photo);
        self.last_notice = None;
    }

    pub fn has_pending_photo(&self) -> bool {
        self.pending_photo.is_some()
    }

    /// The user-visible notice from the last failed submit, if any.
    pub fn last_notice(&self) -> Option<&str> {
        self.last_notice.as_deref()
    }

    /// Drops the staged photo and any failure notice.
    pub fn discard(&mut self) {
        self.pending_photo = None;
        self.last_notice = None;
    }

    /// Uploads the staged photo and records the estimate in the journal.
    ///
    /// On success the photo is cleared and a reference to the new entry is
    /// returned. On any [`AnalysisError`] the photo stays staged for a retry
    /// and the notice is recorded; the journal is untouched.
    pub async fn submit<'j>(
        &mut self,
        client: &AnalysisClient,
        journal: &'j mut Journal,
    ) -> Result<&'j Entry, AnalysisError> {
        let photo = self
            .pending_photo
            .clone()
            .ok_or_else(|| AnalysisError::malformed("no photo staged for upload"))?;

        match client.analyze(photo).await {
            Ok(result) => {
                self.pending_photo = None;
                self.last_notice = None;
                Ok(crate::analysis::record_analysis(journal, result).await)
            }
            Err(e) => {
                self.last_notice = Some(e.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::mk_config;
    use tempfile::tempdir;

    #[test]
    fn staging_replaces_photo_and_clears_notice() {
        let mut session = CaptureSession::new();
        assert!(!session.has_pending_photo());

        session.stage(vec![1, 2, 3]);
        assert!(session.has_pending_photo());
        assert!(session.last_notice().is_none());

        session.discard();
        assert!(!session.has_pending_photo());
    }

    #[tokio::test]
    async fn submit_without_photo_fails_without_touching_journal() {
        let tmp = tempdir().unwrap();
        let config = mk_config(tmp.path().join("foodlog"));
        let client = AnalysisClient::new(&config);
        let mut journal = Journal::with_config(config.clone()).unwrap();

        let mut session = CaptureSession::new();
        let err = session.submit(&client, &mut journal).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Malformed { .. }));
        assert!(journal.is_empty());
    }

    #[tokio::test]
    async fn transport_failure_keeps_photo_for_retry() {
        let tmp = tempdir().unwrap();
        let mut config = mk_config(tmp.path().join("foodlog"));
        // Loopback port 1 refuses the connection immediately.
        config.analysis_url = "http://127.0.0.1:1/analyze".to_string();
        config.upload_timeout = std::time::Duration::from_secs(2);
        let client = AnalysisClient::new(&config);
        let mut journal = Journal::with_config(config.clone()).unwrap();

        let mut session = CaptureSession::new();
        session.stage(vec![0xFF, 0xD8, 0xFF]);

        let err = session.submit(&client, &mut journal).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Transport { .. }));
        assert!(session.has_pending_photo(), "photo retained for retry");
        assert!(session.last_notice().is_some());
        assert!(journal.is_empty());
    }
}
