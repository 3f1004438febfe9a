//! Knowledge-base management: staged uploads and the collection listing.
//!
//! Upload progress is simulated.  Staged files count up 10% every 50 ms,
//! become `processing` on reaching 100%, and `success` one second later.  The
//! simulation is cosmetic and independent of the real upload, which is a single
//! batched request issued by [`KnowledgeBase::apply`] once every staged file
//! has finished its simulation.  A failed apply marks the staged files
//! `error`; they stay staged and can be applied again.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::client::MincaClient;
use crate::error::{Error, Result};
use crate::notification::Notification;
use crate::reveal::{IntervalTicker, Ticker};
use crate::types::{Collection, FileUpload};

/// Largest accepted upload, inclusive.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// The only accepted MIME type.
pub const UPLOAD_MIME: &str = "application/pdf";

/// Period of the simulated progress.
pub const PROGRESS_TICK: Duration = Duration::from_millis(50);

/// Progress added per tick, in percent.
pub const PROGRESS_STEP: u8 = 10;

/// Time a file spends `processing` before it is marked `success`.
pub const PROCESSING_DELAY: Duration = Duration::from_millis(1000);

/// Validation message when staging without a collection name.
pub const COLLECTION_REQUIRED: &str = "Please enter a collection name";

const PROCESSING_TICKS: u32 = (PROCESSING_DELAY.as_millis() / PROGRESS_TICK.as_millis()) as u32;

/// Whether a file may be uploaded to the knowledge base.
pub fn accepts(file: &FileUpload) -> bool {
    file.mime == UPLOAD_MIME && file.size() <= MAX_UPLOAD_BYTES
}

/// Formats a byte count as `bytes`, `KB` or `MB` with one decimal.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} bytes")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// Simulated state of a staged upload.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    Uploading,
    Processing,
    Success,
    Error,
}

impl UploadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStatus::Uploading => "uploading",
            UploadStatus::Processing => "processing",
            UploadStatus::Success => "success",
            UploadStatus::Error => "error",
        }
    }
}

/// A file waiting to be applied to the knowledge base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedUpload {
    pub id: String,
    pub file: FileUpload,
    pub progress: u8,
    pub status: UploadStatus,
    processing_ticks: u32,
}

impl StagedUpload {
    fn advance(&mut self) -> bool {
        match self.status {
            UploadStatus::Uploading => {
                self.progress = (self.progress + PROGRESS_STEP).min(100);
                if self.progress == 100 {
                    self.status = UploadStatus::Processing;
                }
                true
            }
            UploadStatus::Processing => {
                self.processing_ticks += 1;
                if self.processing_ticks >= PROCESSING_TICKS {
                    self.status = UploadStatus::Success;
                    true
                } else {
                    false
                }
            }
            UploadStatus::Success | UploadStatus::Error => false,
        }
    }
}

/////////////////////////////////////////////// UploadQueue ///////////////////////////////////////

/// Files staged for one collection.
#[derive(Debug, Default)]
pub struct UploadQueue {
    collection: String,
    uploads: Vec<StagedUpload>,
    applying: bool,
    next_id: u64,
}

impl UploadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages `files` for `collection`, replacing whatever was staged.
    ///
    /// Files failing [`accepts`] are dropped silently; when none pass, nothing
    /// changes and `Ok(0)` is returned.  Returns the number staged.
    pub fn stage(&mut self, collection: &str, files: Vec<FileUpload>) -> Result<usize> {
        let accepted: Vec<FileUpload> = files.into_iter().filter(accepts).collect();
        if accepted.is_empty() {
            return Ok(0);
        }
        let collection = collection.trim();
        if collection.is_empty() {
            return Err(Error::validation(
                COLLECTION_REQUIRED,
                Some("collection".to_string()),
            ));
        }
        self.collection = collection.to_string();
        self.uploads.clear();
        for file in accepted {
            let id = format!("upload-{}", self.next_id);
            self.next_id += 1;
            self.uploads.push(StagedUpload {
                id,
                file,
                progress: 0,
                status: UploadStatus::Uploading,
                processing_ticks: 0,
            });
        }
        tracing::debug!(collection, count = self.uploads.len(), "uploads staged");
        Ok(self.uploads.len())
    }

    /// Unstages one file.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.uploads.len();
        self.uploads.retain(|upload| upload.id != id);
        self.uploads.len() != before
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn uploads(&self) -> &[StagedUpload] {
        &self.uploads
    }

    pub fn is_empty(&self) -> bool {
        self.uploads.is_empty()
    }

    pub fn is_applying(&self) -> bool {
        self.applying
    }

    /// Whether any staged file is still `uploading` or `processing`.
    pub fn is_simulating(&self) -> bool {
        self.uploads.iter().any(|upload| {
            matches!(
                upload.status,
                UploadStatus::Uploading | UploadStatus::Processing
            )
        })
    }

    /// Whether the staged files can be applied now.
    pub fn can_apply(&self) -> bool {
        !self.uploads.is_empty() && !self.is_simulating() && !self.applying
    }

    /// Advances the simulation by one tick; returns whether anything visible changed.
    pub fn advance(&mut self) -> bool {
        let mut changed = false;
        for upload in &mut self.uploads {
            changed |= upload.advance();
        }
        changed
    }

    /// Drives the simulation to the end, calling `on_update` after each visible change.
    pub async fn simulate<T, F>(&mut self, ticker: &mut T, cancel: &CancellationToken, mut on_update: F)
    where
        T: Ticker,
        F: FnMut(&[StagedUpload]),
    {
        while self.is_simulating() {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return,
                _ = ticker.tick() => {
                    if self.advance() {
                        on_update(&self.uploads);
                    }
                }
            }
        }
    }

    /// [`simulate`](Self::simulate) with the standard 50 ms tick.
    pub async fn simulate_default<F>(&mut self, cancel: &CancellationToken, on_update: F)
    where
        F: FnMut(&[StagedUpload]),
    {
        let mut ticker = IntervalTicker::new(PROGRESS_TICK);
        self.simulate(&mut ticker, cancel, on_update).await;
    }

    pub(crate) fn mark_failed(&mut self) {
        for upload in &mut self.uploads {
            upload.status = UploadStatus::Error;
        }
    }

    fn clear(&mut self) {
        self.uploads.clear();
        self.collection.clear();
    }
}

/////////////////////////////////////////////// KnowledgeBase /////////////////////////////////////

/// A collection in the listing, with its expand toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionEntry {
    pub collection: Collection,
    pub expanded: bool,
}

/// The collection listing and the operations that change it.
#[derive(Debug, Default)]
pub struct KnowledgeBase {
    listing: Option<Vec<CollectionEntry>>,
}

impl KnowledgeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the listing stale.
    pub fn invalidate(&mut self) {
        self.listing = None;
    }

    /// The listing, fetched first if stale.  Collections start expanded.
    pub async fn collections(&mut self, client: &MincaClient) -> Result<&[CollectionEntry]> {
        if self.listing.is_none() {
            let collections = client.list_collections().await?;
            self.replace(collections);
        }
        Ok(self.listing.as_deref().unwrap_or_default())
    }

    /// Flips the expand toggle of `name`; returns the new state.
    pub fn toggle_expanded(&mut self, name: &str) -> Option<bool> {
        let entry = self
            .listing
            .as_mut()?
            .iter_mut()
            .find(|entry| entry.collection.collection == name)?;
        entry.expanded = !entry.expanded;
        Some(entry.expanded)
    }

    /// Sends every staged file of `queue` in one request.
    ///
    /// Does nothing unless [`UploadQueue::can_apply`].  On success the queue
    /// is cleared and the listing invalidated.
    ///
    /// ```
    /// # use minca::knowledge_base::{KnowledgeBase, UploadQueue};
    /// # use minca::{ClientConfig, MincaClient};
    /// # tokio_test::block_on(async {
    /// let client = MincaClient::new(&ClientConfig::new())?;
    /// let mut kb = KnowledgeBase::new();
    /// let mut queue = UploadQueue::new();
    /// // Nothing staged, so nothing is sent.
    /// assert!(kb.apply(&client, &mut queue).await.is_none());
    /// # Ok::<(), minca::Error>(())
    /// # }).unwrap();
    /// ```
    pub async fn apply(&mut self, client: &MincaClient, queue: &mut UploadQueue) -> Option<Notification> {
        if !queue.can_apply() {
            return None;
        }
        queue.applying = true;
        let files: Vec<FileUpload> = queue.uploads.iter().map(|u| u.file.clone()).collect();
        let outcome = client.upload_files(&queue.collection, &files).await;
        queue.applying = false;
        match outcome {
            Ok(()) => {
                tracing::info!(collection = %queue.collection, count = files.len(), "files uploaded");
                queue.clear();
                self.invalidate();
                Some(
                    Notification::success("Files uploaded successfully").with_description(
                        "Your documents have been added to the knowledge base.",
                    ),
                )
            }
            Err(err) => {
                tracing::warn!(error = %err, "upload failed");
                queue.mark_failed();
                Some(Notification::error("Upload failed").with_description(
                    "Something went wrong while uploading your files. Please try again.",
                ))
            }
        }
    }

    /// Deletes one file from a collection.
    pub async fn delete_file(
        &mut self,
        client: &MincaClient,
        filename: &str,
        collection: &str,
    ) -> Notification {
        match client.delete_file(collection, filename).await {
            Ok(()) => {
                tracing::info!(collection, filename, "file deleted");
                self.invalidate();
                Notification::success("File removed")
                    .with_description("The file has been successfully deleted from your uploads.")
            }
            Err(err) => {
                tracing::warn!(collection, filename, error = %err, "delete failed");
                Notification::error("Delete failed")
                    .with_description("Unable to remove the file. Please try again later.")
            }
        }
    }

    fn replace(&mut self, collections: Vec<Collection>) {
        self.listing = Some(
            collections
                .into_iter()
                .map(|collection| CollectionEntry {
                    collection,
                    expanded: true,
                })
                .collect(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KnowledgeBaseFile;
    use tokio::time::Instant;

    fn pdf(name: &str, size: usize) -> FileUpload {
        FileUpload::new(name, vec![0u8; size])
    }

    #[test]
    fn size_limit_is_inclusive() {
        assert!(accepts(&pdf("a.pdf", MAX_UPLOAD_BYTES as usize)));
        assert!(!accepts(&pdf("a.pdf", MAX_UPLOAD_BYTES as usize + 1)));
        assert!(!accepts(&FileUpload::new("a.docx", vec![0u8; 10])));
    }

    #[test]
    fn file_sizes() {
        assert_eq!(format_file_size(512), "512 bytes");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(10 * 1024 * 1024), "10.0 MB");
    }

    #[test]
    fn stage_requires_collection_name() {
        let mut queue = UploadQueue::new();
        let err = queue.stage("   ", vec![pdf("a.pdf", 10)]).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.user_message(), COLLECTION_REQUIRED);
        assert!(queue.is_empty());
    }

    #[test]
    fn stage_filters_and_replaces() {
        let mut queue = UploadQueue::new();
        assert_eq!(
            queue
                .stage("Home", vec![pdf("a.pdf", 10), FileUpload::new("b.png", vec![1])])
                .unwrap(),
            1
        );
        assert_eq!(queue.stage("Auto", vec![pdf("c.pdf", 10), pdf("d.pdf", 10)]).unwrap(), 2);
        assert_eq!(queue.collection(), "Auto");
        let names: Vec<_> = queue.uploads().iter().map(|u| u.file.name.as_str()).collect();
        assert_eq!(names, vec!["c.pdf", "d.pdf"]);
        assert!(queue.uploads().iter().all(|u| u.progress == 0));

        // Nothing acceptable: the list is left alone.
        assert_eq!(queue.stage("", vec![FileUpload::new("x.txt", vec![1])]).unwrap(), 0);
        assert_eq!(queue.uploads().len(), 2);
    }

    #[test]
    fn remove_by_id() {
        let mut queue = UploadQueue::new();
        queue.stage("Home", vec![pdf("a.pdf", 1), pdf("b.pdf", 1)]).unwrap();
        let id = queue.uploads()[0].id.clone();
        assert!(queue.remove(&id));
        assert!(!queue.remove(&id));
        assert_eq!(queue.uploads().len(), 1);
    }

    #[test]
    fn simulation_timeline() {
        let mut queue = UploadQueue::new();
        queue.stage("Home", vec![pdf("a.pdf", 1)]).unwrap();
        for tick in 1..=9 {
            queue.advance();
            assert_eq!(queue.uploads()[0].progress, tick * 10);
            assert_eq!(queue.uploads()[0].status, UploadStatus::Uploading);
        }
        queue.advance();
        assert_eq!(queue.uploads()[0].progress, 100);
        assert_eq!(queue.uploads()[0].status, UploadStatus::Processing);
        assert!(!queue.can_apply());
        for _ in 0..PROCESSING_TICKS - 1 {
            assert!(!queue.advance());
        }
        assert!(queue.advance());
        assert_eq!(queue.uploads()[0].status, UploadStatus::Success);
        assert!(queue.can_apply());
    }

    #[test]
    fn failed_files_do_not_block_apply() {
        let mut queue = UploadQueue::new();
        queue.stage("Home", vec![pdf("a.pdf", 1), pdf("b.pdf", 1)]).unwrap();
        queue.uploads[0].status = UploadStatus::Error;
        queue.uploads[1].status = UploadStatus::Success;
        assert!(!queue.is_simulating());
        assert!(queue.can_apply());
        assert!(!queue.advance());

        queue.uploads[1].status = UploadStatus::Processing;
        assert!(!queue.can_apply());
        assert_eq!(UploadStatus::Error.as_str(), "error");
    }

    #[tokio::test(start_paused = true)]
    async fn simulated_progress_takes_one_and_a_half_seconds() {
        let started = Instant::now();
        let mut queue = UploadQueue::new();
        queue.stage("Home", vec![pdf("a.pdf", 1), pdf("b.pdf", 1)]).unwrap();
        let mut updates = 0;
        queue
            .simulate_default(&CancellationToken::new(), |_| updates += 1)
            .await;
        assert_eq!(started.elapsed(), PROGRESS_TICK * 10 + PROCESSING_DELAY);
        assert_eq!(updates, 11);
        assert!(queue.can_apply());
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_simulation_stops() {
        let mut queue = UploadQueue::new();
        queue.stage("Home", vec![pdf("a.pdf", 1)]).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();
        queue.simulate_default(&cancel, |_| {}).await;
        assert_eq!(queue.uploads()[0].progress, 0);
    }

    #[test]
    fn toggle_collections() {
        let mut kb = KnowledgeBase::new();
        assert_eq!(kb.toggle_expanded("Home"), None);
        kb.replace(vec![Collection {
            collection: "Home".into(),
            files: vec![KnowledgeBaseFile {
                filename: "a.pdf".into(),
                last_modified: None,
            }],
        }]);
        assert_eq!(kb.toggle_expanded("Home"), Some(false));
        assert_eq!(kb.toggle_expanded("Home"), Some(true));
        assert_eq!(kb.toggle_expanded("Auto"), None);
        kb.invalidate();
        assert_eq!(kb.toggle_expanded("Home"), None);
    }

    #[tokio::test]
    async fn apply_is_gated() {
        let client = MincaClient::new(&crate::config::ClientConfig::new()).unwrap();
        let mut kb = KnowledgeBase::new();
        let mut queue = UploadQueue::new();
        assert!(kb.apply(&client, &mut queue).await.is_none());
        queue.stage("Home", vec![pdf("a.pdf", 1)]).unwrap();
        assert!(kb.apply(&client, &mut queue).await.is_none());
    }
}
