//! Files staged for the next message.

use crate::types::FileUpload;

/// Extensions the internal assistants accept.
pub const ASSISTANT_EXTENSIONS: &[&str] = &[".pdf", ".doc", ".docx"];

/// Identity of a staged file, stable while it stays staged.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct StagedId(u64);

/// Files waiting to be sent with the next message.
///
/// Staged files have no progress of their own; they travel as `files` parts of
/// the send request and are cleared once it is issued.
#[derive(Debug, Clone, Default)]
pub struct AttachmentStaging {
    files: Vec<(StagedId, FileUpload)>,
    allowed_extensions: Option<&'static [&'static str]>,
    next_id: u64,
}

impl AttachmentStaging {
    /// Staging that accepts any file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Staging limited to the given lowercase extensions (with the dot).
    pub fn with_allowed_extensions(extensions: &'static [&'static str]) -> Self {
        Self {
            allowed_extensions: Some(extensions),
            ..Self::default()
        }
    }

    /// Whether `file` passes the extension allow-list.
    pub fn accepts(&self, file: &FileUpload) -> bool {
        match self.allowed_extensions {
            None => true,
            Some(allowed) => file
                .extension()
                .is_some_and(|ext| allowed.contains(&ext.as_str())),
        }
    }

    /// Stages `file`, or returns `None` if the allow-list rejects it.
    pub fn add(&mut self, file: FileUpload) -> Option<StagedId> {
        if !self.accepts(&file) {
            tracing::debug!(name = %file.name, "attachment rejected by allow-list");
            return None;
        }
        let id = StagedId(self.next_id);
        self.next_id += 1;
        self.files.push((id, file));
        Some(id)
    }

    /// Unstages one file.
    pub fn remove(&mut self, id: StagedId) -> Option<FileUpload> {
        let index = self.files.iter().position(|(staged, _)| *staged == id)?;
        Some(self.files.remove(index).1)
    }

    /// Id of the file at `index` in staging order.
    pub fn id_at(&self, index: usize) -> Option<StagedId> {
        self.files.get(index).map(|(id, _)| *id)
    }

    /// Removes and returns every staged file.
    pub fn take(&mut self) -> Vec<FileUpload> {
        std::mem::take(&mut self.files)
            .into_iter()
            .map(|(_, file)| file)
            .collect()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (StagedId, &FileUpload)> {
        self.files.iter().map(|(id, file)| (*id, file))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> FileUpload {
        FileUpload::new(name, b"data".to_vec())
    }

    #[test]
    fn allow_list_filters_by_extension() {
        let mut staging = AttachmentStaging::with_allowed_extensions(ASSISTANT_EXTENSIONS);
        assert!(staging.add(file("policy.PDF")).is_some());
        assert!(staging.add(file("claim.docx")).is_some());
        assert!(staging.add(file("photo.png")).is_none());
        assert!(staging.add(file("README")).is_none());
        assert_eq!(staging.len(), 2);
    }

    #[test]
    fn widget_staging_accepts_anything() {
        let mut staging = AttachmentStaging::new();
        assert!(staging.add(file("photo.png")).is_some());
        assert!(staging.add(file("noext")).is_some());
    }

    #[test]
    fn remove_by_identity() {
        let mut staging = AttachmentStaging::new();
        let a = staging.add(file("a.pdf")).unwrap();
        let b = staging.add(file("a.pdf")).unwrap();
        assert_ne!(a, b);
        assert_eq!(staging.remove(a).map(|f| f.name), Some("a.pdf".to_string()));
        assert!(staging.remove(a).is_none());
        assert_eq!(staging.id_at(0), Some(b));
    }

    #[test]
    fn take_clears() {
        let mut staging = AttachmentStaging::new();
        staging.add(file("a.pdf"));
        staging.add(file("b.pdf"));
        let taken = staging.take();
        assert_eq!(taken.len(), 2);
        assert!(staging.is_empty());
    }
}
