use crate::client::{Access, MincaClient, multipart_form};
use crate::error::{Error, Result};
use crate::types::{Collection, FileUpload};

impl MincaClient {
    /// `GET /knowledge-base/files`: every collection with its files.
    pub async fn list_collections(&self) -> Result<Vec<Collection>> {
        self.get_json(Access::Authenticated, &["knowledge-base", "files"])
            .await
    }

    /// `POST /knowledge-base/collection/:name/files`: one batched upload.
    pub async fn upload_files(&self, collection: &str, files: &[FileUpload]) -> Result<()> {
        if collection.trim().is_empty() {
            return Err(Error::validation(
                "collection name must not be empty",
                Some("collection".to_string()),
            ));
        }
        let form = multipart_form(&[], files)?;
        self.post_multipart_unit(
            Access::Authenticated,
            &["knowledge-base", "collection", collection, "files"],
            form,
        )
        .await
    }

    /// `DELETE /knowledge-base/collection/:name/files/:filename`
    pub async fn delete_file(&self, collection: &str, filename: &str) -> Result<()> {
        self.delete(
            Access::Authenticated,
            &["knowledge-base", "collection", collection, "files", filename],
        )
        .await
    }
}
