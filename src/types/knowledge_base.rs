use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A document stored in a knowledge-base collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KnowledgeBaseFile {
    pub filename: String,

    #[serde(rename = "lastModified", default, with = "crate::utils::time::option")]
    pub last_modified: Option<OffsetDateTime>,
}

/// A named group of knowledge-base documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Collection {
    pub collection: String,

    #[serde(default)]
    pub files: Vec<KnowledgeBaseFile>,
}
