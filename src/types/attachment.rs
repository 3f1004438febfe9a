use serde::{Deserialize, Serialize};

/// A file attached to a message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attachment {
    /// Attachment identifier; `temp-<index>-<millis>` until the server assigns one.
    pub id: String,

    /// Original file name.
    pub name: String,

    /// MIME type as reported for the file.
    pub mime: String,

    /// Size in bytes.
    pub size: u64,

    /// Coarse kind derived from the MIME type (`image`, `application`, ...).
    #[serde(rename = "type")]
    pub kind: String,
}

impl Attachment {
    /// Derives the coarse attachment kind from a MIME type.
    ///
    /// The kind is the MIME major type, or `document` when the MIME type is empty.
    pub fn kind_for_mime(mime: &str) -> String {
        match mime.split('/').next() {
            Some(major) if !major.is_empty() => major.to_string(),
            _ => "document".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_from_mime() {
        assert_eq!(Attachment::kind_for_mime("application/pdf"), "application");
        assert_eq!(Attachment::kind_for_mime("image/png"), "image");
        assert_eq!(Attachment::kind_for_mime(""), "document");
    }
}
