use serde::{Deserialize, Serialize};

// ─── step 1: files.getUploadURLExternal ──────────────────────────────

/// Form sent to allocate an upload slot. `filename` is the commit SHA.
#[derive(Debug, Clone, Serialize)]
pub struct SlackGetUploadUrlRequest {
    pub filename: String,
    /// Artifact size in bytes.
    pub length: u64,
}

/// Allocation returned by step 1. `upload_url` and `file_id` are only
/// meaningful when `ok` is true.
#[derive(Debug, Clone, Deserialize)]
pub struct SlackGetUploadUrlResponse {
    pub ok: bool,
    pub error: Option<String>,
    pub upload_url: Option<String>,
    pub file_id: Option<String>,
}

// ─── step 3: files.completeUploadExternal ────────────────────────────

/// Form sent to finalize an upload.
///
/// Both fields are strings on the wire: `files` is a JSON-encoded array
/// and `channels` a comma-joined list of channel IDs.
#[derive(Debug, Clone, Serialize)]
pub struct SlackCompleteUploadRequest {
    pub files: String,
    pub channels: String,
}

impl SlackCompleteUploadRequest {
    pub fn new(
        files: &[SlackFileReference],
        channels: impl Into<String>,
    ) -> serde_json::Result<Self> {
        Ok(Self {
            files: serde_json::to_string(files)?,
            channels: channels.into(),
        })
    }
}

/// One entry of the `files` array: the allocated ID and its display title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackFileReference {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SlackCompleteUploadResponse {
    pub ok: bool,
    pub error: Option<String>,
    #[serde(default)]
    pub files: Vec<SlackSharedFile>,
}

impl SlackCompleteUploadResponse {
    /// IDs of the files Slack reports as shared, joined with commas.
    pub fn shared_ids(&self) -> String {
        self.files
            .iter()
            .map(|f| f.id.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// File entry echoed back by step 3; only the ID is read.
#[derive(Debug, Clone, Deserialize)]
pub struct SlackSharedFile {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_upload_url_request_encodes_as_form() {
        let req = SlackGetUploadUrlRequest {
            filename: "abc123".into(),
            length: 1024,
        };
        let body = serde_urlencoded::to_string(&req).unwrap();
        assert_eq!(body, "filename=abc123&length=1024");
    }

    #[test]
    fn get_upload_url_response_deserializes() {
        let json = r#"{"ok":true,"upload_url":"https://files.slack.com/upload/v1/ABC123","file_id":"F123ABC"}"#;
        let resp: SlackGetUploadUrlResponse = serde_json::from_str(json).unwrap();
        assert!(resp.ok);
        assert_eq!(
            resp.upload_url.as_deref(),
            Some("https://files.slack.com/upload/v1/ABC123")
        );
        assert_eq!(resp.file_id.as_deref(), Some("F123ABC"));
    }

    #[test]
    fn response_without_ok_is_rejected_by_parser() {
        let json = r#"{"upload_url":"https://files.slack.com/x","file_id":"F1"}"#;
        assert!(serde_json::from_str::<SlackGetUploadUrlResponse>(json).is_err());
    }

    #[test]
    fn complete_upload_request_encodes_files_as_json_string() {
        let req = SlackCompleteUploadRequest::new(
            &[SlackFileReference {
                id: "F123".into(),
                title: "fix bug[myrepo]".into(),
            }],
            "c123,c456",
        )
        .unwrap();
        assert_eq!(req.files, r#"[{"id":"F123","title":"fix bug[myrepo]"}]"#);

        let body = serde_urlencoded::to_string(&req).unwrap();
        assert!(body.contains("channels=c123%2Cc456"));
        assert!(body.starts_with("files="));
    }

    #[test]
    fn complete_upload_response_deserializes_error() {
        let json = r#"{"ok":false,"error":"not_in_channel"}"#;
        let resp: SlackCompleteUploadResponse = serde_json::from_str(json).unwrap();
        assert!(!resp.ok);
        assert_eq!(resp.error.as_deref(), Some("not_in_channel"));
        assert!(resp.files.is_empty());
    }

    #[test]
    fn complete_upload_response_lists_shared_ids() {
        let json = r#"{"ok":true,"files":[{"id":"F1","title":"a[r]"},{"id":"F2","title":"b[r]"}]}"#;
        let resp: SlackCompleteUploadResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.shared_ids(), "F1,F2");
    }
}
