use std::future::Future;
use std::path::Path;

use lolslack_core::{Credentials, UploadTarget};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use tracing::{debug, instrument, warn};

use crate::config::SlackConfig;
use crate::error::{SlackError, StepFailure};
use crate::types::{
    SlackCompleteUploadRequest, SlackCompleteUploadResponse, SlackFileReference,
    SlackGetUploadUrlRequest, SlackGetUploadUrlResponse,
};

/// Attempts made per step before the step is considered permanently failed.
pub const RETRY_COUNT: u32 = 2;

const GET_UPLOAD_URL: &str = "files.getUploadURLExternal";
const COMPLETE_UPLOAD: &str = "files.completeUploadExternal";

/// Where an [`UploadSession`] is in the handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStep {
    RequestingUrl,
    Uploading,
    Completing,
    Done,
    Failed,
}

impl UploadStep {
    /// 1-based step number used in log records; 0 for terminal states.
    pub fn number(self) -> u8 {
        match self {
            Self::RequestingUrl => 1,
            Self::Uploading => 2,
            Self::Completing => 3,
            Self::Done | Self::Failed => 0,
        }
    }
}

impl std::fmt::Display for UploadStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::RequestingUrl => "requesting upload url",
            Self::Uploading => "uploading",
            Self::Completing => "completing",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Upload URL and file ID handed out by step 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadAllocation {
    pub upload_url: String,
    pub file_id: String,
}

/// One upload attempt of one artifact.
///
/// Runs the Slack external upload handshake:
/// 1. `files.getUploadURLExternal`: allocate a presigned upload URL
/// 2. POST the artifact bytes to that URL
/// 3. `files.completeUploadExternal`: finalize and share to the channels
///
/// Each step is retried on its own, immediately, up to [`RETRY_COUNT`]
/// attempts. The first step to exhaust its budget ends the session; later
/// steps are not attempted and nothing already allocated is rolled back.
/// A session is never reused: each artifact gets a fresh handshake.
pub struct UploadSession<'a> {
    client: &'a Client,
    config: &'a SlackConfig,
    target: &'a UploadTarget,
    credentials: &'a Credentials,
    allocation: Option<UploadAllocation>,
    step: UploadStep,
}

impl<'a> UploadSession<'a> {
    pub fn new(
        client: &'a Client,
        config: &'a SlackConfig,
        target: &'a UploadTarget,
        credentials: &'a Credentials,
    ) -> Self {
        Self {
            client,
            config,
            target,
            credentials,
            allocation: None,
            step: UploadStep::RequestingUrl,
        }
    }

    pub fn step(&self) -> UploadStep {
        self.step
    }

    /// The allocation from step 1, once it has succeeded.
    pub fn allocation(&self) -> Option<&UploadAllocation> {
        self.allocation.as_ref()
    }

    /// Drive all three steps in order.
    ///
    /// Returns the allocation that was shared, or the failure of the first
    /// step that ran out of attempts.
    #[instrument(skip(self), fields(sha = %self.target.sha))]
    pub async fn run(&mut self) -> Result<UploadAllocation, StepFailure> {
        let result = self.drive().await;
        self.step = if result.is_ok() {
            UploadStep::Done
        } else {
            UploadStep::Failed
        };
        result
    }

    async fn drive(&mut self) -> Result<UploadAllocation, StepFailure> {
        self.step = UploadStep::RequestingUrl;
        let this = &*self;
        let allocation = retry_step(UploadStep::RequestingUrl, move || {
            this.request_upload_url()
        })
        .await?;
        self.allocation = Some(allocation.clone());

        self.step = UploadStep::Uploading;
        let this = &*self;
        let upload_url = allocation.upload_url.as_str();
        retry_step(UploadStep::Uploading, move || this.upload_bytes(upload_url)).await?;

        self.step = UploadStep::Completing;
        let this = &*self;
        let file_id = allocation.file_id.as_str();
        retry_step(UploadStep::Completing, move || this.complete_upload(file_id)).await?;

        Ok(allocation)
    }

    /// Step 1: ask Slack for a presigned upload URL sized for the artifact.
    ///
    /// The artifact's SHA is used as the remote filename.
    pub async fn request_upload_url(&self) -> Result<UploadAllocation, SlackError> {
        let path = self.target.artifact_path();
        let length = tokio::fs::metadata(path)
            .await
            .map_err(|source| SlackError::Artifact {
                path: path.to_path_buf(),
                source,
            })?
            .len();

        let request = SlackGetUploadUrlRequest {
            filename: self.target.sha.clone(),
            length,
        };

        let response = self
            .client
            .post(self.config.api_url(GET_UPLOAD_URL))
            .bearer_auth(&self.credentials.access_token)
            .form(&request)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        debug!(step = 1, method = GET_UPLOAD_URL, response = %body, "slack responded");

        let resp: SlackGetUploadUrlResponse = serde_json::from_str(&body)
            .map_err(|e| SlackError::protocol(GET_UPLOAD_URL, e.to_string()))?;

        if !resp.ok {
            return Err(SlackError::rejected(GET_UPLOAD_URL, resp.error));
        }

        let upload_url = non_empty(resp.upload_url)
            .ok_or_else(|| SlackError::protocol(GET_UPLOAD_URL, "missing upload_url"))?;
        let file_id = non_empty(resp.file_id)
            .ok_or_else(|| SlackError::protocol(GET_UPLOAD_URL, "missing file_id"))?;

        Ok(UploadAllocation {
            upload_url,
            file_id,
        })
    }

    /// Step 2: POST the artifact bytes to the presigned URL.
    ///
    /// No authorization header is sent; the URL itself grants access.
    pub async fn upload_bytes(&self, upload_url: &str) -> Result<(), SlackError> {
        let path = self.target.artifact_path();
        let data = tokio::fs::read(path)
            .await
            .map_err(|source| SlackError::Artifact {
                path: path.to_path_buf(),
                source,
            })?;

        let file_name = path.file_name().map_or_else(
            || self.target.sha.clone(),
            |name| name.to_string_lossy().into_owned(),
        );
        let part = Part::bytes(data)
            .file_name(file_name)
            .mime_str(mime_type(path))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(upload_url)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        let status = response.status();
        match response.text().await {
            Ok(body) => {
                debug!(step = 2, status = %status, response = %body, "artifact bytes uploaded");
            }
            Err(e) => {
                debug!(
                    step = 2,
                    status = %status,
                    error = %e,
                    "artifact bytes uploaded, body unreadable"
                );
            }
        }
        Ok(())
    }

    /// Step 3: finalize the upload and share it to every configured channel.
    pub async fn complete_upload(&self, file_id: &str) -> Result<(), SlackError> {
        let request = SlackCompleteUploadRequest::new(
            &[SlackFileReference {
                id: file_id.to_owned(),
                title: self.target.title(),
            }],
            self.credentials.joined_channels(),
        )
        .map_err(|e| SlackError::protocol(COMPLETE_UPLOAD, e.to_string()))?;

        let response = self
            .client
            .post(self.config.api_url(COMPLETE_UPLOAD))
            .bearer_auth(&self.credentials.access_token)
            .form(&request)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        debug!(step = 3, method = COMPLETE_UPLOAD, response = %body, "slack responded");

        let resp: SlackCompleteUploadResponse = serde_json::from_str(&body)
            .map_err(|e| SlackError::protocol(COMPLETE_UPLOAD, e.to_string()))?;

        if !resp.ok {
            return Err(SlackError::rejected(COMPLETE_UPLOAD, resp.error));
        }

        debug!(
            file_id = %file_id,
            shared = %resp.shared_ids(),
            "file upload completed"
        );
        Ok(())
    }
}

/// Run one step until it succeeds or [`RETRY_COUNT`] attempts have failed.
///
/// Retries are immediate and repeat the identical request.
async fn retry_step<T, F, Fut>(step: UploadStep, mut attempt_step: F) -> Result<T, StepFailure>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SlackError>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match attempt_step().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt < RETRY_COUNT => {
                warn!(
                    step = step.number(),
                    attempt,
                    error = %error,
                    "upload step failed, retrying"
                );
            }
            Err(source) => {
                warn!(
                    step = step.number(),
                    attempt,
                    error = %source,
                    "upload step failed, no attempts left"
                );
                return Err(StepFailure {
                    step,
                    attempts: attempt,
                    source,
                });
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("mp4") => "video/mp4",
        _ => "application/octet-stream",
    }
}
