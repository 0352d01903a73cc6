use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::progress::progress_stream;
use crate::config::BackendConfig;
use crate::domain::{
    AskOutcome, AskResponse, DomainError, KnowledgeBaseBackend, KnowledgeBaseListResponse,
    KnowledgeBaseName, ProgressCallback, StatusResponse, UploadRequest,
};

/// Error body of a non-2xx response. The backend uses `message`; framework
/// level errors carry `detail` instead.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.message.or_else(|| {
            self.detail.map(|d| match d {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
        })
    }
}

/// Knowledge base backend reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self, DomainError> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, DomainError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            DomainError::configuration(format!("Failed to build HTTP client: {}", e))
        })?;

        let base_url = Url::parse(base_url).map_err(|e| {
            DomainError::configuration(format!("Invalid backend URL '{}': {}", base_url, e))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(DomainError::configuration(format!(
                "Backend URL '{}' cannot be used as a base",
                base_url
            )));
        }

        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, DomainError> {
        Self::with_timeout(&config.base_url, config.timeout())
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, DomainError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| DomainError::configuration("Backend URL cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, DomainError> {
        request
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("Request failed: {}", e)))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, DomainError> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| DomainError::transport(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::into_message);
            return Err(DomainError::http(status.as_u16(), message));
        }

        serde_json::from_slice(&body)
            .map_err(|e| DomainError::malformed(format!("Failed to parse response: {}", e)))
    }
}

#[async_trait]
impl KnowledgeBaseBackend for HttpBackend {
    async fn list_knowledge_bases(&self) -> Result<Vec<KnowledgeBaseName>, DomainError> {
        let url = self.endpoint(&["knowledge_bases"])?;
        debug!(%url, "GET knowledge bases");

        let response = self.send(self.client.get(url)).await?;
        Self::read_json::<KnowledgeBaseListResponse>(response)
            .await?
            .into_result()
    }

    async fn create_knowledge_base(
        &self,
        name: &KnowledgeBaseName,
    ) -> Result<Option<String>, DomainError> {
        let url = self.endpoint(&["create_kb"])?;
        debug!(%url, knowledge_base = %name, "POST create knowledge base");

        let response = self
            .send(self.client.post(url).json(&json!({ "name": name })))
            .await?;
        Self::read_json::<StatusResponse>(response)
            .await?
            .into_result()
    }

    async fn delete_knowledge_base(
        &self,
        name: &KnowledgeBaseName,
    ) -> Result<Option<String>, DomainError> {
        let url = self.endpoint(&["delete_kb", name.as_str()])?;
        debug!(%url, "DELETE knowledge base");

        let response = self.send(self.client.delete(url)).await?;
        Self::read_json::<StatusResponse>(response)
            .await?
            .into_result()
    }

    async fn ask(&self, question: &str, knowledge_base: &str) -> Result<AskOutcome, DomainError> {
        let url = self.endpoint(&["ask", ""])?;
        debug!(%url, knowledge_base, "GET ask");

        let response = self
            .send(
                self.client
                    .get(url)
                    .query(&[("question", question), ("kb", knowledge_base)]),
            )
            .await?;
        Ok(Self::read_json::<AskResponse>(response).await?.into())
    }

    async fn upload_pdf(
        &self,
        request: UploadRequest,
        on_progress: ProgressCallback,
    ) -> Result<Option<String>, DomainError> {
        let url = self.endpoint(&["upload_pdf", ""])?;
        let length = request.content.len() as u64;
        debug!(%url, file = %request.file_name, length, "POST upload PDF");

        let body = reqwest::Body::wrap_stream(progress_stream(request.content, on_progress));
        let file = Part::stream_with_length(body, length)
            .file_name(request.file_name)
            .mime_str(&request.mime)
            .map_err(|e| DomainError::validation(format!("Invalid MIME type: {}", e)))?;

        let form = Form::new()
            .part("file", file)
            .text("knowledge_base_name", request.knowledge_base.to_string());

        let response = self.send(self.client.post(url).multipart(form)).await?;
        Self::read_json::<StatusResponse>(response)
            .await?
            .into_result()
    }
}
