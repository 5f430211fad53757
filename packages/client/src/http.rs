use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use common::config::ApiAppConfig;
use common::validation::Validate;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::Instrument;

use crate::error::ClientError;
use crate::request::PendingRequest;
use crate::services::{
    ApplicationService, AuthService, AwardPartService, AwardService, JournalistService,
    ProjectService, ReferenceService, ScoreService,
};

/// Handle to the award-program API. Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Arc<str>,
    token: Option<Arc<str>>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    pub fn from_config(config: &ApiAppConfig) -> Result<Self, ClientError> {
        Self::with_timeout(&config.base_url, Duration::from_secs(config.timeout_secs))
    }

    fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: Arc::from(base_url.trim_end_matches('/')),
            token: None,
            http,
        })
    }

    /// A client that sends `Authorization: Bearer <token>` on every call.
    pub fn with_token(&self, token: impl AsRef<str>) -> Self {
        Self {
            token: Some(Arc::from(token.as_ref())),
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    // ─── Services ─────────────────────────────────────────────────────────

    pub fn auth(&self) -> AuthService {
        AuthService::new(self.clone())
    }

    pub fn awards(&self) -> AwardService {
        AwardService::new(self.clone())
    }

    pub fn award_parts(&self) -> AwardPartService {
        AwardPartService::new(self.clone())
    }

    pub fn applications(&self) -> ApplicationService {
        ApplicationService::new(self.clone())
    }

    pub fn scores(&self) -> ScoreService {
        ScoreService::new(self.clone())
    }

    pub fn journalists(&self) -> JournalistService {
        JournalistService::new(self.clone())
    }

    pub fn projects(&self) -> ProjectService {
        ProjectService::new(self.clone())
    }

    pub fn reference<R: common::models::ReferenceRecord>(&self) -> ReferenceService<R> {
        ReferenceService::new(self.clone())
    }

    // ─── Request plumbing ─────────────────────────────────────────────────

    fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) fn get<T>(&self, path: &str) -> PendingRequest<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.send(Method::GET, path, self.builder(Method::GET, path))
    }

    pub(crate) fn get_query<T, Q>(&self, path: &str, query: &Q) -> PendingRequest<T>
    where
        T: DeserializeOwned + Send + 'static,
        Q: Serialize + ?Sized,
    {
        let builder = self.builder(Method::GET, path).query(query);
        self.send(Method::GET, path, builder)
    }

    /// GET with pagination parameters plus a resource-specific filter.
    pub(crate) fn get_filtered<T, Q, F>(&self, path: &str, query: &Q, filter: &F) -> PendingRequest<T>
    where
        T: DeserializeOwned + Send + 'static,
        Q: Serialize + ?Sized,
        F: Serialize + ?Sized,
    {
        let builder = self.builder(Method::GET, path).query(query).query(filter);
        self.send(Method::GET, path, builder)
    }

    pub(crate) fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> PendingRequest<T>
    where
        T: DeserializeOwned + Send + 'static,
        B: Serialize + ?Sized,
    {
        let builder = self.builder(method.clone(), path).json(body);
        self.send(method, path, builder)
    }

    /// Like `send_json`, but the form is validated first and nothing is sent if it fails.
    pub(crate) fn send_form<T, F>(&self, method: Method, path: &str, form: &F) -> PendingRequest<T>
    where
        T: DeserializeOwned + Send + 'static,
        F: Serialize + Validate + ?Sized,
    {
        Self::validated(form, || self.send_json(method, path, form))
    }

    /// Build the request with `request` only when `form` passes validation;
    /// otherwise resolve at once with the field errors.
    pub(crate) fn validated<T, F>(form: &F, request: impl FnOnce() -> PendingRequest<T>) -> PendingRequest<T>
    where
        T: Send + 'static,
        F: Validate + ?Sized,
    {
        match form.validate() {
            Ok(()) => request(),
            Err(errors) => PendingRequest::ready(Err(ClientError::Validation(errors))),
        }
    }

    pub(crate) fn delete(&self, path: &str) -> PendingRequest<()> {
        let builder = self.builder(Method::DELETE, path);
        self.send_empty(Method::DELETE, path, builder)
    }

    pub(crate) fn post_empty<B>(&self, path: &str, body: &B) -> PendingRequest<()>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.builder(Method::POST, path).json(body);
        self.send_empty(Method::POST, path, builder)
    }

    pub(crate) fn send_upload<T>(&self, method: Method, path: &str, upload: Upload) -> PendingRequest<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let builder = self.builder(method.clone(), path);
        let span = tracing::debug_span!("api", method = %method, path = %path);
        let base_url = self.base_url.clone();
        PendingRequest::new(
            async move {
                let form = upload.into_form().await?;
                let response = builder
                    .multipart(form)
                    .send()
                    .await
                    .map_err(|e| transport_error(e, &base_url))?;
                decode(response).await
            }
            .instrument(span),
        )
    }

    fn send<T>(&self, method: Method, path: &str, builder: RequestBuilder) -> PendingRequest<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let span = tracing::debug_span!("api", method = %method, path = %path);
        let base_url = self.base_url.clone();
        PendingRequest::new(
            async move {
                let response = builder
                    .send()
                    .await
                    .map_err(|e| transport_error(e, &base_url))?;
                decode(response).await
            }
            .instrument(span),
        )
    }

    fn send_empty(&self, method: Method, path: &str, builder: RequestBuilder) -> PendingRequest<()> {
        let span = tracing::debug_span!("api", method = %method, path = %path);
        let base_url = self.base_url.clone();
        PendingRequest::new(
            async move {
                let response = builder
                    .send()
                    .await
                    .map_err(|e| transport_error(e, &base_url))?;
                let status = response.status();
                if status.is_success() {
                    tracing::debug!(status = status.as_u16(), "request completed");
                    return Ok(());
                }
                let body = response.bytes().await?;
                Err(failure(status.as_u16(), &body))
            }
            .instrument(span),
        )
    }
}

fn transport_error(err: reqwest::Error, base_url: &str) -> ClientError {
    if err.is_connect() {
        tracing::warn!("API not reachable at {}: {}", base_url, err);
        ClientError::NotReachable(base_url.to_string())
    } else {
        ClientError::Transport(err)
    }
}

fn failure(status: u16, body: &[u8]) -> ClientError {
    let err = ClientError::from_response(status, body);
    if status >= 500 {
        tracing::error!(status, "request failed: {}", err);
    } else {
        tracing::warn!(status, "request rejected: {}", err);
    }
    err
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        return Err(failure(status.as_u16(), &body));
    }
    tracing::debug!(status = status.as_u16(), bytes = body.len(), "request completed");
    let body: &[u8] = if body.is_empty() { b"null" } else { &body };
    serde_json::from_slice(body).map_err(|e| ClientError::Decode(e.to_string()))
}

/// A multipart body whose files are read when the request runs.
#[derive(Debug, Default, Clone)]
pub(crate) struct Upload {
    fields: Vec<(String, String)>,
    files: Vec<(String, PathBuf)>,
}

impl Upload {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    pub(crate) fn text_opt(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) if !value.trim().is_empty() => self.text(name, value),
            _ => self,
        }
    }

    pub(crate) fn file(mut self, name: &str, path: PathBuf) -> Self {
        self.files.push((name.to_string(), path));
        self
    }

    async fn into_form(self) -> Result<Form, ClientError> {
        let mut form = Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }
        for (name, path) in self.files {
            let bytes = tokio::fs::read(&path).await?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            let part = Part::bytes(bytes)
                .file_name(file_name)
                .mime_str(mime.as_ref())?;
            form = form.part(name, part);
        }
        Ok(form)
    }
}
