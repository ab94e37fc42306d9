// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod resources;

pub use resources::*;

use anyhow::{Context, Result, bail};
use deskfleet_app::ApiError;
use reqwest::Method;
use reqwest::blocking::Client as HttpClient;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Query parameters in insertion order. Absent and empty values are skipped
/// when the URL is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(&'static str, Option<String>)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &'static str, value: impl ToString) -> Self {
        self.0.push((key, Some(value.to_string())));
        self
    }

    pub fn maybe<V: ToString>(mut self, key: &'static str, value: Option<V>) -> Self {
        self.0.push((key, value.map(|value| value.to_string())));
        self
    }

    fn defined(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().filter_map(|(key, value)| {
            value
                .as_deref()
                .filter(|value| !value.is_empty())
                .map(|value| (*key, value))
        })
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("api.base_url must not be empty");
        }
        let parsed = Url::parse(&base_url)
            .with_context(|| format!("api.base_url {base_url:?} is not a valid URL"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "api.base_url {base_url:?} must use http or https, got {}",
                parsed.scheme()
            );
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Appends `segments` to the base path, percent-encoding each one.
    pub fn url_for(&self, segments: &[&str], params: &Params) -> Result<Url, ApiError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|error| ApiError::network(&self.base_url, error))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::network(&self.base_url, "base url cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        let mut defined = params.defined().peekable();
        if defined.peek().is_some() {
            url.query_pairs_mut().extend_pairs(defined);
        }
        Ok(url)
    }

    /// Performs one exchange. Returns `None` for 204 and for bodies that are
    /// empty or fail to parse; non-2xx statuses become an [`ApiError`].
    pub fn request<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        params: &Params,
        body: Option<&B>,
    ) -> Result<Option<Value>, ApiError> {
        let url = self.url_for(segments, params)?;
        debug!(%method, %url, "api request");

        let mut builder = self.http.request(method.clone(), url.clone());
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder
            .send()
            .map_err(|error| ApiError::network(&self.base_url, error))?;

        let status = response.status();
        debug!(%method, %url, status = status.as_u16(), "api response");
        if status == reqwest::StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.to_ascii_lowercase().contains("json"));
        let text = response.text().unwrap_or_default();
        let payload = if text.trim().is_empty() {
            None
        } else if is_json {
            serde_json::from_str::<Value>(&text).ok()
        } else {
            Some(Value::String(text))
        };

        if !status.is_success() {
            return Err(ApiError::from_response(
                status.as_u16(),
                &status.to_string(),
                payload.as_ref(),
            ));
        }
        Ok(payload)
    }

    pub fn get(&self, segments: &[&str], params: &Params) -> Result<Option<Value>, ApiError> {
        self.request::<Value>(Method::GET, segments, params, None)
    }

    pub fn post<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<Option<Value>, ApiError> {
        self.request(Method::POST, segments, &Params::new(), Some(body))
    }

    pub fn put<B: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<Option<Value>, ApiError> {
        self.request(Method::PUT, segments, &Params::new(), Some(body))
    }

    pub fn delete(&self, segments: &[&str]) -> Result<Option<Value>, ApiError> {
        self.request::<Value>(Method::DELETE, segments, &Params::new(), None)
    }

    /// Cheap reachability probe used by `--check`.
    pub fn ping(&self) -> Result<()> {
        self.sync()
            .status()
            .map(|_| ())
            .with_context(|| format!("ping {}", self.base_url))
    }

    pub fn employees(&self) -> Employees<'_> {
        Employees { client: self }
    }

    pub fn computers(&self) -> Computers<'_> {
        Computers { client: self }
    }

    pub fn summaries(&self) -> Summaries<'_> {
        Summaries { client: self }
    }

    pub fn assignments(&self) -> Assignments<'_> {
        Assignments { client: self }
    }

    pub fn sync(&self) -> SyncStatuses<'_> {
        SyncStatuses { client: self }
    }
}

pub(crate) fn decode<T: DeserializeOwned>(
    payload: Option<Value>,
    context: &str,
) -> Result<T, ApiError> {
    let value = payload.ok_or_else(|| ApiError::decode(context, "empty response body"))?;
    serde_json::from_value(value).map_err(|error| ApiError::decode(context, error))
}

pub(crate) fn decode_optional<T: DeserializeOwned>(
    payload: Option<Value>,
    context: &str,
) -> Result<Option<T>, ApiError> {
    match payload {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(|error| ApiError::decode(context, error)),
    }
}
