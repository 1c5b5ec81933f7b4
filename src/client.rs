use crate::error::{Result, ScrapeError};
use crate::form::FormPayload;
use async_trait::async_trait;
use bytes::Bytes;
use encoding_rs::{Encoding, UTF_8};
use mime::Mime;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use std::{borrow::Cow, time::Duration};

/// Status, declared content type and raw body of a finished request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Body decoded with the `charset` of the content type, UTF-8 otherwise.
    pub fn text(&self) -> Cow<'_, str> {
        let encoding = self
            .content_type
            .as_deref()
            .and_then(|ct| ct.parse::<Mime>().ok())
            .and_then(|parsed| parsed.get_param(mime::CHARSET).map(|c| c.as_str().to_string()))
            .and_then(|label| Encoding::for_label(label.as_bytes()))
            .unwrap_or(UTF_8);
        let (text, _, _) = encoding.decode(&self.body);
        text
    }
}

/// A url-encoded form submission.
#[derive(Debug, Clone, Copy)]
pub struct FormPost<'a> {
    pub url: &'a str,
    pub headers: &'a [(String, String)],
    pub query: &'a [(String, String)],
    pub payload: &'a FormPayload,
    pub timeout: Duration,
}

/// Transport used by the scraper. Only transport failures are errors here;
/// judging the status code is left to the caller.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse>;

    async fn post_form(&self, request: FormPost<'_>) -> Result<HttpResponse>;
}

#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|source| ScrapeError::Transport {
                url: String::new(),
                source,
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str, timeout: Duration) -> Result<HttpResponse> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|source| transport(url, source))?;
        read(url, response).await
    }

    async fn post_form(&self, request: FormPost<'_>) -> Result<HttpResponse> {
        let response = self
            .client
            .post(request.url)
            .headers(header_map(request.headers)?)
            .query(request.query)
            .form(request.payload)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(|source| transport(request.url, source))?;
        read(request.url, response).await
    }
}

async fn read(url: &str, response: reqwest::Response) -> Result<HttpResponse> {
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = response
        .bytes()
        .await
        .map_err(|source| transport(url, source))?;
    Ok(HttpResponse {
        status,
        content_type,
        body,
    })
}

fn transport(url: &str, source: reqwest::Error) -> ScrapeError {
    ScrapeError::Transport {
        url: url.to_string(),
        source,
    }
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ScrapeError::InvalidHeader(name.clone()))?;
        let value =
            HeaderValue::from_str(value).map_err(|_| ScrapeError::InvalidHeader(value.clone()))?;
        map.insert(name, value);
    }
    Ok(map)
}
