// Shared test doubles: a recording HTTP client and a captured log writer.
#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use pact_export::{FormPost, HttpClient, HttpResponse, Result};
use std::{
    collections::VecDeque,
    io::{self, Write},
    sync::{Arc, Mutex},
    time::Duration,
};
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

/// Request captured by [`FakeClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Get {
        url: String,
    },
    Post {
        url: String,
        query: Vec<(String, String)>,
        fields: Vec<(String, Option<String>)>,
    },
}

#[derive(Clone, Default)]
pub struct FakeClient {
    gets: Arc<Mutex<VecDeque<HttpResponse>>>,
    posts: Arc<Mutex<VecDeque<HttpResponse>>>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_get(self, status: u16, body: impl Into<Bytes>) -> Self {
        self.gets.lock().unwrap().push_back(HttpResponse {
            status,
            content_type: Some("text/html;charset=UTF-8".to_string()),
            body: body.into(),
        });
        self
    }

    pub fn with_post(self, status: u16, body: impl Into<Bytes>) -> Self {
        self.with_typed_post(status, None, body)
    }

    pub fn with_typed_post(
        self,
        status: u16,
        content_type: Option<&str>,
        body: impl Into<Bytes>,
    ) -> Self {
        self.posts.lock().unwrap().push_back(HttpResponse {
            status,
            content_type: content_type.map(str::to_string),
            body: body.into(),
        });
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn get_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Get { .. }))
            .count()
    }

    pub fn post_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Post { .. }))
            .count()
    }
}

#[async_trait]
impl HttpClient for FakeClient {
    async fn get(&self, url: &str, _timeout: Duration) -> Result<HttpResponse> {
        self.calls.lock().unwrap().push(Call::Get {
            url: url.to_string(),
        });
        Ok(self
            .gets
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected GET request"))
    }

    async fn post_form(&self, request: FormPost<'_>) -> Result<HttpResponse> {
        self.calls.lock().unwrap().push(Call::Post {
            url: request.url.to_string(),
            query: request.query.to_vec(),
            fields: request
                .payload
                .iter()
                .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
                .collect(),
        });
        Ok(self
            .posts
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected POST request"))
    }
}

/// Everything written by the tracing subscriber installed with [`capture_logs`].
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = LogBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Route this thread's logs into a buffer until the guard drops.
pub fn capture_logs() -> (LogBuffer, DefaultGuard) {
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(buffer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (buffer, guard)
}

pub fn fixture() -> String {
    std::fs::read_to_string("fixtures/pact.html").unwrap()
}
