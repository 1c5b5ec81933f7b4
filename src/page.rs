use bytes::Bytes;
use std::borrow::Cow;

/// Raw bytes of a fetched HTML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    bytes: Bytes,
}

impl Page {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn html(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }
}

impl From<Bytes> for Page {
    fn from(bytes: Bytes) -> Self {
        Self::new(bytes)
    }
}
