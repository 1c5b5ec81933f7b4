use crate::error::{Result, ScrapeError};
use crate::page::Page;
use bytes::Bytes;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Local mirror of the fetched page, reused across runs.
#[derive(Debug, Clone)]
pub struct PageCache {
    path: PathBuf,
}

impl PageCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn load(&self) -> Result<Page> {
        let content = fs::read(&self.path).map_err(|e| ScrapeError::io(&self.path, e))?;
        Ok(Page::new(Bytes::copy_from_slice(strip(&content))))
    }

    pub fn store(&self, page: &Page) -> Result<()> {
        fs::write(&self.path, page.as_bytes()).map_err(|e| ScrapeError::io(&self.path, e))
    }
}

/// ASCII whitespace, vertical tab (0x0b) included.
fn is_blank(byte: &u8) -> bool {
    byte.is_ascii_whitespace() || *byte == 0x0b
}

fn strip(content: &[u8]) -> &[u8] {
    let start = content.iter().position(|b| !is_blank(b)).unwrap_or(content.len());
    let end = content.iter().rposition(|b| !is_blank(b)).map_or(start, |i| i + 1);
    &content[start..end]
}
