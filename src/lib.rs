pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod exporter;
pub mod form;
pub mod format;
pub mod page;

pub use cache::PageCache;
pub use client::{FormPost, HttpClient, HttpResponse, ReqwestClient};
pub use config::{ScrapeOptions, ScrapeOptionsBuilder, SiteConfig, SiteConfigBuilder};
pub use error::{Result, ScrapeError};
pub use exporter::{ExportReport, Scraper};
pub use form::{extract_form_payload, FormPayload};
pub use format::{ExportFormat, WriteMode};
pub use page::Page;
