use crate::cache::PageCache;
use crate::client::{FormPost, HttpClient, HttpResponse};
use crate::config::{ScrapeOptions, SiteConfig};
use crate::error::{Result, ScrapeError};
use crate::form::{extract_form_payload, FormPayload};
use crate::format::{ExportFormat, WriteMode};
use crate::page::Page;
use std::{
    fs,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};
use tracing::{debug, error, info};

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub format: ExportFormat,
    pub path: PathBuf,
    pub bytes: usize,
    pub elapsed: Duration,
}

/// Replays the PACT export form and saves what the server sends back.
///
/// A page fetched once is kept and reused by every later export.
pub struct Scraper<C> {
    client: C,
    site: SiteConfig,
    options: ScrapeOptions,
    cache: PageCache,
    page: Option<Page>,
}

impl<C: HttpClient> Scraper<C> {
    pub fn new(client: C, site: SiteConfig, options: ScrapeOptions) -> Self {
        let cache = PageCache::new(options.cache_file.clone());
        Self {
            client,
            site,
            options,
            cache,
            page: None,
        }
    }

    pub fn page(&self) -> Option<&Page> {
        self.page.as_ref()
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    pub fn options(&self) -> &ScrapeOptions {
        &self.options
    }

    /// GET the form page. On failure the current page is left untouched.
    pub async fn fetch_page(&mut self) -> Result<Page> {
        let url = &self.site.page_url;
        let response = self
            .client
            .get(url, self.site.get_timeout())
            .await
            .inspect_err(|e| error!("Some error occured while fetching data: {e}"))?;

        if !response.is_ok() {
            error!(
                "Some error occured while fetching data! Status code: {}",
                response.status
            );
            return Err(ScrapeError::Status {
                url: url.clone(),
                status: response.status,
            });
        }

        let page = Page::new(response.body);
        info!("Length of HTML page: {}", page.len());
        self.page = Some(page.clone());
        Ok(page)
    }

    /// Return the cached page when allowed and present, otherwise fetch it
    /// (and refresh the cache file when caching is on). Failing to write the
    /// cache file is logged but does not fail the load.
    pub async fn load_or_fetch(&mut self, use_cache: bool) -> Result<Page> {
        if use_cache && self.cache.exists() {
            info!(
                "Filename {} exists skipping download. Use locally cached web page..",
                self.cache.path().display()
            );
            let page = self
                .cache
                .load()
                .inspect_err(|e| error!("Failed to read cached page: {e}"))?;
            self.page = Some(page.clone());
            return Ok(page);
        }

        let page = self.fetch_page().await?;
        if use_cache {
            info!("Saving data into filename: {}", self.cache.path().display());
            if let Err(e) = self.cache.store(&page) {
                error!("{e}");
            }
        }
        Ok(page)
    }

    pub fn build_form_payload(&self, page: &Page, format: ExportFormat) -> Result<FormPayload> {
        extract_form_payload(
            &page.html(),
            &self.site.form_id,
            &self.site.export_type_field,
            format,
        )
    }

    /// Export one format to its artifact file. Failures are logged where they
    /// happen and returned; no file is written unless the POST answers 200.
    pub async fn export(&mut self, format: ExportFormat) -> Result<ExportReport> {
        let start = Instant::now();
        let path = self.options.artifact_path(format);
        info!("Exporting content to {}.", path.display());

        let result = self.try_export(format, &path).await;
        let elapsed = start.elapsed();
        info!("Export total time: {:.2} seconds", elapsed.as_secs_f64());

        Ok(ExportReport {
            format,
            bytes: result?,
            path,
            elapsed,
        })
    }

    /// Export csv, xml and xls one after another.
    pub async fn export_all(&mut self) -> Vec<(ExportFormat, Result<ExportReport>)> {
        let mut results = Vec::new();
        for format in ExportFormat::all() {
            results.push((format, self.export(format).await));
        }
        results
    }

    async fn try_export(&mut self, format: ExportFormat, path: &Path) -> Result<usize> {
        let page = match &self.page {
            Some(page) => page.clone(),
            None => self.load_or_fetch(self.options.use_cache).await?,
        };
        let payload = self
            .build_form_payload(&page, format)
            .inspect_err(|e| error!("{e}"))?;

        let site = &self.site;
        debug!(
            "url={}, headers={:?}, params={:?}, data={:?}",
            site.export_url, site.headers, site.query, payload
        );

        let response = self
            .client
            .post_form(FormPost {
                url: &site.export_url,
                headers: &site.headers,
                query: &site.query,
                payload: &payload,
                timeout: site.post_timeout(),
            })
            .await
            .inspect_err(|e| error!("Something went wrong while exporting data: Error: {e}"))?;

        if !response.is_ok() {
            error!("Something went wrong. Status code: {}", response.status);
            return Err(ScrapeError::Status {
                url: site.export_url.clone(),
                status: response.status,
            });
        }

        let written = write_artifact(path, format, &response).inspect_err(|e| error!("{e}"))?;
        debug!("Wrote {written} bytes to {}", path.display());
        Ok(written)
    }
}

fn write_artifact(path: &Path, format: ExportFormat, response: &HttpResponse) -> Result<usize> {
    let written = match format.write_mode() {
        WriteMode::Text => {
            let text = response.text();
            fs::write(path, text.as_bytes()).map(|_| text.len())
        }
        WriteMode::Binary => fs::write(path, &response.body).map(|_| response.body.len()),
    };
    written.map_err(|e| ScrapeError::io(path, e))
}
