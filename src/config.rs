use crate::error::{Result, ScrapeError};
use crate::format::ExportFormat;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/83.0.4103.116 Safari/537.36";
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.9";

/// Everything that ties the scraper to the PACT page: where the form lives,
/// which field selects the export type, and how the export POST looks.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(default, setter(into))]
#[serde(default)]
pub struct SiteConfig {
    pub page_url: String,
    pub export_url: String,
    pub form_id: String,
    pub export_type_field: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub get_timeout_secs: u64,
    pub post_timeout_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let pairs = |items: &[(&str, &str)]| {
            items
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        };

        Self {
            page_url: "https://echa.europa.eu/pact".to_string(),
            export_url: "https://echa.europa.eu/pact".to_string(),
            form_id: "_disspact_WAR_disspactportlet_exportForm".to_string(),
            export_type_field: "_disspact_WAR_disspactportlet_exportType".to_string(),
            query: pairs(&[
                ("p_p_id", "disspact_WAR_disspactportlet"),
                ("p_p_lifecycle", "2"),
                ("p_p_state", "normal"),
                ("p_p_mode", "view"),
                ("p_p_resource_id", "exportResults"),
                ("p_p_cacheability", "cacheLevelPage"),
                ("p_p_col_id", "column-1"),
                ("p_p_col_pos", "1"),
                ("p_p_col_count", "2"),
            ]),
            headers: pairs(&[
                ("Content-Type", "application/x-www-form-urlencoded"),
                ("User-Agent", USER_AGENT),
                ("Accept", ACCEPT),
            ]),
            get_timeout_secs: 10,
            post_timeout_secs: 60,
        }
    }
}

impl SiteConfig {
    /// Load a JSON config; missing keys fall back to the PACT defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ScrapeError::io(path, e))?;
        serde_json::from_str(&content).map_err(|source| ScrapeError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn get_timeout(&self) -> Duration {
        Duration::from_secs(self.get_timeout_secs)
    }

    pub fn post_timeout(&self) -> Duration {
        Duration::from_secs(self.post_timeout_secs)
    }
}

/// Local side of a run: page cache and where artifacts are written.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(default, setter(into))]
pub struct ScrapeOptions {
    pub use_cache: bool,
    pub cache_file: PathBuf,
    pub output_dir: PathBuf,
    /// `{}` is replaced by the format's extension.
    pub file_template: String,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            use_cache: false,
            cache_file: PathBuf::from("main.html"),
            output_dir: PathBuf::from("."),
            file_template: "data.{}".to_string(),
        }
    }
}

impl ScrapeOptions {
    pub fn artifact_path(&self, format: ExportFormat) -> PathBuf {
        self.output_dir
            .join(self.file_template.replace("{}", format.extension()))
    }
}
