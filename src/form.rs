use crate::error::{Result, ScrapeError};
use crate::format::ExportFormat;
use indexmap::IndexMap;
use scraper::{Html, Selector};
use serde::Serialize;
use tracing::debug;

/// Form fields in document order, ready to be url-encoded.
///
/// A field whose `<input>` carries no `value` attribute is kept as `None`;
/// url-encoding leaves such fields out of the request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormPayload {
    fields: IndexMap<String, Option<String>>,
}

impl FormPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last write wins; the field keeps the position of its first insert.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        self.fields.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(|v| v.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }
}

/// Rebuild the default submission of the form `form_id`, with
/// `export_field` set to the requested format.
pub fn extract_form_payload(
    html: &str,
    form_id: &str,
    export_field: &str,
    format: ExportFormat,
) -> Result<FormPayload> {
    let document = Html::parse_document(html);
    let form = document
        .select(&selector("form")?)
        .find(|node| node.value().id() == Some(form_id))
        .ok_or_else(|| ScrapeError::FormNotFound(form_id.to_string()))?;

    let mut payload = FormPayload::new();
    let mut total = 0;
    for input in form.select(&selector("input")?) {
        total += 1;
        let Some(name) = input.value().attr("name") else {
            continue;
        };
        let value = if name == export_field {
            Some(format.to_string())
        } else {
            input.value().attr("value").map(str::to_string)
        };
        payload.insert(name, value);
    }

    debug!("Total number of input attributes: {total}");
    Ok(payload)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector(format!("{css}: {e:?}")))
}
