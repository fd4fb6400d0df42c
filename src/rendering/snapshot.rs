//! Text snapshots of a rendered page, with a content-addressed digest for
//! golden tests.

use crate::{Error, Result};
use scraper::{Html, Selector};
use sha2::{Digest, Sha256};

/// A textual snapshot of a rendered page
#[derive(Debug, Clone, PartialEq)]
pub struct TextSnapshot {
    /// Page title
    pub title: String,
    /// Body text with runs of whitespace collapsed to single spaces
    pub text: String,
}

impl TextSnapshot {
    /// Parse `html` and extract the `<title>` and the body text
    pub fn from_html(html: &str) -> Result<Self> {
        let document = Html::parse_document(html);
        let title_sel = Selector::parse("title")
            .map_err(|e| Error::RenderError(format!("bad selector: {:?}", e)))?;
        let body_sel = Selector::parse("body")
            .map_err(|e| Error::RenderError(format!("bad selector: {:?}", e)))?;

        let title = document
            .select(&title_sel)
            .next()
            .map(|n| n.text().collect::<String>())
            .unwrap_or_default();

        let text = document
            .select(&body_sel)
            .next()
            .map(|b| b.text().collect::<Vec<_>>().join(" "))
            .unwrap_or_default();

        Ok(Self {
            title: title.trim().to_string(),
            text: text.split_whitespace().collect::<Vec<_>>().join(" "),
        })
    }

    /// Hex SHA-256 over title and text
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.title.as_bytes());
        hasher.update([0u8]);
        hasher.update(self.text.as_bytes());
        hex::encode(hasher.finalize())
    }
}
