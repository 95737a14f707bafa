use anyhow::{Context, Result};
use postal_core::{AddressEngine, AddressMatch, NormalizedText};
use postal_http::PageSource;
use url::Url;

use crate::extract::html_to_text;

/// Fetch a page, reduce it to text and look for an address.
pub struct AddressExtractor<S> {
    source: S,
    engine: AddressEngine,
}

impl<S: PageSource> AddressExtractor<S> {
    pub fn new(source: S, engine: AddressEngine) -> Self {
        Self { source, engine }
    }

    pub fn engine(&self) -> &AddressEngine {
        &self.engine
    }

    /// A failed fetch is an error, never "no address".
    pub async fn extract_from_url(&self, url: &Url) -> Result<Option<AddressMatch>> {
        let body = self
            .source
            .fetch(url)
            .await
            .with_context(|| format!("fetching {url}"))?;
        tracing::debug!(%url, bytes = body.len(), "page fetched");

        let html = String::from_utf8_lossy(&body);
        Ok(self.extract_from_html(&html).await)
    }

    pub async fn extract_from_html(&self, html: &str) -> Option<AddressMatch> {
        self.extract_from_text(&html_to_text(html)).await
    }

    pub async fn extract_from_text(&self, text: &str) -> Option<AddressMatch> {
        let found = self
            .engine
            .extract(&NormalizedText::from_plain_text(text))
            .await;
        match &found {
            Some(address) => tracing::info!(%address, "address found"),
            None => tracing::info!("no address found"),
        }
        found
    }
}
