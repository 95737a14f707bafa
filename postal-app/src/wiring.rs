use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use postal_config::PostalConfig;
use postal_core::{AddressEngine, AddressMatch, EngineSettings};
use postal_http::{FetchSettings, HttpClient, PageSource};
use postal_tables::ReferenceTables;
use postal_web::AddressExtractor;
use url::Url;

/// Where the document to scan comes from.
#[derive(Debug)]
pub enum Input {
    Url(String),
    HtmlFile(PathBuf),
    TextFile(PathBuf),
}

fn load_tables(cfg: &PostalConfig) -> Result<ReferenceTables> {
    let tables = match &cfg.tables.file {
        Some(path) => ReferenceTables::from_yaml_file(path)
            .with_context(|| format!("loading reference tables from {}", path.display()))?,
        None => ReferenceTables::us().context("building built-in reference tables")?,
    };
    tracing::info!(
        states = tables.states.len(),
        street_suffixes = tables.street_suffixes.len(),
        source = ?cfg.tables.file,
        "reference tables ready"
    );
    Ok(tables)
}

pub fn build_extractor(cfg: &PostalConfig) -> Result<AddressExtractor<HttpClient>> {
    let tables = Arc::new(load_tables(cfg)?);
    let engine = AddressEngine::new(
        tables,
        EngineSettings {
            window_size: cfg.engine.window_size,
            max_in_flight: cfg.engine.max_in_flight,
        },
    );
    let client = HttpClient::new(FetchSettings {
        timeout: Duration::from_secs(cfg.http.timeout_secs),
        retries: cfg.http.retries,
        user_agent: cfg.http.user_agent.clone(),
    })?;
    Ok(AddressExtractor::new(client, engine))
}

pub async fn run<S: PageSource>(
    extractor: &AddressExtractor<S>,
    input: Input,
) -> Result<Option<AddressMatch>> {
    match input {
        Input::Url(raw) => {
            let url = Url::parse(&raw).with_context(|| format!("invalid url: {raw:?}"))?;
            extractor.extract_from_url(&url).await
        }
        Input::HtmlFile(path) => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            Ok(extractor
                .extract_from_html(&String::from_utf8_lossy(&bytes))
                .await)
        }
        Input::TextFile(path) => {
            let text = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("reading {}", path.display()))?;
            Ok(extractor.extract_from_text(&text).await)
        }
    }
}
