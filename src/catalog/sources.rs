use crate::catalog::builtin;
use crate::domain::model::Catalog;
use crate::domain::ports::CatalogSource;
use crate::utils::error::{PortfolioError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

/// Round-trip delay of the simulated catalog API.
pub const DEFAULT_LOAD_DELAY: Duration = Duration::from_millis(150);

/// Builtin catalog served after a fixed artificial delay.
#[derive(Debug, Clone)]
pub struct MockCatalogSource {
    catalog: Catalog,
    delay: Duration,
}

impl MockCatalogSource {
    pub fn new() -> Self {
        Self::with_catalog(builtin::catalog(), DEFAULT_LOAD_DELAY)
    }

    pub fn with_catalog(catalog: Catalog, delay: Duration) -> Self {
        Self { catalog, delay }
    }
}

impl Default for MockCatalogSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogSource for MockCatalogSource {
    async fn load(&self) -> Result<Catalog> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        tracing::debug!(
            "Builtin catalog loaded: {} services, {} controls, {} clients",
            self.catalog.services.len(),
            self.catalog.controls.len(),
            self.catalog.clients.len()
        );
        Ok(self.catalog.clone())
    }

    fn describe(&self) -> String {
        format!("builtin (delay {}ms)", self.delay.as_millis())
    }
}

/// Catalog read from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    path: PathBuf,
}

impl FileCatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for FileCatalogSource {
    async fn load(&self) -> Result<Catalog> {
        tracing::debug!("Reading catalog file: {}", self.path.display());
        let content = tokio::fs::read_to_string(&self.path).await?;
        let catalog: Catalog = serde_json::from_str(&content)?;
        Ok(catalog)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Catalog fetched as JSON from an HTTP endpoint.
pub struct HttpCatalogSource {
    endpoint: String,
    client: Client,
}

impl HttpCatalogSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn load(&self) -> Result<Catalog> {
        tracing::debug!("Making catalog request to: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;
        tracing::debug!("Catalog response status: {}", response.status());

        if !response.status().is_success() {
            return Err(PortfolioError::CatalogError {
                message: format!("{} returned {}", self.endpoint, response.status()),
            });
        }

        let catalog: Catalog = response.json().await?;
        Ok(catalog)
    }

    fn describe(&self) -> String {
        format!("http {}", self.endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_mock_source_returns_builtin_catalog() {
        let source = MockCatalogSource::with_catalog(builtin::catalog(), Duration::ZERO);
        let catalog = source.load().await.unwrap();
        assert_eq!(catalog.clients[0].id, "colanta");
        assert_eq!(catalog.services.len(), 16);
    }

    #[tokio::test]
    async fn test_mock_source_waits_for_delay() {
        let delay = Duration::from_millis(20);
        let source = MockCatalogSource::with_catalog(builtin::catalog(), delay);
        let started = std::time::Instant::now();
        source.load().await.unwrap();
        assert!(started.elapsed() >= delay);
    }

    #[tokio::test]
    async fn test_file_source_reads_json() {
        let mut file = NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&builtin::catalog()).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let catalog = FileCatalogSource::new(file.path()).load().await.unwrap();
        assert_eq!(catalog, builtin::catalog());
    }

    #[tokio::test]
    async fn test_file_source_rejects_garbage() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();

        let err = FileCatalogSource::new(file.path()).load().await.unwrap_err();
        assert!(matches!(err, PortfolioError::SerializationError(_)));
    }

    #[tokio::test]
    async fn test_http_source_fetches_catalog() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/catalog");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::to_value(builtin::catalog()).unwrap());
        });

        let source = HttpCatalogSource::new(server.url("/catalog"));
        let catalog = source.load().await.unwrap();

        api_mock.assert();
        assert_eq!(catalog.controls.len(), 8);
    }

    #[tokio::test]
    async fn test_http_source_reports_failure_status() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/catalog");
            then.status(503);
        });

        let err = HttpCatalogSource::new(server.url("/catalog"))
            .load()
            .await
            .unwrap_err();
        assert!(matches!(err, PortfolioError::CatalogError { .. }));
    }
}
