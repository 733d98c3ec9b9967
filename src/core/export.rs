use crate::core::session::PortfolioSession;
use crate::core::view::PortfolioView;
use crate::domain::ports::{ConfigProvider, Storage};
use crate::render;
use crate::utils::error::{PortfolioError, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Html,
    Json,
    Csv,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Html, ExportFormat::Json, ExportFormat::Csv];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "html" => Some(ExportFormat::Html),
            "json" => Some(ExportFormat::Json),
            "csv" => Some(ExportFormat::Csv),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ServiceRow<'a> {
    position: usize,
    id: &'a str,
    name: &'a str,
    category: &'a str,
    icon: &'a str,
}

#[derive(Debug, Serialize)]
struct ControlRow<'a> {
    position: usize,
    id: &'a str,
    name: &'a str,
    highlight: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExportManifest {
    pub generated_at: String,
    pub client: String,
    pub variant: String,
    pub paper: String,
    pub share_url: String,
    pub files: Vec<String>,
}

/// Writes a downloadable bundle of a portfolio: rendered page, derived data
/// and share link, zipped into one file.
pub struct PortfolioExporter<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> PortfolioExporter<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub fn bundle_name(session: &PortfolioSession) -> String {
        format!("portfolio_{}.zip", session.client().id)
    }

    /// Builds the bundle and stores it; returns the output path.
    pub async fn export(
        &self,
        session: &PortfolioSession,
        formats: &[ExportFormat],
    ) -> Result<String> {
        if formats.is_empty() {
            return Err(PortfolioError::ConfigError {
                message: "at least one export format is required".to_string(),
            });
        }

        let share_url = session.share_url(self.config.base_url(), self.config.public_path())?;
        let view = session.view();
        let files = build_files(&view, formats, &share_url)?;

        let manifest = ExportManifest {
            generated_at: chrono::Utc::now().to_rfc3339(),
            client: view.client.id.clone(),
            variant: view.variant.as_str().to_string(),
            paper: view.options.print_paper.as_str().to_string(),
            share_url,
            files: files.iter().map(|(name, _)| name.clone()).collect(),
        };

        tracing::debug!("Creating ZIP bundle with {} files", files.len() + 1);

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
            for (name, content) in &files {
                zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
                zip.write_all(content)?;
            }
            zip.start_file::<_, ()>("manifest.json", FileOptions::default())?;
            zip.write_all(serde_json::to_string_pretty(&manifest)?.as_bytes())?;

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        let name = Self::bundle_name(session);
        tracing::debug!("Writing ZIP bundle ({} bytes) to storage", zip_data.len());
        self.storage.write_file(&name, &zip_data).await?;

        Ok(format!("{}/{}", self.config.output_path(), name))
    }
}

fn build_files(
    view: &PortfolioView,
    formats: &[ExportFormat],
    share_url: &str,
) -> Result<Vec<(String, Vec<u8>)>> {
    let mut files = Vec::new();

    if formats.contains(&ExportFormat::Html) {
        files.push(("portfolio.html".to_string(), render::render_html(view).into_bytes()));
    }

    if formats.contains(&ExportFormat::Json) {
        files.push(("portfolio.json".to_string(), serde_json::to_vec_pretty(view)?));
    }

    if formats.contains(&ExportFormat::Csv) {
        files.push(("services.csv".to_string(), services_csv(view)?));
        files.push(("controls.csv".to_string(), controls_csv(view)?));
    }

    files.push(("share_url.txt".to_string(), format!("{}\n", share_url).into_bytes()));
    Ok(files)
}

fn services_csv(view: &PortfolioView) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for (index, service) in view.services.iter().enumerate() {
        writer.serialize(ServiceRow {
            position: index + 1,
            id: &service.id,
            name: &service.name,
            category: service.category.as_str(),
            icon: service.icon.as_str(),
        })?;
    }
    writer
        .into_inner()
        .map_err(|e| PortfolioError::IoError(e.into_error()))
}

fn controls_csv(view: &PortfolioView) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for (index, control) in view.controls.iter().enumerate() {
        writer.serialize(ControlRow {
            position: index + 1,
            id: &control.id,
            name: &control.name,
            highlight: control.highlight,
        })?;
    }
    writer
        .into_inner()
        .map_err(|e| PortfolioError::IoError(e.into_error()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin;
    use std::collections::HashMap;
    use std::io::Read;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                PortfolioError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        base_url: String,
    }

    impl ConfigProvider for MockConfig {
        fn base_url(&self) -> &str {
            &self.base_url
        }

        fn public_path(&self) -> &str {
            "/p"
        }

        fn output_path(&self) -> &str {
            "test_output"
        }
    }

    fn exporter(storage: MockStorage) -> PortfolioExporter<MockStorage, MockConfig> {
        PortfolioExporter::new(
            storage,
            MockConfig {
                base_url: "https://portfolio.example.com".to_string(),
            },
        )
    }

    fn read_entry(archive: &mut zip::ZipArchive<std::io::Cursor<Vec<u8>>>, name: &str) -> String {
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[tokio::test]
    async fn test_export_all_formats() {
        let storage = MockStorage::new();
        let session = PortfolioSession::new(builtin::catalog());

        let output = exporter(storage.clone())
            .export(&session, &ExportFormat::ALL)
            .await
            .unwrap();
        assert_eq!(output, "test_output/portfolio_colanta.zip");

        let zip_data = storage.get_file("portfolio_colanta.zip").await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();

        let mut names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "controls.csv",
                "manifest.json",
                "portfolio.html",
                "portfolio.json",
                "services.csv",
                "share_url.txt"
            ]
        );

        let services = read_entry(&mut archive, "services.csv");
        let mut lines = services.lines();
        assert_eq!(lines.next(), Some("position,id,name,category,icon"));
        assert!(lines.next().unwrap().starts_with("1,roedores,"));

        let share = read_entry(&mut archive, "share_url.txt");
        assert!(share.starts_with("https://portfolio.example.com/p?client=colanta"));

        let manifest: ExportManifest =
            serde_json::from_str(&read_entry(&mut archive, "manifest.json")).unwrap();
        assert_eq!(manifest.client, "colanta");
        assert_eq!(manifest.variant, "brochure");
        assert_eq!(manifest.files.len(), 5);
    }

    #[tokio::test]
    async fn test_export_html_only() {
        let storage = MockStorage::new();
        let session = PortfolioSession::from_query(builtin::catalog(), "client=frisby&variant=minimal");

        exporter(storage.clone())
            .export(&session, &[ExportFormat::Html])
            .await
            .unwrap();

        let zip_data = storage.get_file("portfolio_frisby.zip").await.unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
        assert_eq!(archive.len(), 3);
        assert!(read_entry(&mut archive, "portfolio.html").contains("variant-minimal"));
    }

    #[tokio::test]
    async fn test_export_requires_a_format() {
        let session = PortfolioSession::new(builtin::catalog());
        let err = exporter(MockStorage::new()).export(&session, &[]).await.unwrap_err();
        assert!(matches!(err, PortfolioError::ConfigError { .. }));
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(ExportFormat::parse(" HTML "), Some(ExportFormat::Html));
        assert_eq!(ExportFormat::parse("pdf"), None);
    }
}
