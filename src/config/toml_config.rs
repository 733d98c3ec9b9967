use crate::catalog::sources::{
    FileCatalogSource, HttpCatalogSource, MockCatalogSource, DEFAULT_LOAD_DELAY,
};
use crate::catalog::builtin;
use crate::core::codec::{DesignVariant, PrintPaper};
use crate::core::export::ExportFormat;
use crate::domain::ports::{CatalogSource, ConfigProvider};
use crate::utils::error::{PortfolioError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_PUBLIC_PATH: &str = "/portafolio/publico";
pub const DEFAULT_OUTPUT_PATH: &str = "./output";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSection,
    pub catalog: CatalogConfig,
    pub defaults: DefaultsConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSection {
    pub base_url: String,
    pub public_path: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            public_path: DEFAULT_PUBLIC_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSourceKind {
    #[default]
    Builtin,
    File,
    Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub source: CatalogSourceKind,
    pub path: Option<String>,
    pub endpoint: Option<String>,
    pub load_delay_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: CatalogSourceKind::Builtin,
            path: None,
            endpoint: None,
            load_delay_ms: DEFAULT_LOAD_DELAY.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub variant: Option<String>,
    pub paper: Option<String>,
    pub client: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_path: String,
    pub formats: Vec<String>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            formats: vec!["html".to_string(), "json".to_string(), "csv".to_string()],
        }
    }
}

impl AppConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PortfolioError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PortfolioError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the environment value; unset variables
    /// are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PortfolioError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("app.base_url", &self.app.base_url)?;
        validation::validate_public_path("app.public_path", &self.app.public_path)?;
        validation::validate_path("export.output_path", &self.export.output_path)?;

        match self.catalog.source {
            CatalogSourceKind::Builtin => {}
            CatalogSourceKind::File => {
                let path = validation::validate_required_field("catalog.path", &self.catalog.path)?;
                validation::validate_path("catalog.path", path)?;
            }
            CatalogSourceKind::Http => {
                let endpoint =
                    validation::validate_required_field("catalog.endpoint", &self.catalog.endpoint)?;
                validation::validate_url("catalog.endpoint", endpoint)?;
            }
        }

        if let Some(variant) = &self.defaults.variant {
            if DesignVariant::parse(variant).is_none() {
                return Err(invalid_choice(
                    "defaults.variant",
                    variant,
                    &DesignVariant::ALL.map(|v| v.as_str()),
                ));
            }
        }
        if let Some(paper) = &self.defaults.paper {
            if PrintPaper::parse(paper).is_none() {
                return Err(invalid_choice("defaults.paper", paper, &["a4", "letter", "legal"]));
            }
        }
        if let Some(client) = &self.defaults.client {
            validation::validate_non_empty_string("defaults.client", client)?;
        }

        if self.export.formats.is_empty() {
            return Err(PortfolioError::InvalidConfigValueError {
                field: "export.formats".to_string(),
                value: String::new(),
                reason: "At least one export format is required".to_string(),
            });
        }
        for format in &self.export.formats {
            if ExportFormat::parse(format).is_none() {
                return Err(invalid_choice("export.formats", format, &["html", "json", "csv"]));
            }
        }

        Ok(())
    }

    /// Builds the catalog source the `[catalog]` section points at.
    pub fn catalog_source(&self) -> Result<Box<dyn CatalogSource>> {
        match self.catalog.source {
            CatalogSourceKind::Builtin => {
                let delay = Duration::from_millis(self.catalog.load_delay_ms);
                if delay == DEFAULT_LOAD_DELAY {
                    Ok(Box::new(MockCatalogSource::default()))
                } else {
                    Ok(Box::new(MockCatalogSource::with_catalog(builtin::catalog(), delay)))
                }
            }
            CatalogSourceKind::File => {
                let path = validation::validate_required_field("catalog.path", &self.catalog.path)?;
                Ok(Box::new(FileCatalogSource::new(path.as_str())))
            }
            CatalogSourceKind::Http => {
                let endpoint =
                    validation::validate_required_field("catalog.endpoint", &self.catalog.endpoint)?;
                Ok(Box::new(HttpCatalogSource::new(endpoint.as_str())))
            }
        }
    }

    pub fn default_variant(&self) -> DesignVariant {
        self.defaults
            .variant
            .as_deref()
            .and_then(DesignVariant::parse)
            .unwrap_or_default()
    }

    pub fn default_paper(&self) -> PrintPaper {
        self.defaults
            .paper
            .as_deref()
            .and_then(PrintPaper::parse)
            .unwrap_or_default()
    }

    pub fn default_client(&self) -> Option<&str> {
        self.defaults.client.as_deref()
    }

    /// Unknown names are skipped; `validate_config` reports them.
    pub fn export_formats(&self) -> Vec<ExportFormat> {
        self.export
            .formats
            .iter()
            .filter_map(|f| ExportFormat::parse(f))
            .collect()
    }
}

fn invalid_choice(field: &str, value: &str, allowed: &[&str]) -> PortfolioError {
    PortfolioError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: format!("Unsupported value. Valid values: {}", allowed.join(", ")),
    }
}

impl ConfigProvider for AppConfig {
    fn base_url(&self) -> &str {
        &self.app.base_url
    }

    fn public_path(&self) -> &str {
        &self.app.public_path
    }

    fn output_path(&self) -> &str {
        &self.export.output_path
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[app]
base_url = "https://portfolio.example.com"
public_path = "/p"

[catalog]
source = "builtin"
load_delay_ms = 0

[defaults]
variant = "executive"
paper = "letter"
client = "alpina"

[export]
output_path = "./test-output"
formats = ["html", "csv"]
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.base_url(), "https://portfolio.example.com");
        assert_eq!(config.public_path(), "/p");
        assert_eq!(config.default_variant(), DesignVariant::Executive);
        assert_eq!(config.default_paper(), PrintPaper::Letter);
        assert_eq!(config.default_client(), Some("alpina"));
        assert_eq!(
            config.export_formats(),
            vec![ExportFormat::Html, ExportFormat::Csv]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.output_path(), DEFAULT_OUTPUT_PATH);
        assert_eq!(config.catalog.source, CatalogSourceKind::Builtin);
        assert_eq!(config.catalog.load_delay_ms, 150);
        assert_eq!(config.default_variant(), DesignVariant::Brochure);
        assert_eq!(config.export_formats().len(), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PORTFOLIO_TEST_BASE_URL", "https://env.example.com");

        let toml_content = r#"
[app]
base_url = "${PORTFOLIO_TEST_BASE_URL}"
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.app.base_url, "https://env.example.com");

        std::env::remove_var("PORTFOLIO_TEST_BASE_URL");
    }

    #[test]
    fn test_unset_env_var_is_kept() {
        let config = AppConfig::from_toml_str(
            "[app]\nbase_url = \"${PORTFOLIO_TEST_SURELY_UNSET}\"\n",
        )
        .unwrap();
        assert_eq!(config.app.base_url, "${PORTFOLIO_TEST_SURELY_UNSET}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let bad_url = AppConfig::from_toml_str("[app]\nbase_url = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let bad_variant = AppConfig::from_toml_str("[defaults]\nvariant = \"poster\"\n").unwrap();
        assert!(bad_variant.validate().is_err());

        let bad_format = AppConfig::from_toml_str("[export]\nformats = [\"pdf\"]\n").unwrap();
        assert!(bad_format.validate().is_err());

        let missing_endpoint = AppConfig::from_toml_str("[catalog]\nsource = \"http\"\n").unwrap();
        let err = missing_endpoint.validate().unwrap_err();
        assert!(matches!(err, PortfolioError::InvalidConfigValueError { ref field, .. } if field == "catalog.endpoint"));
        assert!(missing_endpoint.catalog_source().is_err());
    }

    #[test]
    fn test_unknown_source_kind_is_parse_error() {
        let result = AppConfig::from_toml_str("[catalog]\nsource = \"ftp\"\n");
        assert!(matches!(result, Err(PortfolioError::ConfigError { .. })));
    }

    #[test]
    fn test_catalog_source_factory() {
        let config = AppConfig::from_toml_str(
            "[catalog]\nsource = \"file\"\npath = \"catalog.json\"\n",
        )
        .unwrap();
        let source = config.catalog_source().unwrap();
        assert_eq!(source.describe(), "file catalog.json");

        let builtin = AppConfig::default().catalog_source().unwrap();
        assert_eq!(builtin.describe(), "builtin (delay 150ms)");

        let instant = AppConfig::from_toml_str("[catalog]\nload_delay_ms = 0\n").unwrap();
        assert_eq!(instant.catalog_source().unwrap().describe(), "builtin (delay 0ms)");
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[app]
base_url = "https://file.example.com"

[export]
output_path = "./exports"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.base_url(), "https://file.example.com");
        assert_eq!(config.output_path(), "./exports");
    }
}
