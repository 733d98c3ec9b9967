use crate::catalog::GENERIC_CLIENT_ID;
use crate::config::toml_config::AppConfig;
use crate::core::codec::{
    DesignVariant, PortfolioQuery, PrintPaper, DEFAULT_SUBTITLE, DEFAULT_SUBTITLE_GENERIC,
    DEFAULT_TITLE, DEFAULT_TITLE_GENERIC,
};
use crate::core::Storage;
use crate::utils::error::{PortfolioError, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "portfolio-builder")]
#[command(about = "Build, share and export service portfolios")]
pub struct CliConfig {
    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, help = "Origin share links are built against")]
    pub base_url: Option<String>,

    #[arg(long, global = true, help = "Path of the public portfolio view")]
    pub public_path: Option<String>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the share link (and browser print link) for a selection
    Share(SelectionArgs),
    /// Resolve a share link against the catalog and print the result
    Decode {
        /// Full or relative share link
        url: String,
        #[arg(long, help = "Print the derived portfolio as JSON")]
        json: bool,
    },
    /// Render a share link to a standalone HTML page
    Render {
        /// Full or relative share link
        url: String,
        #[arg(long, short, default_value = "portfolio.html")]
        output: PathBuf,
    },
    /// Write a zip bundle for a share link
    Export {
        /// Full or relative share link
        url: String,
        #[arg(long)]
        output_path: Option<String>,
        #[arg(long, value_delimiter = ',')]
        formats: Vec<String>,
    },
    /// List the catalog contents
    Catalog {
        #[arg(long, value_enum, default_value_t = CatalogListing::All)]
        list: CatalogListing,
        #[arg(long, help = "Dump the whole catalog as JSON")]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CatalogListing {
    All,
    Services,
    Controls,
    Clients,
    Certifications,
    RepClients,
}

#[derive(Debug, Clone, Default, Args)]
pub struct SelectionArgs {
    #[arg(long)]
    pub client: Option<String>,

    #[arg(long, value_delimiter = ',', help = "Ordered service ids")]
    pub services: Vec<String>,

    #[arg(long, value_delimiter = ',', help = "Ordered control ids")]
    pub controls: Vec<String>,

    #[arg(long, value_delimiter = ',', help = "Ordered representative client ids")]
    pub rep_clients: Vec<String>,

    #[arg(long, value_delimiter = ',', help = "Ordered certification ids")]
    pub certs: Vec<String>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub subtitle: Option<String>,

    #[arg(long)]
    pub variant: Option<String>,

    #[arg(long)]
    pub paper: Option<String>,
}

impl SelectionArgs {
    /// Query for these arguments, falling back to `[defaults]` from the
    /// configuration. Ids are resolved on decode; omitted cover texts take
    /// the default for the client kind.
    pub fn to_query(&self, config: &AppConfig) -> Result<PortfolioQuery> {
        let variant = match &self.variant {
            Some(v) => DesignVariant::parse(v).ok_or_else(|| invalid("variant", v))?,
            None => config.default_variant(),
        };
        let paper = match &self.paper {
            Some(p) => PrintPaper::parse(p).ok_or_else(|| invalid("paper", p))?,
            None => config.default_paper(),
        };

        let client_id = self
            .client
            .clone()
            .or_else(|| config.default_client().map(str::to_string))
            .unwrap_or_default();
        let is_generic = client_id == GENERIC_CLIENT_ID;
        let (default_title, default_subtitle) = if is_generic {
            (DEFAULT_TITLE_GENERIC, DEFAULT_SUBTITLE_GENERIC)
        } else {
            (DEFAULT_TITLE, DEFAULT_SUBTITLE)
        };

        Ok(PortfolioQuery {
            client_id,
            service_ids: self.services.clone(),
            control_ids: self.controls.clone(),
            representative_client_ids: self.rep_clients.clone(),
            certification_ids: self.certs.clone(),
            title: self.title.clone().unwrap_or_else(|| default_title.to_string()),
            subtitle: self
                .subtitle
                .clone()
                .unwrap_or_else(|| default_subtitle.to_string()),
            variant,
            paper,
            edit: false,
            print: false,
        })
    }
}

fn invalid(field: &str, value: &str) -> PortfolioError {
    PortfolioError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: "Unknown choice".to_string(),
    }
}

impl CliConfig {
    /// Loads the TOML file when given, then applies command line overrides.
    pub fn app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.app.base_url = base_url.clone();
        }
        if let Some(public_path) = &self.public_path {
            config.app.public_path = public_path.clone();
        }
        if let Command::Export {
            output_path,
            formats,
            ..
        } = &self.command
        {
            if let Some(output_path) = output_path {
                config.export.output_path = output_path.clone();
            }
            if !formats.is_empty() {
                config.export.formats = formats.clone();
            }
        }

        Ok(config)
    }
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}
