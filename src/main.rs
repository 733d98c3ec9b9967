use clap::Parser;
use portfolio_builder::config::cli::{CatalogListing, Command};
use portfolio_builder::core::codec;
use portfolio_builder::domain::model::Catalog;
use portfolio_builder::domain::ports::{CatalogSource, ConfigProvider};
use portfolio_builder::utils::error::ErrorSeverity;
use portfolio_builder::utils::{logger, validation::Validate};
use portfolio_builder::{
    AppConfig, CliConfig, LocalStorage, PortfolioExporter, PortfolioSession, Result,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting portfolio-builder");
    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run(cli: &CliConfig) -> Result<()> {
    let config = cli.app_config()?;
    config.validate()?;

    let source = config.catalog_source()?;
    tracing::info!("Loading catalog from {}", source.describe());
    let catalog = source.load().await?;

    match &cli.command {
        Command::Share(args) => {
            let query = codec::encode(&args.to_query(&config)?);
            let session = PortfolioSession::from_query(catalog, &query);
            println!("{}", session.share_url(config.base_url(), config.public_path())?);
            println!(
                "{}",
                session.browser_pdf_url(config.base_url(), config.public_path())?
            );
        }
        Command::Decode { url, json } => {
            let view = PortfolioSession::from_url(catalog, url).view();
            if *json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!("Client:   {} ({})", view.client.name, view.client.id);
                println!("Title:    {}", view.title);
                println!("Subtitle: {}", view.subtitle);
                println!("Variant:  {}", view.variant.label());
                println!("Paper:    {}", view.options.print_paper.as_str());
                println!("Services:");
                for (index, service) in view.services.iter().enumerate() {
                    println!("  {:>2}. [{}] {}", index + 1, service.category, service.name);
                }
                println!("Controls:");
                for (index, control) in view.controls.iter().enumerate() {
                    println!("  {:>2}. {}", index + 1, control.name);
                }
            }
        }
        Command::Render { url, output } => {
            let view = PortfolioSession::from_url(catalog, url).view();
            let html = portfolio_builder::render::render_html(&view);
            tokio::fs::write(output, html).await?;
            tracing::info!("✅ Portfolio rendered");
            println!("📁 Output saved to: {}", output.display());
        }
        Command::Export { url, .. } => {
            export(config, catalog, url).await?;
        }
        Command::Catalog { list, json } => {
            if *json {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            } else {
                print_catalog(&catalog, *list);
            }
        }
    }

    Ok(())
}

async fn export(config: AppConfig, catalog: Catalog, url: &str) -> Result<()> {
    let formats = config.export_formats();
    let session = PortfolioSession::from_url(catalog, url);
    let storage = LocalStorage::new(config.output_path().to_string());
    let exporter = PortfolioExporter::new(storage, config);

    let output_path = exporter.export(&session, &formats).await?;
    tracing::info!("✅ Export completed successfully!");
    println!("✅ Export completed successfully!");
    println!("📁 Output saved to: {}", output_path);
    Ok(())
}

fn print_catalog(catalog: &Catalog, listing: CatalogListing) {
    let show = |section: CatalogListing| listing == CatalogListing::All || listing == section;

    if show(CatalogListing::Services) {
        println!("Services:");
        for service in &catalog.services {
            println!("  {:<20} {:<15} {}", service.id, service.category, service.name);
        }
    }
    if show(CatalogListing::Controls) {
        println!("Controls:");
        for control in &catalog.controls {
            let star = if control.highlight { "★" } else { " " };
            println!("  {:<20} {} {}", control.id, star, control.name);
        }
    }
    if show(CatalogListing::Clients) {
        println!("Clients:");
        for client in &catalog.clients {
            println!("  {:<20} {} ({})", client.id, client.name, client.industry);
        }
    }
    if show(CatalogListing::Certifications) {
        println!("Certifications:");
        for cert in catalog.certifications() {
            println!("  {:<20} {}", cert.id, cert.name);
        }
    }
    if show(CatalogListing::RepClients) {
        println!("Representative clients:");
        for rep in catalog.representative_clients() {
            println!("  {:<20} {}", rep.id, rep.name);
        }
    }
}
