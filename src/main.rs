use anyhow::Context;
use clap::Parser;
use course_registry::utils::{logger, validation::Validate};
use course_registry::{CatalogConfig, CliConfig, MenuSession, Registry, RegistryError};

fn load_registry(config: &CliConfig) -> Result<Registry, RegistryError> {
    let catalog = match &config.catalog {
        Some(path) => {
            tracing::info!("📁 Loading catalog from: {}", path);
            CatalogConfig::from_file(path)?
        }
        None => CatalogConfig::sample(),
    };
    catalog.validate()?;
    Registry::from_catalog(&catalog)
}

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let registry = match load_registry(&config) {
        Ok(registry) => registry,
        Err(e) => {
            tracing::error!("❌ Failed to load catalog: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let session = MenuSession::new(registry, stdin.lock(), stdout.lock());
    let registry = session.run().context("console session failed")?;

    tracing::debug!(
        "Session ended with {} registrations",
        registry
            .students()
            .map(|s| s.registered_courses().len())
            .sum::<usize>()
    );
    Ok(())
}
