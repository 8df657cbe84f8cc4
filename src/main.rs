use amrapali_scrape::domain::ports::{ConfigProvider, OptionSource};
use amrapali_scrape::utils::{logger, prompt, validation::Validate};
use amrapali_scrape::{CliConfig, FormSession, HttpDetailFetcher, Level, Orchestrator, OutputPaths};
use clap::Parser;
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);
    tracing::info!("Starting amrapali-scrape");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    }

    // A page that cannot be loaded is fatal. Per-leaf failures are not.
    let session = match FormSession::connect(config.clone()).await {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Failed to start form session: {}", e);
            eprintln!("Failed to start form session: {}", e);
            std::process::exit(1);
        }
    };

    let projects = session.list_options(Level::Project).await?;
    if projects.is_empty() {
        eprintln!("The form page lists no projects; nothing to do.");
        std::process::exit(1);
    }

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let selected = prompt::select_from_list(
        &mut input,
        &mut std::io::stdout(),
        "Available Projects:",
        &projects,
    )?;
    let project = projects[selected].clone();
    println!("Selected project: {}", project.label);

    let paths = OutputPaths::for_project(Path::new(config.output_path()), &project.label);
    let population_timeout = config.population_timeout();
    let fetcher = HttpDetailFetcher::new(config)?;

    let orchestrator = Orchestrator::new(session, fetcher, population_timeout);
    let summary = orchestrator.run(&project, &paths).await?;

    println!(
        "Done. Saved {} entries, rejected {}.",
        summary.accepted, summary.rejected
    );
    Ok(())
}
