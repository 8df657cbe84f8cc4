use amrapali_scrape::core::csv_export;
use amrapali_scrape::utils::logger;
use clap::Parser;
use std::path::PathBuf;

/// Converts an accepted-records JSON file into a four-column CSV
/// (Name, Mobile, Project Name, Flat No.).
#[derive(Debug, Parser)]
#[command(name = "json_to_csv")]
struct Args {
    /// Accepted-records file produced by amrapali-scrape
    #[arg(default_value = "amrapali_adarsh_awas_yojna_noida_amrapali_data.json")]
    input: PathBuf,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let output = csv_export::convert_file(&args.input)?;
    println!("CSV conversion complete: {}", output.display());
    Ok(())
}
