use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use address_book::{
    AddressBookError, AddressBookReport, CsvPersonReader, Gender, QueryEngine, ReportConfig,
    VERSION,
};

const USAGE: &str = "Usage: address-book [OPTIONS] <ADDRESS_BOOK_CSV>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Count, oldest person and age gap over an address book CSV
#[derive(Debug, Parser)]
#[command(name = "address-book", version = VERSION)]
struct Cli {
    /// Address book file: one `name, Male|Female, D/M/YY` row per line
    file: Option<String>,

    /// Gender to count (Male or Female)
    #[arg(long, default_value = "Male", value_parser = parse_gender)]
    gender: Gender,

    /// Name fragment of the first person to compare
    #[arg(long, default_value = "Bill")]
    person_a: String,

    /// Name fragment of the second person to compare
    #[arg(long, default_value = "Paul")]
    person_b: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    let Some(path) = cli.file.as_deref() else {
        println!("{}", USAGE);
        return Ok(());
    };

    let config = ReportConfig {
        gender: cli.gender,
        person_a: cli.person_a,
        person_b: cli.person_b,
    };

    let mut report = AddressBookReport::with_config(CsvPersonReader::new(), QueryEngine::new(), config);
    debug!(path, config = ?report.config(), "processing address book");

    let result = report
        .process(path)
        .with_context(|| format!("Failed to process address book: {}", path))?;

    match cli.format {
        OutputFormat::Text => print!("{}", result),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result).context("Failed to render report")?;
            println!("{}", json);
        }
    }

    Ok(())
}

/// Bad values are rejected by clap before any file is touched
fn parse_gender(value: &str) -> std::result::Result<Gender, AddressBookError> {
    value
        .parse()
        .map_err(|e| AddressBookError::InvalidInput(format!("{}", e)))
}

/// Diagnostics go to stderr, stdout only carries the report
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
