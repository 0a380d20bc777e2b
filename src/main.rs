//! Thin CLI driver. Loads reference files from a directory convention and either
//! resolves one address or reports catalog load statistics. Not part of the core engine — just
//! the external file-reading this crate deliberately leaves to its caller, wired up for manual use.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use diachi_match::{AbbreviationTable, Catalog, Engine, FuzzyIndexes, ResolverConfig};

#[derive(Parser)]
#[command(name = "diachi", about = "Resolve Vietnamese postal addresses against a reference catalog")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a single address string against a loaded catalog.
    Resolve {
        /// Directory containing provinces/districts/wards/*_names/abbreviations files.
        #[arg(long)]
        data_dir: PathBuf,
        /// The raw address string to resolve.
        address: String,
    },
    /// Load the reference data and report catalog/index statistics without resolving anything.
    Inspect {
        #[arg(long)]
        data_dir: PathBuf,
    },
}

#[derive(Serialize)]
struct ResolveOutput {
    province: String,
    district: String,
    ward: String,
}

fn read_file(dir: &Path, name: &str) -> String {
    let path = dir.join(name);
    fs::read_to_string(&path).unwrap_or_else(|err| {
        eprintln!("failed to read {}: {err}", path.display());
        std::process::exit(1);
    })
}

fn build_engine(data_dir: &Path) -> Engine {
    let provinces_text = read_file(data_dir, "provinces");
    let districts_text = read_file(data_dir, "districts");
    let wards_text = read_file(data_dir, "wards");
    let province_names = read_file(data_dir, "province_names");
    let district_names = read_file(data_dir, "district_names");
    let ward_names = read_file(data_dir, "ward_names");
    let abbreviations_text = read_file(data_dir, "abbreviations");

    let catalog = Catalog::parse(&provinces_text, &districts_text, &wards_text).unwrap_or_else(|err| {
        eprintln!("catalog load failed: {err}");
        std::process::exit(1);
    });
    let abbreviations = AbbreviationTable::parse(&abbreviations_text);
    let fuzzy = FuzzyIndexes::build(
        diachi_match::fuzzy::parse_names(&province_names),
        diachi_match::fuzzy::parse_names(&district_names),
        diachi_match::fuzzy::parse_names(&ward_names),
    );

    Engine::build(catalog, abbreviations, fuzzy, ResolverConfig::default())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve { data_dir, address } => {
            let engine = build_engine(&data_dir);
            let result = engine.resolve(&address);
            let output = ResolveOutput {
                province: result.province,
                district: result.district,
                ward: result.ward,
            };
            println!("{}", serde_json::to_string(&output).unwrap());
            ExitCode::SUCCESS
        }
        Commands::Inspect { data_dir } => {
            let engine = build_engine(&data_dir);
            let catalog = engine.catalog();
            println!("provinces: {}", catalog.provinces.len());
            println!("orphan districts: {}", catalog.stats.orphan_districts);
            println!("orphan wards: {}", catalog.stats.orphan_wards);
            ExitCode::SUCCESS
        }
    }
}
