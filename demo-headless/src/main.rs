use anyhow::{Context, Result};
use carbon_stock_core::{
    allometry, summarize, BambooType, CalculationRecord, Category, Centimeters, ForestType,
    IndicesInput, MangroveSpecies, Measurement, Meters, Summary, TaxonSelection,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Carbon stock calculator for a field survey
#[derive(Parser, Debug)]
#[command(name = "carbon-stock-demo")]
#[command(
    about = "Estimate biomass, carbon and net CO2 absorption from stem measurements",
    long_about = None
)]
struct Args {
    /// Survey file: JSON array of stem measurements
    #[arg(short, long, default_value = "data/survey.json")]
    input: PathBuf,

    /// Forest area the per-stem averages are scaled to
    #[arg(short = 'a', long, default_value_t = 1.0)]
    forest_area: f64,

    /// Print records and summary as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Show stem/branch/leaf/prop-root biomass for each record
    #[arg(short, long)]
    components: bool,

    /// Enable debug logging from the engine
    #[arg(short, long)]
    verbose: bool,
}

/// One survey row. Selectors accept English names or Thai labels.
#[derive(Debug, Deserialize)]
struct SurveyEntry {
    diameter_cm: f64,
    height_m: f64,
    category: String,
    #[serde(default)]
    bamboo_type: Option<String>,
    #[serde(default)]
    forest_type: Option<String>,
    #[serde(default)]
    mangrove_species: Option<String>,
    #[serde(default)]
    indices: Option<IndicesInput>,
}

impl SurveyEntry {
    fn to_measurement(&self) -> Result<Measurement> {
        let taxon = TaxonSelection {
            category: self.category.parse::<Category>()?,
            bamboo_type: self.bamboo_type.as_deref().map(str::parse::<BambooType>).transpose()?,
            forest_type: self.forest_type.as_deref().map(str::parse::<ForestType>).transpose()?,
            mangrove_species: self
                .mangrove_species
                .as_deref()
                .map(str::parse::<MangroveSpecies>)
                .transpose()?,
        };
        Ok(Measurement::new(
            Centimeters::new(self.diameter_cm),
            Meters::new(self.height_m),
            taxon,
        ))
    }
}

#[derive(Serialize)]
struct Report<'a> {
    forest_area: f64,
    records: &'a [CalculationRecord],
    summary: &'a Summary,
}

fn init_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("carbon_stock_core=debug,demo_headless=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn load_survey(path: &Path) -> Result<Vec<(Measurement, Option<IndicesInput>)>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read survey file {}", path.display()))?;
    let entries: Vec<SurveyEntry> = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse survey file {}", path.display()))?;

    entries
        .iter()
        .enumerate()
        .map(|(row, entry)| {
            entry
                .to_measurement()
                .map(|m| (m, entry.indices))
                .with_context(|| format!("Survey row {}", row + 1))
        })
        .collect()
}

fn print_records(records: &[CalculationRecord], components: bool) {
    println!(
        "{:<16}  {:<28}  {:>8}  {:>7}  {:<10}  {:>12}  {:>12}",
        "id", "class", "D (cm)", "H (m)", "size", "biomass (kg)", "carbon (kg)"
    );
    for record in records {
        let m = record.measurement();
        let marker = if record.is_resolved() { "" } else { "  (no equation)" };
        println!(
            "{:<16}  {:<28}  {:>8.2}  {:>7.2}  {:<10}  {:>12.4}  {:>12.4}{}",
            record.id(),
            record.grouping_key(),
            *m.diameter,
            *m.height,
            record.size_class().label(),
            *record.biomass(),
            *record.carbon(),
            marker
        );

        if !components {
            continue;
        }
        let parts = allometry::evaluate_components(record.variant(), m.diameter, m.height);
        println!(
            "{:>18}stem {}, branch {}, leaf {}, prop root {}",
            "", parts.stem, parts.branch, parts.leaf, parts.prop_root
        );
        if let Some(indices) = record.indices() {
            println!(
                "{:>18}RF {}, RDo {}, RP {}",
                "", indices.rf, indices.rdo, indices.rp
            );
        }
    }
}

fn print_summary(summary: &Summary, forest_area: f64) {
    println!("\n=== Per-class mean carbon ===");
    for group in &summary.groups {
        println!(
            "{:<28}  n = {:>3}  mean {}",
            group.key, group.count, group.mean_carbon
        );
    }

    println!("\n=== Summary ===");
    println!("Classes:            {}", summary.group_count);
    println!("Forest area:        {}", forest_area);
    println!("Total carbon:       {}", summary.total_carbon);
    println!("Net CO2 absorption: {}", summary.net_co2);
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    let survey = load_survey(&args.input)?;
    info!(stems = survey.len(), path = %args.input.display(), "Loaded survey");

    let records: Vec<CalculationRecord> = survey
        .into_iter()
        .map(|(measurement, indices)| CalculationRecord::compile(measurement, indices.as_ref()))
        .collect();
    let summary = summarize(&records, args.forest_area);

    if args.json {
        let report = Report {
            forest_area: args.forest_area,
            records: &records,
            summary: &summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("=== Carbon Stock Survey ===\n");
        print_records(&records, args.components);
        print_summary(&summary, args.forest_area);
    }

    Ok(())
}
