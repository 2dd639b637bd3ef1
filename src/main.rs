//! Rainfall Pattern Analysis Service - Batch Driver
//!
//! Runs the full normalized-pattern pipeline over one precipitation
//! series file:
//! 1. Parses the raw series (original timestamps are discarded)
//! 2. Reconstructs the synthetic 5-minute time grid
//! 3. Extracts, normalizes, and ranks candidate events per duration class
//! 4. Fits a degree-2 polynomial to each winning accumulation curve
//! 5. Writes one audit table per class plus the summary table
//!
//! Usage:
//!   cargo run --release -- datos.csv
//!   cargo run --release -- datos.csv --out-dir resultados --json
//!
//! Options:
//!   --out-dir DIR     Output directory (default: resultados)
//!   --config FILE     Duration registry (default: durations.toml,
//!                     falls back to the built-in registry if absent)
//!   --sequential      Disable the per-class thread pool
//!   --json            Also write the summary as JSON

use std::fs;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;

use rainpat_service::analysis::summary::{analyze_all, analyze_all_parallel, summarize};
use rainpat_service::classes::{self, SAMPLING_INTERVAL_MINUTES};
use rainpat_service::config;
use rainpat_service::ingest::series::parse_series;
use rainpat_service::logging::{self, LogLevel, Stage};
use rainpat_service::report;
use rainpat_service::timeline;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🌧  Rainfall Pattern Analysis Service");
    println!("=====================================\n");

    // Parse command-line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut input_path: Option<String> = None;
    let mut out_dir = "resultados".to_string();
    let mut config_path = "durations.toml".to_string();
    let mut sequential = false;
    let mut json_summary = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--out-dir" => {
                if i + 1 < args.len() {
                    out_dir = args[i + 1].clone();
                    i += 2;
                } else {
                    eprintln!("Error: --out-dir requires a directory");
                    std::process::exit(1);
                }
            }
            "--config" => {
                if i + 1 < args.len() {
                    config_path = args[i + 1].clone();
                    i += 2;
                } else {
                    eprintln!("Error: --config requires a file path");
                    std::process::exit(1);
                }
            }
            "--sequential" => {
                sequential = true;
                i += 1;
            }
            "--json" => {
                json_summary = true;
                i += 1;
            }
            arg if arg.starts_with("--") => {
                eprintln!("Unknown argument: {}", arg);
                eprintln!(
                    "Usage: {} INPUT [--out-dir DIR] [--config FILE] [--sequential] [--json]",
                    args[0]
                );
                std::process::exit(1);
            }
            arg => {
                if input_path.is_some() {
                    eprintln!("Error: multiple input files given");
                    std::process::exit(1);
                }
                input_path = Some(arg.to_string());
                i += 1;
            }
        }
    }

    let Some(input_path) = input_path else {
        eprintln!("Error: no input file given");
        eprintln!(
            "Usage: {} INPUT [--out-dir DIR] [--config FILE] [--sequential] [--json]",
            args[0]
        );
        std::process::exit(1);
    };

    logging::init_logger(LogLevel::Info, None, false);

    // Load the duration registry
    println!("⚙️  Loading duration registry...");
    let (interval_minutes, duration_classes) = if Path::new(&config_path).exists() {
        let settings = config::load_settings(&config_path);
        println!(
            "✓ {} classes from {} at {} min sampling\n",
            settings.duration.len(),
            config_path,
            settings.sampling_interval_minutes
        );
        (settings.sampling_interval_minutes, settings.classes())
    } else {
        println!(
            "   {} not found — using the built-in registry\n",
            config_path
        );
        (SAMPLING_INTERVAL_MINUTES, classes::default_classes())
    };

    // Ingest the series
    println!("📥 Reading {}...", input_path);
    let text = fs::read_to_string(&input_path)?;
    let parsed = parse_series(&text)?;
    if parsed.values.is_empty() {
        eprintln!("\n❌ {} contains no precipitation readings\n", input_path);
        std::process::exit(1);
    }
    println!(
        "✓ {} readings ({} substituted)\n",
        parsed.values.len(),
        parsed.substituted
    );

    // Reconstruct the time grid
    let records = timeline::reconstruct(&parsed.values, interval_minutes);
    logging::info(
        Stage::Ingest,
        None,
        &format!(
            "grid spans {} .. {}",
            records[0].timestamp,
            records[records.len() - 1].timestamp
        ),
    );

    // Analyze every duration class
    println!(
        "🔍 Analyzing {} duration classes{}...\n",
        duration_classes.len(),
        if sequential { " (sequential)" } else { "" }
    );
    let results = if sequential {
        analyze_all(&records, &duration_classes, interval_minutes)
    } else {
        analyze_all_parallel(Arc::new(records.clone()), &duration_classes, interval_minutes)
    };
    let rows = summarize(&results);

    // Export
    fs::create_dir_all(&out_dir)?;
    println!("\n📤 Writing results to {}/...", out_dir);

    for result in &results {
        let file_name = format!("{}.csv", report::table_name(&result.class.name));
        let path = Path::new(&out_dir).join(&file_name);
        let file = fs::File::create(&path)?;
        let mut writer = BufWriter::new(file);
        report::write_event_table(&mut writer, &records, result)?;
        logging::info(
            Stage::Export,
            Some(&result.class.name),
            &format!("{} candidate events -> {}", result.candidates.len(), file_name),
        );
    }

    let summary_path = Path::new(&out_dir).join("Resumen.csv");
    let file = fs::File::create(&summary_path)?;
    let mut writer = BufWriter::new(file);
    report::write_summary_table(&mut writer, &rows)?;

    if json_summary {
        let json_path = Path::new(&out_dir).join("Resumen.json");
        fs::write(&json_path, report::summary_to_json(&rows)?)?;
    }

    // Summary
    println!("\n{}", "=".repeat(50));
    println!("Summary:");
    if rows.is_empty() {
        println!("  No duration class produced a qualifying event.");
    }
    for row in &rows {
        println!(
            "  {:10} {} .. {}  total {} mm, peak {} mm, fit [{}, {}, {}]",
            row.duration_name,
            row.start.format("%Y-%m-%d %H:%M"),
            row.end.format("%Y-%m-%d %H:%M"),
            row.total_precip_mm,
            row.peak_mm,
            row.coef_a,
            row.coef_b,
            row.coef_c
        );
    }
    println!(
        "  {} of {} classes with events",
        rows.len(),
        duration_classes.len()
    );
    println!("{}", "=".repeat(50));

    Ok(())
}
