//! gap-runner: headless batch runner for the staffing-gap engine.
//!
//! Usage:
//!   gap-runner --records records.json --db results.db
//!   gap-runner --generate 200 --seed 42 --formula v1
//!   gap-runner --config engine.json --records records.json --out enriched.json

use anyhow::Result;
use staffing_core::{
    BatchReport, EngineConfig, LinearOracle, PharmacyAnalyticsPipeline, PharmacyRecord,
    RecordGenerator, ResultStore, RiskFormula,
};
use std::env;
use std::sync::Arc;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let generate = parse_arg(&args, "--generate", 0usize);
    let seed = parse_arg(&args, "--seed", 42u64);
    let records_path = str_arg(&args, "--records");
    let config_path = str_arg(&args, "--config");
    let oracle_path = str_arg(&args, "--oracle");
    let out_path = str_arg(&args, "--out");
    let db = str_arg(&args, "--db").unwrap_or(":memory:");
    let formula: RiskFormula = str_arg(&args, "--formula").unwrap_or("v3").parse()?;

    let config = match config_path {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let oracle = match oracle_path {
        Some(path) => LinearOracle::load(path)?,
        None => LinearOracle::calibrated(),
    };

    let records: Vec<PharmacyRecord> = match records_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
            serde_json::from_str(&content)?
        }
        None if generate > 0 => RecordGenerator::new(seed).records(generate),
        None => anyhow::bail!("nothing to do: pass --records FILE or --generate N"),
    };

    println!("gap-runner — staffing-gap analytics");
    println!("  records:  {}", records.len());
    println!("  formula:  {formula}");
    println!("  db:       {db}");
    println!();

    let pipeline = PharmacyAnalyticsPipeline::with_formula(config, Arc::new(oracle), formula)?;
    let report = pipeline.analyze_batch(&records);

    let store = ResultStore::open(db)?;
    store.migrate()?;
    let run_id = store.create_run(formula, records.len())?;
    store.save_report(&run_id, &report)?;
    log::info!("run {run_id} persisted to {db}");

    if let Some(path) = out_path {
        std::fs::write(path, serde_json::to_string_pretty(&report.enriched)?)?;
        println!("enriched records written to {path}");
    }

    print_summary(&run_id, &report);
    Ok(())
}

fn print_summary(run_id: &str, report: &BatchReport) {
    println!("=== RUN SUMMARY ===");
    println!("  run_id:     {run_id}");
    println!("  analyzed:   {}", report.enriched.len());
    println!("  rejected:   {}", report.rejected.len());
    println!("  urgent:     {}", report.urgent_count);
    println!("  optimize:   {}", report.optimize_count);
    println!("  monitor:    {}", report.monitor_count);
    println!("  optimal:    {}", report.optimal_count);
    println!("  revenue at risk (urgent): {}", report.total_revenue_at_risk);

    // Worst offenders first, the way operations reads the dashboard.
    let mut urgent: Vec<_> = report
        .enriched
        .iter()
        .filter(|r| r.revenue_at_risk > 0)
        .collect();
    urgent.sort_by(|a, b| b.revenue_at_risk.cmp(&a.revenue_at_risk));

    if !urgent.is_empty() {
        println!();
        println!("=== TOP REVENUE AT RISK ===");
        for row in urgent.iter().take(5) {
            println!(
                "  {} [{}] gap {:+.2} FTE, at risk {}",
                row.record.id,
                row.record.segment.key(),
                row.gap,
                row.revenue_at_risk
            );
        }
    }

    for rejected in &report.rejected {
        log::warn!("rejected '{}': {}", rejected.id, rejected.error);
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
