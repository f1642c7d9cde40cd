//! Summarize every exported form in a directory
//!
//! Usage: cargo run --bin summarize_batch -- <dir> [--output totals.csv]
//!
//! Each `*.json` file (an export or a saved form) is read and totalled
//! independently in parallel; one CSV row per form plus a block total.

use anyhow::{Context, Result};
use clap::Parser;
use disclosure_form::aggregation::{round_cents, summarize, FormSummary};
use disclosure_form::io::import_json;
use log::warn;
use rayon::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(about = "Totals for a directory of exported disclosure forms")]
struct Args {
    /// Directory of exported form JSON files
    dir: PathBuf,

    /// Output CSV path
    #[arg(long, default_value = "form_totals.csv")]
    output: PathBuf,
}

/// Block totals across all forms
#[derive(Debug, Clone, Default)]
struct BlockTotals {
    forms: usize,
    gross_income: f64,
    net_income: f64,
    assets: f64,
    liabilities: f64,
    expenses: f64,
}

impl BlockTotals {
    fn add(&mut self, summary: &FormSummary) {
        self.forms += 1;
        self.gross_income += summary.gross_income();
        self.net_income += summary.net_income();
        self.assets += summary.assets.total;
        self.liabilities += summary.liabilities.total;
        self.expenses += summary.expenses.total;
    }
}

fn row(name: &str, values: [f64; 7]) -> Vec<String> {
    std::iter::once(name.to_string())
        .chain(values.iter().map(|v| format!("{:.2}", round_cents(*v))))
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let start = Instant::now();

    let mut paths: Vec<PathBuf> = fs::read_dir(&args.dir)
        .with_context(|| format!("reading {}", args.dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();
    println!("Found {} forms in {}", paths.len(), args.dir.display());

    let results: Vec<(String, FormSummary)> = paths
        .par_iter()
        .filter_map(|path| {
            let name = path.file_stem()?.to_string_lossy().into_owned();
            let text = match fs::read_to_string(path) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    return None;
                }
            };
            match import_json(&text) {
                Ok(form) => Some((name, summarize(&form))),
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    None
                }
            }
        })
        .collect();

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    writer.write_record([
        "Form", "GrossIncome", "NetIncome", "Assets", "Liabilities", "NetWorth", "Expenses", "MonthlySurplus",
    ])?;

    let mut block = BlockTotals::default();
    for (name, summary) in &results {
        block.add(summary);
        writer.write_record(row(
            name,
            [
                summary.gross_income(),
                summary.net_income(),
                summary.assets.total,
                summary.liabilities.total,
                summary.net_worth(),
                summary.expenses.total,
                summary.monthly_surplus(),
            ],
        ))?;
    }

    writer.write_record(row(
        "TOTAL",
        [
            block.gross_income,
            block.net_income,
            block.assets,
            block.liabilities,
            block.assets - block.liabilities,
            block.expenses,
            block.net_income - block.expenses,
        ],
    ))?;
    writer.flush()?;

    println!("Summarized {} forms in {:?}", block.forms, start.elapsed());
    println!("  Total assets:      ${:.2}", block.assets);
    println!("  Total liabilities: ${:.2}", block.liabilities);
    println!("Output written to {}", args.output.display());
    Ok(())
}
