use std::error::Error;
use std::path::Path;

use clap::Args;
use dpda_exp::{proposal_distribution, DistributionReport};
use serde::Serialize;

use super::common::{write_csv, write_json, ExperimentArgs};

#[derive(Args, Debug)]
pub struct DistributionArgs {
    #[command(flatten)]
    pub experiment: ExperimentArgs,
    /// Population size, overriding the configuration file.
    #[arg(long)]
    pub n: Option<usize>,
    /// Number of trials, overriding the configuration file.
    #[arg(long)]
    pub iterations: Option<usize>,
}

#[derive(Debug, Serialize)]
struct BinRow {
    bin_start: f64,
    bin_end: f64,
    count: u64,
}

pub fn run(args: &DistributionArgs) -> Result<(), Box<dyn Error>> {
    let mut config = args.experiment.load()?;
    if let Some(n) = args.n {
        config.distribution.n = n;
    }
    if let Some(iterations) = args.iterations {
        config.distribution.iterations = iterations;
    }
    let report = proposal_distribution(&config.distribution, &config.model, config.seed)?;
    persist(&args.experiment.out, &report)
}

pub fn persist(out: &Path, report: &DistributionReport) -> Result<(), Box<dyn Error>> {
    write_json(&out.join("distribution.json"), report)?;
    let bins: Vec<BinRow> = report
        .histogram
        .counts
        .iter()
        .enumerate()
        .map(|(idx, &count)| BinRow {
            bin_start: report.histogram.edges[idx],
            bin_end: report.histogram.edges[idx + 1],
            count,
        })
        .collect();
    write_csv(&out.join("distribution.csv"), &bins)
}
