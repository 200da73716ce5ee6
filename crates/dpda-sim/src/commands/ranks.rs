use std::error::Error;

use clap::Args;
use dpda_exp::rank_sweep;

use super::common::{write_csv, write_json, ExperimentArgs};

#[derive(Args, Debug)]
pub struct RanksArgs {
    #[command(flatten)]
    pub experiment: ExperimentArgs,
}

pub fn run(args: &RanksArgs) -> Result<(), Box<dyn Error>> {
    let config = args.experiment.load()?;
    let report = rank_sweep(&config.ranks, &config.model, config.seed)?;
    let out = &args.experiment.out;
    write_json(&out.join("ranks.json"), &report)?;
    write_csv(&out.join("ranks.csv"), &report.rows)?;
    Ok(())
}
