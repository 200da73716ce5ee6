use std::error::Error;

use clap::Args;
use dpda_exp::proposal_sweep;

use super::common::{write_csv, write_json, ExperimentArgs};

#[derive(Args, Debug)]
pub struct ProposalsArgs {
    #[command(flatten)]
    pub experiment: ExperimentArgs,
}

pub fn run(args: &ProposalsArgs) -> Result<(), Box<dyn Error>> {
    let config = args.experiment.load()?;
    let report = proposal_sweep(&config.proposals, &config.model, config.seed)?;
    let out = &args.experiment.out;
    write_json(&out.join("proposals.json"), &report)?;
    write_csv(&out.join("proposals.csv"), &report.rows)?;
    Ok(())
}
