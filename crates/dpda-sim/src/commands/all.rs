use std::error::Error;

use clap::Args;
use dpda_exp::run_all;
use log::info;

use super::common::{write_csv, write_json, ExperimentArgs};
use super::distribution;

#[derive(Args, Debug)]
pub struct AllArgs {
    #[command(flatten)]
    pub experiment: ExperimentArgs,
}

pub fn run(args: &AllArgs) -> Result<(), Box<dyn Error>> {
    let config = args.experiment.load()?;
    info!("running all experiments with {} model", config.model.label());
    let bundle = run_all(&config)?;
    let out = &args.experiment.out;
    write_json(&out.join("proposals.json"), &bundle.proposals)?;
    write_csv(&out.join("proposals.csv"), &bundle.proposals.rows)?;
    distribution::persist(out, &bundle.distribution)?;
    write_json(&out.join("ranks.json"), &bundle.ranks)?;
    write_csv(&out.join("ranks.csv"), &bundle.ranks.rows)?;
    Ok(())
}
