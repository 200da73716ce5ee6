use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    all::{self, AllArgs},
    distribution::{self, DistributionArgs},
    proposals::{self, ProposalsArgs},
    ranks::{self, RanksArgs},
    trial::{self, TrialArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(name = "dpda-sim", about = "Deferred-acceptance matching simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a single trial and print its outcome as JSON.
    Trial(TrialArgs),
    /// Mean proposal count over a range of population sizes.
    Proposals(ProposalsArgs),
    /// Proposal count histogram at a fixed population size.
    Distribution(DistributionArgs),
    /// Mean match rank of doctors and hospitals over a range of sizes.
    Ranks(RanksArgs),
    /// Run all three experiments from one configuration.
    All(AllArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.command {
        Command::Trial(args) => trial::run(&args),
        Command::Proposals(args) => proposals::run(&args),
        Command::Distribution(args) => distribution::run(&args),
        Command::Ranks(args) => ranks::run(&args),
        Command::All(args) => all::run(&args),
    }
}
