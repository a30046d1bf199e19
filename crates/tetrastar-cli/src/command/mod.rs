use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tetrastar_engine::{Board, PieceSeed};
use tetrastar_planner::PlannerConfig;

use self::{demo::DemoArg, expand::ExpandArg, trial::TrialArg};
use crate::util;

mod demo;
mod expand;
mod trial;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play several games and report the lines cleared
    Trial(#[clap(flatten)] TrialArg),
    /// Play the demo piece sequence and print every board
    Demo(#[clap(flatten)] DemoArg),
    /// Print the successors of the first two search states
    Expand(#[clap(flatten)] ExpandArg),
}

/// Options shared by every subcommand.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct CommonArg {
    /// Planner configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Piece seed as 32 hex characters
    #[arg(long)]
    seed: Option<PieceSeed>,
    /// Remove full rows after each placement
    #[arg(long)]
    clear_lines: bool,
    /// Prefix board rows with their row index
    #[arg(long)]
    row_numbers: bool,
}

impl CommonArg {
    /// Loads the configuration file, if any, and applies the command-line overrides.
    fn load_config(&self) -> anyhow::Result<PlannerConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let config = util::read_planner_config_file(path)?;
                log::info!("loaded configuration from {}", path.display());
                config
            }
            None => PlannerConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if self.clear_lines {
            config.game.problem.clear_lines = true;
        }
        Ok(config)
    }

    fn print_board(&self, board: &Board) {
        print!("{}", board.display().with_row_numbers(self.row_numbers));
        println!();
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Trial(TrialArg::default())) {
        Mode::Trial(arg) => trial::run(&arg)?,
        Mode::Demo(arg) => demo::run(&arg)?,
        Mode::Expand(arg) => expand::run(&arg)?,
    }
    Ok(())
}
