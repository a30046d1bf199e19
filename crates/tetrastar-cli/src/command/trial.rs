use std::path::PathBuf;

use tetrastar_planner::trial::run_trials;

use super::CommonArg;
use crate::util::Output;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrialArg {
    #[clap(flatten)]
    common: CommonArg,
    /// Number of games to play [default: 3, or the configured value]
    #[arg(long)]
    trials: Option<usize>,
    /// Print the JSON report to stdout instead of the per-game lines
    #[arg(long, conflicts_with = "output")]
    json: bool,
    /// Write the JSON report to this file
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &TrialArg) -> anyhow::Result<()> {
    let config = arg.common.load_config()?;
    let trials = arg.trials.unwrap_or(config.trials);
    let seed = config.seed_or_random();

    eprintln!("Playing {trials} games (seed {seed})...");
    let summary = run_trials(&config.game, trials, seed, None, |i, game| {
        log::info!(
            "game {}: {} pieces, {} rounds, ended by {:?}",
            i + 1,
            game.pieces_placed,
            game.rounds,
            game.end
        );
        if !arg.json {
            println!("Lines cleared: {}", game.lines_cleared);
        }
    });

    if arg.json || arg.output.is_some() {
        Output::save_json(&summary, arg.output.clone())?;
    }
    if !arg.json {
        println!(
            "Total Lines: {} in {} games.",
            summary.total_lines(),
            summary.games.len()
        );
    }
    if let Some(path) = &arg.output {
        eprintln!("Report written to {}", path.display());
    }

    Ok(())
}
