use std::{thread, time::Duration};

use tetrastar_planner::{game::GameDriver, problem::PieceSequence};

use super::CommonArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DemoArg {
    #[clap(flatten)]
    common: CommonArg,
    /// Delay between boards in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
}

pub(crate) fn run(arg: &DemoArg) -> anyhow::Result<()> {
    let mut config = arg.common.load_config()?;
    config.game.pieces = PieceSequence::Demo;
    let seed = config.seed_or_random();

    eprintln!("Planning the demo sequence (seed {seed})...");
    let mut driver = GameDriver::new(config.game.clone(), config.game.generator(seed));
    let report = driver.play(None);

    let delay = Duration::from_millis(arg.delay_ms);
    for (i, board) in report.boards().enumerate() {
        if i > 0 {
            thread::sleep(delay);
        }
        arg.common.print_board(board);
    }

    eprintln!(
        "Placed {} pieces in {} rounds, ended by {:?}",
        report.pieces_placed(),
        report.rounds.len(),
        report.end
    );
    println!("Lines cleared: {}", report.lines_cleared());
    Ok(())
}
