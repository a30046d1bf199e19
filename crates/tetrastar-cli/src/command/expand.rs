use tetrastar_evaluator::board_evaluator::BoardEvaluator as _;
use tetrastar_planner::{greedy::best_successor, problem::TetrisProblem};
use tetrastar_search::SearchProblem as _;

use super::CommonArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ExpandArg {
    #[clap(flatten)]
    common: CommonArg,
}

pub(crate) fn run(arg: &ExpandArg) -> anyhow::Result<()> {
    let config = arg.common.load_config()?;
    let game = &config.game;
    let mut generator = game.generator(config.seed_or_random());
    let pending = game.pieces.generate(&mut generator);
    let mut problem = TetrisProblem::new(
        game.problem,
        game.start_board.clone(),
        pending,
        generator.split(),
    );

    let start = problem.start_state();
    let successors = problem.successors(&start);
    println!("Successors of the start state: {}", successors.len());
    for successor in &successors {
        arg.common.print_board(&successor.board);
    }

    let Some(first) = successors.first() else {
        eprintln!("The first piece cannot be placed");
        return Ok(());
    };
    let more = problem.successors(first);
    println!("Successors of the first successor: {}", more.len());
    for successor in &more {
        arg.common.print_board(&successor.board);
    }

    let Some(state) = more.first() else {
        eprintln!("The second piece cannot be placed");
        return Ok(());
    };
    match state.next_piece() {
        Some(kind) => println!("Next piece: {}", kind.as_char()),
        None => println!("Next piece: none"),
    }
    arg.common.print_board(&state.board);

    match best_successor(&mut problem, state, &game.evaluator) {
        Some(best) => {
            println!(
                "Greedy best successor (score {:.1}):",
                game.evaluator.evaluate_board(&best.board)
            );
            arg.common.print_board(&best.board);
        }
        None => println!("No successor"),
    }
    Ok(())
}
