//
// Hashiwokakero solver
//
// Copyright 2021 Simon Frankau
//

use std::fs::File;
use std::io::{stdin, stdout, BufRead, BufReader, Read, Write};

use anyhow::{ensure, Result};
use clap::{ArgEnum, Parser};
use log::info;

use hashi::puzzle::read_matrix;
use hashi::{Board, Difficulty, SolveOutcome, SolverConfig};

#[derive(ArgEnum, Copy, Clone, Debug)]
enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Difficulty {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

#[derive(Parser)]
#[clap(version = "0.1", author = "Simon Frankau <sgf@arbitrary.name>")]
#[clap(about = "Hashiwokakero (Bridges) puzzle solver")]
struct Opts {
    /// Input file. Uses stdin if none specified.
    #[clap(long, conflicts_with = "difficulty")]
    input_file: Option<String>,
    /// Output file. Uses stdout if none specified.
    #[clap(long)]
    output_file: Option<String>,
    /// Use a built-in puzzle instead of reading one.
    #[clap(long, arg_enum)]
    difficulty: Option<DifficultyArg>,
    /// Print the first forced bridge instead of solving.
    #[clap(long)]
    hint: bool,
    /// Maximum number of constraint propagation passes.
    #[clap(long, default_value = "100")]
    max_iterations: usize,
    /// Maximum number of open decisions during search.
    #[clap(long, default_value = "1000")]
    max_depth: usize,
    /// Maximum number of search steps.
    #[clap(long, default_value = "1000000")]
    max_steps: usize,
}

fn read_input(opts: &Opts) -> Result<Vec<String>> {
    let file: Box<dyn Read> = match &opts.input_file {
        Some(name) => Box::new(File::open(name)?),
        None => Box::new(stdin()),
    };

    Ok(BufReader::new(file)
        .lines()
        .collect::<Result<Vec<_>, _>>()?)
}

fn write_output(opts: &Opts, s: &str) -> Result<()> {
    let mut file: Box<dyn Write> = match &opts.output_file {
        Some(name) => Box::new(File::create(name)?),
        None => Box::new(stdout()),
    };

    Ok(file.write_all(s.as_bytes())?)
}

fn load_board(opts: &Opts) -> Result<Board> {
    if let Some(difficulty) = opts.difficulty {
        return Ok(Difficulty::from(difficulty).board()?);
    }
    let lines = read_input(opts)?;
    let matrix = read_matrix(lines.iter().map(String::as_str))?;
    Ok(Board::new(&matrix)?)
}

fn main() -> Result<()> {
    env_logger::init();
    let opts: Opts = Opts::parse();

    ensure!(opts.max_depth >= 1, "--max-depth must be at least 1");

    let mut board = load_board(&opts)?;
    info!(
        "loaded {}x{} board with {} islands",
        board.height(),
        board.width(),
        board.islands().len()
    );

    if opts.hint {
        match board.hint() {
            Some(hint) => {
                let (from, to) = (board.island(hint.island), board.island(hint.candidate));
                write_output(
                    &opts,
                    &format!("({}, {}) -> ({}, {})", from.row, from.col, to.row, to.col),
                )?;
            }
            None => eprintln!("No hint available"),
        }
        return Ok(());
    }

    let config = SolverConfig {
        max_iterations: opts.max_iterations,
        max_depth: opts.max_depth,
        max_steps: opts.max_steps,
    };

    match board.solve(&config) {
        SolveOutcome::Solved(_) => write_output(&opts, &board.to_string())?,
        SolveOutcome::Partial(reason) => {
            eprintln!("No solution found: {}", reason);
            eprintln!("{}", board);
        }
    }

    Ok(())
}
