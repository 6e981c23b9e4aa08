#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter for the Maze Lab engine.
//!
//! Compiles a map into its automaton once per invocation, then hands the
//! result to the requested subcommand: a static summary, the solver, the
//! JSON exporter, or the interactive session.

mod session;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use maze_lab_automaton::{build, snapshot::AutomatonSnapshot, Automaton};
use maze_lab_core::{BlockedPolicy, BuildOptions, Symbol};
use maze_lab_rendering as rendering;
use maze_lab_system_solver as solver;

const SAMPLE_MAP: &str = "##################
#S .   G     .   #
# ###  .### .    #
#   .    . .     #
##################";

/// Compile mazes into automata, query them, and play them interactively.
#[derive(Debug, Parser)]
#[command(name = "maze-lab", version)]
struct Cli {
    /// Path to a map file; the embedded sample map is used when omitted.
    #[arg(long, global = true)]
    map: Option<PathBuf>,

    /// Policy applied when a move hits a wall or leaves the grid.
    #[arg(long, value_enum, default_value_t = BlockedChoice::Bounce, global = true)]
    blocked: BlockedChoice,

    /// Treat a goal cell in the map as plain floor.
    #[arg(long, global = true)]
    ignore_goal: bool,

    /// Add the reset symbol R to the alphabet.
    #[arg(long, global = true)]
    reset_symbol: bool,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BlockedChoice {
    /// Blocked moves leave the state unchanged.
    Bounce,
    /// Blocked moves sink the run into the trapped state.
    Trap,
}

impl From<BlockedChoice> for BlockedPolicy {
    fn from(choice: BlockedChoice) -> Self {
        match choice {
            BlockedChoice::Bounce => BlockedPolicy::Bounce,
            BlockedChoice::Trap => BlockedPolicy::Trap,
        }
    }
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Print the parsed map and an automaton summary.
    Show,
    /// Find the shortest accepting word.
    Solve {
        /// Replay the word frame by frame after printing it.
        #[arg(long)]
        replay: bool,
    },
    /// Write the automaton snapshot as JSON.
    Export {
        /// Output file; pretty JSON goes to stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Drive the automaton interactively on stdin.
    Play,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let automaton = compile(&cli)?;
    match cli.command {
        CliCommand::Show => show(&automaton),
        CliCommand::Solve { replay } => solve(&automaton, replay),
        CliCommand::Export { output } => export(&automaton, output.as_deref())?,
        CliCommand::Play => session::run(&automaton)?,
    }
    Ok(())
}

fn compile(cli: &Cli) -> Result<Automaton> {
    let text = match &cli.map {
        Some(path) => {
            debug!("reading map from {}", path.display());
            fs::read_to_string(path)
                .with_context(|| format!("failed to read map file {}", path.display()))?
        }
        None => {
            debug!("using the embedded sample map");
            String::from(SAMPLE_MAP)
        }
    };

    let geometry = maze_lab_grid::parse(&text).context("failed to parse map text")?;
    let options = BuildOptions::new(cli.blocked.into(), !cli.ignore_goal, cli.reset_symbol);
    Ok(build(geometry, options))
}

fn show(automaton: &Automaton) {
    println!("{}", rendering::base_grid(automaton.geometry()));
    println!();

    let geometry = automaton.geometry();
    println!("dimensions: {} x {}", geometry.width(), geometry.height());
    println!("items: {}", geometry.item_count());
    match automaton.goal() {
        Some(goal) => println!("goal: ({}, {})", goal.column(), goal.row()),
        None => println!("goal: none"),
    }
    println!("states: {}", automaton.state_count());
    println!("alphabet: {}", letters(automaton.alphabet()));
}

fn solve(automaton: &Automaton, replay: bool) {
    match solver::shortest_accepting_word(automaton) {
        Some(word) if word.is_empty() => {
            println!("the initial state is already accepting; the empty word wins");
        }
        Some(word) => {
            println!(
                "shortest accepting word: {} ({} steps)",
                letters(&word),
                word.len()
            );
            if replay {
                replay_word(automaton, &word);
            }
        }
        None => println!("no solution"),
    }
}

fn replay_word(automaton: &Automaton, word: &[Symbol]) {
    let mut state = automaton.initial_state();
    println!("{}", rendering::frame(automaton.geometry(), &state));

    for &symbol in word {
        match automaton.step(&state, symbol) {
            Ok(next) => state = next,
            Err(error) => {
                println!("replay aborted: {error}");
                return;
            }
        }
        println!();
        println!("{}", rendering::frame(automaton.geometry(), &state));
    }

    if automaton.is_accepting(&state) {
        println!("accepted after {} steps", word.len());
    } else {
        println!("replay ended without acceptance");
    }
}

fn export(automaton: &Automaton, output: Option<&Path>) -> Result<()> {
    let snapshot = AutomatonSnapshot::capture(automaton);
    let json = serde_json::to_string_pretty(&snapshot)
        .context("failed to serialize the automaton snapshot")?;

    match output {
        Some(path) => {
            fs::write(path, json.as_bytes())
                .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
            println!("snapshot written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

pub(crate) fn letters(word: &[Symbol]) -> String {
    word.iter().map(|symbol| symbol.letter()).collect()
}
