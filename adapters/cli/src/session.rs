//! Interactive session that drives the automaton from stdin.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use maze_lab_automaton::Automaton;
use maze_lab_core::{AutomatonState, Symbol};
use maze_lab_rendering as rendering;
use maze_lab_system_solver as solver;

const HELP: &str = "commands:
  N E S W   move (several letters run in sequence, e.g. EENW)
  R         reset symbol, when enabled with --reset-symbol
  grid      print the current frame
  solve     print the shortest accepting word from the start
  reset     start over from the initial state
  help      show this text
  quit      leave the session";

pub(crate) fn run(automaton: &Automaton) -> Result<()> {
    let mut state = automaton.initial_state();

    println!("interactive session; type 'help' for commands");
    println!("{}", rendering::frame(automaton.geometry(), &state));

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        io::stdout().flush().context("failed to flush stdout")?;

        line.clear();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            return Ok(());
        }

        match line.trim() {
            "" => {}
            "quit" | "exit" | "q" => return Ok(()),
            "help" => println!("{HELP}"),
            "grid" => println!("{}", rendering::frame(automaton.geometry(), &state)),
            "reset" => {
                state = automaton
                    .step(&state, Symbol::Reset)
                    .unwrap_or_else(|_| automaton.initial_state());
                println!("{}", rendering::frame(automaton.geometry(), &state));
            }
            "solve" => match solver::shortest_accepting_word(automaton) {
                Some(word) if word.is_empty() => {
                    println!("the initial state is already accepting");
                }
                Some(word) => println!(
                    "shortest accepting word from the start: {} ({} steps)",
                    crate::letters(&word),
                    word.len()
                ),
                None => println!("no solution"),
            },
            letters => apply_letters(automaton, &mut state, letters),
        }
    }
}

fn apply_letters(automaton: &Automaton, state: &mut AutomatonState, line: &str) {
    for letter in line.chars() {
        if letter.is_whitespace() {
            continue;
        }
        let Some(symbol) = Symbol::from_letter(letter) else {
            println!("ignoring '{letter}': not a symbol in the alphabet");
            continue;
        };
        match automaton.step(state, symbol) {
            Ok(next) => *state = next,
            Err(error) => {
                println!("ignoring '{letter}': {error}");
                continue;
            }
        }

        println!("{}", rendering::frame(automaton.geometry(), state));
        if automaton.is_accepting(state) {
            println!("accepted: the word so far wins");
        }
        if state.is_sink() {
            println!("type 'reset' to start over");
            break;
        }
    }
}
