//! Line-based terminal frontend.
//!
//! Reads the human's moves from any [`BufRead`] and writes the board to any
//! [`Write`], so the same loop drives stdin/stdout and scripted tests.

use crate::config::EngineConfig;
use crate::games::tictactoe::{Move, Outcome, Phase, Session, search};
use anyhow::{Context, Result};
use derive_more::{Display, Error};
use std::io::{BufRead, Write};
use tracing::{debug, info, instrument};

/// One line of human input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Place a mark.
    Move(Move),
    /// Discard the current game and start another.
    NewGame,
    /// Leave.
    Quit,
    /// Show the input help.
    Help,
}

/// Input that is not a command or a move.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum InputError {
    /// A single number outside 1-9.
    #[display("Cell numbers run from 1 to 9, got {_0}")]
    CellNumber(#[error(not(source))] usize),
    /// Anything else.
    #[display("Could not understand {_0:?} (type 'h' for help)")]
    Unrecognized(#[error(not(source))] String),
}

const HELP: &str = "Enter a cell number 1-9, or 'row col' (0-based), \
'n' for a new game, 'q' to quit.";

/// Parses a line typed by the human.
///
/// Accepts `q`/`quit`, `n`/`new`, `h`/`help`/`?`, a cell number `1`-`9`
/// as shown on the board, or a `row col` pair separated by whitespace or
/// a comma. A pair is passed through unchecked so the session decides
/// whether it is on the board.
pub fn parse_input(line: &str) -> Result<Input, InputError> {
    let trimmed = line.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => return Ok(Input::Quit),
        "n" | "new" => return Ok(Input::NewGame),
        "h" | "help" | "?" => return Ok(Input::Help),
        _ => {}
    }

    let numbers: Vec<usize> = trimmed
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .map_err(|_| InputError::Unrecognized(trimmed.to_string()))?;

    match numbers.as_slice() {
        [cell] => cell
            .checked_sub(1)
            .and_then(Move::from_index)
            .map(Input::Move)
            .ok_or(InputError::CellNumber(*cell)),
        [row, col] => Ok(Input::Move(Move::new(*row, *col))),
        _ => Err(InputError::Unrecognized(trimmed.to_string())),
    }
}

/// Plays games until the human quits or input runs out.
///
/// Returns the outcomes of every finished game, in order.
#[instrument(skip(config, input, output))]
pub fn run<R, W>(config: &EngineConfig, input: R, mut output: W, json: bool) -> Result<Vec<Outcome>>
where
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();
    let mut session = Session::new();
    let mut finished = Vec::new();

    writeln!(output, "You are X and move first. {HELP}")?;
    render(&mut output, &session, json)?;

    loop {
        match session.phase() {
            Phase::AiTurn => {
                ai_reply(config, &mut output, &mut session)?;
                render(&mut output, &session, json)?;
                if let Some(outcome) = session.outcome() {
                    announce(&mut output, outcome, &mut finished)?;
                }
                continue;
            }
            Phase::HumanTurn => write!(output, "Your move: ")?,
            Phase::Terminal(_) => write!(output, "'n' for a new game, 'q' to quit: ")?,
        }
        output.flush()?;

        let Some(line) = lines.next() else {
            debug!("Input closed");
            writeln!(output)?;
            break;
        };
        let line = line.context("Failed to read input")?;

        match parse_input(&line) {
            Ok(Input::Quit) => break,
            Ok(Input::Help) => writeln!(output, "{HELP}")?,
            Ok(Input::NewGame) => {
                info!("New game requested");
                session = Session::new();
                render(&mut output, &session, json)?;
            }
            Ok(Input::Move(mv)) => match session.submit_human_move(mv) {
                Ok(_) => {
                    render(&mut output, &session, json)?;
                    if let Some(outcome) = session.outcome() {
                        announce(&mut output, outcome, &mut finished)?;
                    }
                }
                Err(e) => writeln!(output, "{e}. Try again.")?,
            },
            Err(e) => writeln!(output, "{e}")?,
        }
    }

    Ok(finished)
}

fn ai_reply<W: Write>(config: &EngineConfig, output: &mut W, session: &mut Session) -> Result<()> {
    writeln!(output, "AI is thinking...")?;
    output.flush()?;
    if !config.think_delay().is_zero() {
        std::thread::sleep(config.think_delay());
    }

    if *config.show_analysis() {
        let mut scratch = session.board().clone();
        let analysis = search::analyze(&mut scratch)?;
        for scored in analysis.scored() {
            writeln!(output, "  {} -> {:+}", scored.mv(), scored.score())?;
        }
        writeln!(output, "  ({} positions searched)", analysis.nodes())?;
    }

    let mv = session.run_ai_turn()?;
    writeln!(output, "AI plays {mv}")?;
    Ok(())
}

fn render<W: Write>(output: &mut W, session: &Session, json: bool) -> Result<()> {
    if json {
        writeln!(output, "{}", serde_json::to_string(&session.current_state())?)?;
    } else {
        writeln!(output, "\n{}\n", session.board().display())?;
    }
    Ok(())
}

fn announce<W: Write>(output: &mut W, outcome: Outcome, finished: &mut Vec<Outcome>) -> Result<()> {
    info!(%outcome, "Game finished");
    finished.push(outcome);
    writeln!(output, "{outcome}!")?;
    Ok(())
}
