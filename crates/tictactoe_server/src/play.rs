//! Terminal game against the engine.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use tictactoe_engine::{Outcome, Player, apply_player_move_and_reply, create_game};
use tracing::{debug, instrument};

/// Plays one game on the given streams; the human is X and moves first.
///
/// Returns the final outcome, or [`Outcome::InProgress`] if the input ends
/// or the player types `q` before the game is decided.
#[instrument(skip_all)]
pub fn run<R: BufRead, W: Write>(input: R, output: &mut W) -> Result<Outcome> {
    let mut board = create_game();
    let mut lines = input.lines();

    writeln!(output, "You are X. Enter a cell number to play, or q to quit.")?;
    loop {
        writeln!(output, "\n{board}\n")?;
        write!(output, "Your move (0-8): ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            debug!("Input closed");
            return Ok(Outcome::InProgress);
        };
        let line = line.context("Failed to read move")?;
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Ok(Outcome::InProgress);
        }

        let Ok(position) = line.parse::<usize>() else {
            writeln!(output, "'{line}' is not a cell number")?;
            continue;
        };

        let reply = match apply_player_move_and_reply(&mut board, position) {
            Ok(reply) => reply,
            Err(e) => {
                writeln!(output, "{e}")?;
                continue;
            }
        };

        if let Some(pos) = reply.reply {
            writeln!(output, "Engine plays {pos}")?;
        }

        let message = match reply.outcome {
            Outcome::InProgress => continue,
            Outcome::Draw => "It's a draw.".to_string(),
            Outcome::PlayerOneWins(_) => format!("{} (you) wins!", Player::One),
            Outcome::PlayerTwoWins(_) => format!("{} (engine) wins!", Player::Two),
        };
        writeln!(output, "\n{board}\n\n{message}")?;
        return Ok(reply.outcome);
    }
}
