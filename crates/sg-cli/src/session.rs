//! Bet parsing and the interactive play loop

use std::io::{self, BufRead, Write};

use sg_engine::ScratchEngine;

use crate::render::TextReport;

/// Wager used when none is given or the given one does not parse
pub const DEFAULT_BET: u64 = 100;

/// Parse a wager, `None` when `input` is not a non-negative integer
pub fn parse_bet(input: &str) -> Option<u64> {
    input.trim().parse().ok()
}

/// Wager from the command line, falling back to `DEFAULT_BET`
pub fn bet_or_default(arg: Option<&str>) -> u64 {
    match arg {
        None => DEFAULT_BET,
        Some(raw) => parse_bet(raw).unwrap_or_else(|| {
            log::warn!("Invalid bet '{raw}', using default {DEFAULT_BET}");
            DEFAULT_BET
        }),
    }
}

/// Prompt for bets and play rounds until `q`, `quit` or end of input
///
/// Returns the number of rounds played.
pub fn run_interactive<R: BufRead, W: Write>(
    engine: &mut ScratchEngine,
    mut input: R,
    output: &mut W,
) -> io::Result<u64> {
    let mut rounds = 0;
    let mut line = String::new();

    loop {
        write!(output, "\nEnter your bet (default {DEFAULT_BET}): ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        let entry = line.trim();
        if entry.eq_ignore_ascii_case("q") || entry.eq_ignore_ascii_case("quit") {
            break;
        }

        let bet = if entry.is_empty() {
            DEFAULT_BET
        } else {
            match parse_bet(entry) {
                Some(bet) => bet,
                None => {
                    writeln!(output, "Invalid input, using default bet: {DEFAULT_BET}.")?;
                    DEFAULT_BET
                }
            }
        };

        let outcome = engine.play(bet);
        write!(output, "{}", TextReport(&outcome))?;
        rounds += 1;
    }

    log::debug!("Interactive session ended after {rounds} rounds");
    Ok(rounds)
}
