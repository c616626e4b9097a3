//! Hot-seat play loop over stdin and stdout.

use crate::session::{GameSession, HintStatus};
use derive_more::{Display, Error};
use gebeta_rules::{GameState, Phase, Player, Variant, legal_moves, rules::race_start};
use std::str::FromStr;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, instrument};

/// One line of input from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayCommand {
    /// Sow from a pit.
    Move {
        /// Row index.
        row: usize,
        /// Hole index.
        hole: usize,
    },
    /// Ask the suggestion service.
    Hint,
    /// List legal moves.
    Moves,
    /// Back to the setup screen.
    Reset,
    /// Start a new game.
    New(Variant),
    /// Show the command list.
    Help,
    /// Leave.
    Quit,
}

/// Input that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("{}", message)]
pub struct CommandError {
    /// What was wrong with the input.
    pub message: String,
}

impl CommandError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Parses one input line.
pub fn parse_command(line: &str) -> Result<PlayCommand, CommandError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    match words.as_slice() {
        ["hint"] => Ok(PlayCommand::Hint),
        ["moves"] => Ok(PlayCommand::Moves),
        ["reset"] => Ok(PlayCommand::Reset),
        ["help"] => Ok(PlayCommand::Help),
        ["quit"] | ["exit"] => Ok(PlayCommand::Quit),
        ["new", name] => Variant::from_str(name)
            .map(PlayCommand::New)
            .map_err(|_| CommandError::new(format!("Unknown variant '{}': use 12-hole or 18-hole", name))),
        [row, hole] => match (row.parse(), hole.parse()) {
            (Ok(row), Ok(hole)) => Ok(PlayCommand::Move { row, hole }),
            _ => Err(CommandError::new("Moves are two numbers: <row> <hole>")),
        },
        [] => Err(CommandError::new("Enter a command, or 'help'")),
        _ => Err(CommandError::new(format!("Unknown command '{}'", line.trim()))),
    }
}

const HELP: &str = "\
Commands:
  <row> <hole>   sow from a pit
  hint           ask for a suggested move
  moves          list legal moves
  new <variant>  start a 12-hole or 18-hole game
  reset          back to the setup screen
  quit           leave";

/// Describes whose turn it is, or how the game ended.
pub fn status_line(state: &GameState) -> String {
    if let Some(outcome) = state.outcome() {
        return format!(
            "Game over: {} ({} - {})",
            outcome,
            state.store(Player::First),
            state.store(Player::Second)
        );
    }

    match state.phase() {
        Phase::Setup => "Choose a variant: new 12-hole | new 18-hole".to_string(),
        Phase::Race(race) => {
            let waiting = Player::BOTH
                .iter()
                .filter(|&&player| !race.has_raced(player))
                .map(|&player| format!("{} from {}", player, race_start(state.variant(), player)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("Race for the first move: {}", waiting)
        }
        Phase::Playing => match state.relay_origin() {
            Some(origin) => format!("{} continues relay sowing from {}", state.current_player(), origin),
            None => format!(
                "{} to move from row {}",
                state.current_player(),
                state.variant().home_row(state.current_player())
            ),
        },
    }
}

fn render(state: &GameState) -> String {
    if !state.phase().is_started() {
        return status_line(state);
    }
    format!(
        "{}\nstores: {} {} | {} {}\n{}",
        state.board().display(),
        Player::First,
        state.store(Player::First),
        Player::Second,
        state.store(Player::Second),
        status_line(state)
    )
}

/// Runs the interactive loop until `quit` or end of input.
#[instrument(skip(session))]
pub async fn run(mut session: GameSession, variant: Option<Variant>) -> anyhow::Result<()> {
    if let Some(variant) = variant {
        session.start(variant);
    }
    println!("{}", render(session.state()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };
        debug!(?command, "Command received");

        match command {
            PlayCommand::Quit => break,
            PlayCommand::Help => println!("{}", HELP),
            PlayCommand::New(variant) => {
                session.start(variant);
                println!("{}", render(session.state()));
            }
            PlayCommand::Reset => {
                let notice = session.reset();
                println!("[{}] {}", notice.severity, notice.message);
                println!("{}", render(session.state()));
            }
            PlayCommand::Moves => {
                let moves = legal_moves(session.state())
                    .iter()
                    .map(|pit| pit.to_string())
                    .collect::<Vec<_>>();
                if moves.is_empty() {
                    println!("No legal moves");
                } else {
                    println!("Legal moves: {}", moves.join(" "));
                }
            }
            PlayCommand::Hint => show_hint(&mut session).await,
            PlayCommand::Move { row, hole } => match session.play(row, hole) {
                Ok(state) => println!("{}", render(state)),
                Err(err) => println!("[{}] {}", err.severity(), err),
            },
        }
    }
    Ok(())
}

async fn show_hint(session: &mut GameSession) {
    if let Err(err) = session.request_hint() {
        println!("[info] {}", err.message);
        return;
    }
    println!("Asking for a hint...");
    match session.wait_hint().await {
        HintStatus::Ready(suggestion) => println!(
            "Suggestion: sow from {} (confidence {:.2}): {}",
            suggestion.pit, suggestion.confidence, suggestion.reasoning
        ),
        HintStatus::Failed(err) => println!("[info] Hint unavailable: {}", err.message),
        HintStatus::Idle | HintStatus::Pending | HintStatus::Stale => {
            println!("[info] Hint no longer applies")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gebeta_rules::{apply_move, reset_game, start_game};

    #[test]
    fn test_parse_moves_and_words() {
        assert_eq!(parse_command(" 0 3 "), Ok(PlayCommand::Move { row: 0, hole: 3 }));
        assert_eq!(parse_command("hint"), Ok(PlayCommand::Hint));
        assert_eq!(parse_command("new 18-hole"), Ok(PlayCommand::New(Variant::EighteenHole)));
        assert_eq!(parse_command("exit"), Ok(PlayCommand::Quit));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_command("").is_err());
        assert!(parse_command("0 x").is_err());
        assert!(parse_command("-1 2").is_err());
        assert!(parse_command("new 24-hole").unwrap_err().message.contains("24-hole"));
        assert!(parse_command("sow now please").is_err());
    }

    #[test]
    fn test_status_lines() {
        assert!(status_line(&reset_game()).starts_with("Choose a variant"));

        let race = start_game(Variant::EighteenHole);
        assert_eq!(
            status_line(&race),
            "Race for the first move: Player 1 from (0, 0), Player 2 from (2, 5)"
        );

        let state = apply_move(&start_game(Variant::TwelveHole), 0, 0).unwrap();
        assert_eq!(status_line(&state), "Player 2 to move from row 1");
    }
}
