use crate::config::Config;
use crate::drills::{self, DRILLS};
use crate::error::{DrillError, DrillResult};
use crate::quiz::{Difficulty, Mode};
use crate::scores::{ScoreBoard, ScoreKey, ScoreStore};
use crate::session::{Session, SessionOptions};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{BufRead, Write};
use tracing::{debug, info};

pub const USAGE: &str = "\
Usage: netdrill <command>

Commands:
  list                                   Show the available drills
  play <drill> [mode] [difficulty]       Play a drill
  scores [drill]                         Show high scores
  reset <drill>                          Clear one drill's high scores
  help                                   Show this message

Modes:        classic (default), speedrun, streak, practice
Difficulties: casual, standard (default), expert  (or 1, 2, 3)

Examples:
  netdrill play next-hop
  netdrill play magic-number speedrun expert
  netdrill scores cidr-flash";

const RESET_CONFIRMATION: &str = "RESET";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    List,
    Play {
        drill: String,
        mode: Mode,
        difficulty: Difficulty,
    },
    Scores {
        drill: Option<String>,
    },
    Reset {
        drill: String,
    },
    Help,
}

impl Command {
    /// Parse the arguments after the program name.
    pub fn parse(args: &[String]) -> DrillResult<Self> {
        let mut args = args.iter().map(String::as_str);

        let command = match args.next() {
            None | Some("help" | "-h" | "--help") => Command::Help,
            Some("list") => Command::List,
            Some("play") => {
                let drill = known_drill(args.next().ok_or_else(|| usage("play needs a drill name"))?)?;
                let mode = match args.next() {
                    Some(m) => m.parse::<Mode>().map_err(DrillError::Usage)?,
                    None => Mode::default(),
                };
                let difficulty = match args.next() {
                    Some(d) => d.parse::<Difficulty>().map_err(DrillError::Usage)?,
                    None => Difficulty::default(),
                };
                Command::Play {
                    drill,
                    mode,
                    difficulty,
                }
            }
            Some("scores") => Command::Scores {
                drill: args.next().map(known_drill).transpose()?,
            },
            Some("reset") => Command::Reset {
                drill: known_drill(args.next().ok_or_else(|| usage("reset needs a drill name"))?)?,
            },
            Some(other) => return Err(usage(&format!("Unknown command '{}'", other))),
        };

        if let Some(extra) = args.next() {
            return Err(usage(&format!("Unexpected argument '{}'", extra)));
        }
        Ok(command)
    }
}

fn usage(message: &str) -> DrillError {
    DrillError::Usage(format!("{}\n\n{}", message, USAGE))
}

fn known_drill(id: &str) -> DrillResult<String> {
    if DRILLS.iter().any(|(known, _)| *known == id) {
        Ok(id.to_string())
    } else {
        Err(DrillError::UnknownDrill(id.to_string()))
    }
}

pub fn run<S, R, W>(
    command: &Command,
    config: &Config,
    board: &ScoreBoard<S>,
    mut input: R,
    mut output: W,
) -> DrillResult<()>
where
    S: ScoreStore,
    R: BufRead,
    W: Write,
{
    match command {
        Command::Help => writeln!(output, "{}", USAGE)?,
        Command::List => list(&mut output)?,
        Command::Play {
            drill,
            mode,
            difficulty,
        } => play(drill, *mode, *difficulty, config, board, &mut input, &mut output)?,
        Command::Scores { drill } => scores(drill.as_deref(), board, &mut output)?,
        Command::Reset { drill } => reset(drill, board, &mut input, &mut output)?,
    }
    Ok(())
}

fn list(output: &mut impl Write) -> DrillResult<()> {
    writeln!(output, "Available drills:")?;
    for (id, description) in DRILLS {
        writeln!(output, "  {:<18} {}", id, description)?;
    }
    Ok(())
}

fn play<S: ScoreStore>(
    drill_id: &str,
    mode: Mode,
    difficulty: Difficulty,
    config: &Config,
    board: &ScoreBoard<S>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> DrillResult<()> {
    let mut drill = drills::build(drill_id, difficulty)?;
    let mut rng = match config.seed {
        Some(seed) => {
            debug!(seed, "using fixed seed");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let options = SessionOptions::from_config(config, mode, difficulty);
    let mut session = Session::new(input, output, options);
    let summary = session.play(drill.as_mut(), &mut rng)?;

    if !mode.is_scored() || summary.asked == 0 {
        return Ok(());
    }

    let player = session.ask_player_name()?;
    let key = ScoreKey::new(drill_id, mode, difficulty);
    let rank = board.record(&key, &player, summary.score)?;

    let output = session.into_output();
    match rank {
        Some(rank) => writeln!(output, "#{} on the {} board!", rank, key)?,
        None => writeln!(output, "Not in the top {} this time.", config.top_n)?,
    }
    Ok(())
}

fn scores<S: ScoreStore>(drill: Option<&str>, board: &ScoreBoard<S>, output: &mut impl Write) -> DrillResult<()> {
    let boards = board.boards(drill)?;
    if boards.iter().all(|(_, entries)| entries.is_empty()) {
        writeln!(output, "No high scores yet.")?;
        return Ok(());
    }

    for (key, entries) in boards.iter().filter(|(_, entries)| !entries.is_empty()) {
        writeln!(output, "== {} ==", key)?;
        for (i, entry) in entries.iter().enumerate() {
            writeln!(
                output,
                "  {:>2}. {:<14} {:>6}  ({})",
                i + 1,
                entry.player,
                entry.score,
                entry.recorded_at.format("%Y-%m-%d %H:%M")
            )?;
        }
    }
    Ok(())
}

fn reset<S: ScoreStore>(
    drill: &str,
    board: &ScoreBoard<S>,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> DrillResult<()> {
    write!(output, "Type '{}' to clear every {} score: ", RESET_CONFIRMATION, drill)?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    if answer.trim() != RESET_CONFIRMATION {
        writeln!(output, "Canceled.")?;
        return Ok(());
    }

    let removed = board.reset_drill(drill)?;
    info!(drill, removed, "reset high scores");
    writeln!(output, "Cleared {} board(s) for {}.", removed, drill)?;
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn test_parse_play_defaults() {
        assert_eq!(
            Command::parse(&args("play next-hop")).unwrap(),
            Command::Play {
                drill: "next-hop".to_string(),
                mode: Mode::Classic,
                difficulty: Difficulty::Standard,
            }
        );
    }

    #[test]
    fn test_parse_play_full() {
        assert_eq!(
            Command::parse(&args("play magic-number speedrun 3")).unwrap(),
            Command::Play {
                drill: "magic-number".to_string(),
                mode: Mode::Speedrun,
                difficulty: Difficulty::Expert,
            }
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(Command::parse(&args("play")), Err(DrillError::Usage(_))));
        assert!(matches!(Command::parse(&args("play vlan-bingo")), Err(DrillError::UnknownDrill(_))));
        assert!(matches!(Command::parse(&args("play next-hop marathon")), Err(DrillError::Usage(_))));
        assert!(matches!(Command::parse(&args("list extra")), Err(DrillError::Usage(_))));
        assert!(matches!(Command::parse(&args("frobnicate")), Err(DrillError::Usage(_))));
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse(&[]).unwrap(), Command::Help);
        assert_eq!(Command::parse(&args("--help")).unwrap(), Command::Help);
        assert_eq!(Command::parse(&args("list")).unwrap(), Command::List);
        assert_eq!(Command::parse(&args("scores")).unwrap(), Command::Scores { drill: None });
        assert_eq!(
            Command::parse(&args("reset ieee802")).unwrap(),
            Command::Reset {
                drill: "ieee802".to_string()
            }
        );
    }
}
