use std::io::{BufRead, Write};
use std::str::FromStr;

use codenames::{
    visualize_board, visualize_session, Completion, Game, HintState, Role, Team, WordPool,
    BOARD_CELLS,
};
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::dispatcher::{Dispatcher, HintOutcome};
use crate::recording::Recorder;
use crate::service::HintService;

pub const HELP: &str = "\
Commands:
  word <index> <text>     set the word of a cell (index 0-24)
  role <index> <role>     set the role of a cell (blue, red, neutral, assassin, unassigned)
  team <blue|red>         choose the team hints are generated for
  randomize words         fill the board with random words, clearing roles
  randomize setup         deal out roles for a new game
  hint                    request hints in the background
  wait                    wait for the pending hint request
  show                    print the board and the hints
  clear                   empty the board and forget all hints
  help                    print this text
  quit                    exit";

/// A single line of input to the shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Word { index: usize, text: String },
    Role { index: usize, role: Role },
    Team(Team),
    RandomizeWords,
    RandomizeSetup,
    Hint,
    Wait,
    Show,
    Clear,
    Help,
    Quit,
}

/// The error type for the [`FromStr`] instance of [`Command`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandParseError {
    Empty,
    UnknownCommand(String),
    MissingArgument(&'static str),
    InvalidIndex(String),
    InvalidRole(String),
}

impl std::error::Error for CommandParseError {}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandParseError::Empty => write!(f, "No command given"),
            CommandParseError::UnknownCommand(cmd) => {
                write!(f, "Unknown command '{}', try 'help'", cmd)
            }
            CommandParseError::MissingArgument(arg) => write!(f, "Missing argument <{}>", arg),
            CommandParseError::InvalidIndex(idx) => write!(
                f,
                "'{}' is not a cell index between 0 and {}",
                idx,
                BOARD_CELLS - 1
            ),
            CommandParseError::InvalidRole(role) => write!(f, "'{}' is not a role", role),
        }
    }
}

fn parse_index(s: Option<&str>) -> Result<usize, CommandParseError> {
    let s = s.ok_or(CommandParseError::MissingArgument("index"))?;
    s.parse::<usize>()
        .ok()
        .filter(|&idx| idx < BOARD_CELLS)
        .ok_or_else(|| CommandParseError::InvalidIndex(String::from(s)))
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, rest) = s.split_once(char::is_whitespace).unwrap_or((s, ""));
        let rest = rest.trim_start();
        match name.to_ascii_lowercase().as_str() {
            "" => Err(CommandParseError::Empty),
            "word" => {
                let (index, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let index = parse_index(Some(index).filter(|i| !i.is_empty()))?;
                Ok(Command::Word {
                    index,
                    text: String::from(text.trim_start()),
                })
            }
            "role" => {
                let mut args = rest.split_whitespace();
                let index = parse_index(args.next())?;
                let role = args.next().ok_or(CommandParseError::MissingArgument("role"))?;
                let role = role
                    .parse::<Role>()
                    .map_err(|_| CommandParseError::InvalidRole(String::from(role)))?;
                Ok(Command::Role { index, role })
            }
            "team" => {
                let team = rest
                    .split_whitespace()
                    .next()
                    .ok_or(CommandParseError::MissingArgument("team"))?;
                let team = team
                    .parse::<Team>()
                    .map_err(|_| CommandParseError::InvalidRole(String::from(team)))?;
                Ok(Command::Team(team))
            }
            "randomize" => match rest.to_ascii_lowercase().as_str() {
                "words" => Ok(Command::RandomizeWords),
                "setup" => Ok(Command::RandomizeSetup),
                "" => Err(CommandParseError::MissingArgument("words|setup")),
                other => Err(CommandParseError::UnknownCommand(format!("randomize {}", other))),
            },
            "hint" => Ok(Command::Hint),
            "wait" => Ok(Command::Wait),
            "show" => Ok(Command::Show),
            "clear" => Ok(Command::Clear),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandParseError::UnknownCommand(String::from(other))),
        }
    }
}

/// Drives a [`Game`] from text commands, with hints fetched in the background.
pub struct Shell<S> {
    pub game: Game,
    pool: WordPool,
    rng: StdRng,
    dispatcher: Dispatcher<S>,
    recorder: Option<Recorder>,
}

impl<S> Shell<S>
where
    S: HintService + Send + Sync + 'static,
{
    pub fn new(pool: WordPool, rng: StdRng, service: S, recorder: Option<Recorder>) -> Self {
        Self {
            game: Game::new(),
            pool,
            rng,
            dispatcher: Dispatcher::new(service),
            recorder,
        }
    }

    /// Reads commands line by line until `quit` or the end of the input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> anyhow::Result<()> {
        writeln!(out, "{}", HELP)?;
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                self.collect_finished(out)?;
                continue;
            }
            let keep_going = match line.parse::<Command>() {
                Ok(cmd) => self.execute(cmd, out)?,
                Err(err) => {
                    writeln!(out, "{}", err)?;
                    true
                }
            };
            self.collect_finished(out)?;
            if !keep_going {
                break;
            }
        }
        Ok(())
    }

    /// Returns `false` if the shell should exit.
    pub fn execute<W: Write>(&mut self, cmd: Command, out: &mut W) -> anyhow::Result<bool> {
        debug!(?cmd, "Executing command");
        match cmd {
            Command::Word { index, text } => self.game.set_word(index, &text)?,
            Command::Role { index, role } => self.game.set_role(index, role)?,
            Command::Team(team) => {
                self.game.set_hint_team(team);
                writeln!(out, "Hints will be generated for {}.", team)?;
            }
            Command::RandomizeWords => match self.game.randomize_words(&self.pool, &mut self.rng) {
                Ok(()) => writeln!(out, "{}", visualize_board(&self.game.board))?,
                Err(err) => {
                    warn!(%err, "Could not randomize words");
                    writeln!(out, "{}", err)?;
                }
            },
            Command::RandomizeSetup => {
                let team = self.game.randomize_setup(&mut self.rng);
                writeln!(out, "{}", visualize_board(&self.game.board))?;
                writeln!(out, "The {} team starts, hints will be generated for it.", team)?;
            }
            Command::Hint => {
                let pending = self.game.request_hints();
                info!(token = %pending.token, team = %pending.team, "Requesting hints");
                self.dispatcher.dispatch(pending);
                writeln!(out, "Generating...")?;
            }
            Command::Wait => self.wait(out)?,
            Command::Show => {
                writeln!(out, "{}", visualize_board(&self.game.board))?;
                writeln!(out, "{}", visualize_session(&self.game.hints))?;
            }
            Command::Clear => {
                self.game.reset();
                writeln!(out, "Board cleared.")?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Blocks until the latest hint request has an outcome.
    pub fn wait<W: Write>(&mut self, out: &mut W) -> anyhow::Result<()> {
        while self.game.hints.state() == HintState::Loading {
            let Some(outcome) = self.dispatcher.next() else {
                break;
            };
            self.apply(outcome, out)?;
        }
        Ok(())
    }

    /// Applies all outcomes that arrived in the meantime.
    pub fn collect_finished<W: Write>(&mut self, out: &mut W) -> anyhow::Result<()> {
        while let Some(outcome) = self.dispatcher.try_next() {
            self.apply(outcome, out)?;
        }
        Ok(())
    }

    /// Hands the outcome to the session first. A failure to record it is
    /// logged and does not end the shell.
    fn apply<W: Write>(&mut self, outcome: HintOutcome, out: &mut W) -> anyhow::Result<()> {
        let elapsed_ms = outcome.elapsed.as_millis() as u64;
        let completion = self.game.complete_hints(outcome.token, outcome.outcome.clone());
        if let Some(recorder) = &mut self.recorder {
            match recorder.record(&outcome) {
                Ok(path) => debug!(path = %path.display(), "Recorded hint exchange"),
                Err(err) => {
                    warn!(%err, token = %outcome.token, "Could not record hint exchange")
                }
            }
        }
        match completion {
            Completion::Applied => {
                info!(token = %outcome.token, elapsed_ms, "Hint request finished");
                writeln!(out, "{}", visualize_session(&self.game.hints))?;
            }
            Completion::Discarded => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use codenames::{Hint, HintError, HintRequest, HintResult};
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(
            "word 3  ice cream ".parse::<Command>(),
            Ok(Command::Word {
                index: 3,
                text: String::from("ice cream")
            })
        );
        assert_eq!(
            "word 24".parse::<Command>(),
            Ok(Command::Word {
                index: 24,
                text: String::new()
            })
        );
        assert_eq!(
            "ROLE 0 assassin".parse::<Command>(),
            Ok(Command::Role {
                index: 0,
                role: Role::Assassin
            })
        );
        assert_eq!("team red".parse::<Command>(), Ok(Command::Team(Team::Red)));
        assert_eq!("randomize words".parse::<Command>(), Ok(Command::RandomizeWords));
        assert_eq!("randomize setup".parse::<Command>(), Ok(Command::RandomizeSetup));
        assert_eq!("  quit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_bad_commands() {
        assert_eq!("".parse::<Command>(), Err(CommandParseError::Empty));
        assert_eq!(
            "word 25 x".parse::<Command>(),
            Err(CommandParseError::InvalidIndex(String::from("25")))
        );
        assert_eq!(
            "word".parse::<Command>(),
            Err(CommandParseError::MissingArgument("index"))
        );
        assert_eq!(
            "role 1 purple".parse::<Command>(),
            Err(CommandParseError::InvalidRole(String::from("purple")))
        );
        assert_eq!(
            "team neutral".parse::<Command>(),
            Err(CommandParseError::InvalidRole(String::from("neutral")))
        );
        assert!(matches!(
            "dance".parse::<Command>(),
            Err(CommandParseError::UnknownCommand(_))
        ));
    }

    struct EchoService;

    impl HintService for EchoService {
        fn generate_hints(&self, req: &HintRequest) -> Result<HintResult, HintError> {
            if req.my_words.is_empty() {
                return Err(HintError::Status {
                    code: 400,
                    message: Some(String::from("No words provided")),
                });
            }
            let mut result = HintResult::new();
            result.insert(
                2,
                vec![Hint {
                    hint: format!("{}-clue", req.my_words[0]),
                    score: 0.456,
                    words: req.my_words.iter().take(2).cloned().collect(),
                }],
            );
            Ok(result)
        }
    }

    fn shell() -> Shell<EchoService> {
        Shell::new(
            WordPool::embedded(),
            StdRng::seed_from_u64(9),
            EchoService,
            None,
        )
    }

    #[test]
    fn script_with_manual_board() {
        let mut shell = shell();
        let script = "word 0 apple\nrole 0 blue\nword 1 tree\nrole 1 blue\n\
                      team blue\nhint\nwait\nquit\nshow\n";
        let mut out = Vec::new();
        shell.run(script.as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("apple-clue (Score: 0.46)"));
        assert!(out.contains("Words: apple, tree"));
        assert_eq!(shell.game.hints.state(), HintState::Success);
        // Nothing after quit runs
        assert!(!out.contains("No hints requested yet."));
    }

    #[test]
    fn failed_request_keeps_session_alive() {
        let mut shell = shell();
        let mut out = Vec::new();
        shell
            .run("hint\nwait\nshow\n".as_bytes(), &mut out)
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Failed to generate hints. Please try again."));
        assert_eq!(shell.game.hints.state(), HintState::Failure);
    }

    #[test]
    fn randomized_game_and_clear() {
        let mut shell = shell();
        let mut out = Vec::new();
        shell
            .run("randomize words\nrandomize setup\nhint\nwait\n".as_bytes(), &mut out)
            .unwrap();
        let team = shell.game.hint_team;
        assert_eq!(shell.game.board.check_setup(), Ok(team));
        assert!(shell.game.hints.result().is_some());

        shell.execute(Command::Clear, &mut out).unwrap();
        assert!(shell.game.hints.result().is_none());
        assert!(shell.game.board.cells().iter().all(|c| c.word.is_empty()));
    }

    #[test]
    fn recording_failure_does_not_end_the_session() {
        let dir = std::env::temp_dir().join(format!("hint_client_shell_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let recorder = Recorder::new(dir.clone()).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        let mut shell = Shell::new(
            WordPool::embedded(),
            StdRng::seed_from_u64(9),
            EchoService,
            Some(recorder),
        );
        let mut out = Vec::new();
        shell
            .run(
                "word 0 apple\nrole 0 blue\nhint\nwait\nword 1 tree\nshow\n".as_bytes(),
                &mut out,
            )
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(shell.game.hints.state(), HintState::Success);
        assert!(out.contains("apple-clue (Score: 0.46)"));
        // Commands after the failed recording still run
        assert_eq!(shell.game.board.cell(1).unwrap().word, "tree");
    }

    #[test]
    fn parse_errors_are_reported_not_fatal() {
        let mut shell = shell();
        let mut out = Vec::new();
        shell
            .run("role 99 blue\nword 2 fish\n".as_bytes(), &mut out)
            .unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("'99' is not a cell index"));
        assert_eq!(shell.game.board.cell(2).unwrap().word, "fish");
    }
}
