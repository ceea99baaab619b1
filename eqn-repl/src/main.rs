mod error;
mod logger;
mod sinks;

use clap::Parser;
use eqn_session::{
    config::VoiceSettings,
    voice::loopback::{LoopbackInput, LoopbackRecognizer},
    CombineMode,
    JsonFileSource,
    Session,
    Settings,
    VoiceSession,
    HELP,
};
use error::{ReplError, SayError};
use rustyline::{error::ReadlineError, DefaultEditor};
use sinks::{StdoutConsole, StdoutDisplay};
use std::{io::{self, BufRead, IsTerminal}, path::PathBuf, process::ExitCode, sync::Arc};
use tracing::{info, warn};

/// Manipulate an equation with short commands, such as `set x^2=4;`, `divide by 2 on left` or
/// `simplify`.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Settings file. Defaults to `eqn.toml` in the working directory, if it exists.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON table of spoken-word substitutions, read before every command.
    #[arg(long)]
    conversions: Option<PathBuf>,

    /// The equation to start with.
    #[arg(long)]
    equation: Option<String>,

    /// Combinator used by `multiply`, `add` and `subtract`: `named` or `division`.
    #[arg(long)]
    combine_mode: Option<CombineMode>,

    /// Log filter, such as `info` or `eqn_session=debug`. `RUST_LOG` takes precedence.
    #[arg(long)]
    log_level: Option<String>,

    /// Also print the LaTeX form of the equation.
    #[arg(long)]
    latex: bool,
}

impl Args {
    /// Loads the settings file and applies the command-line overrides.
    fn settings(&self) -> Result<Settings, ReplError> {
        let mut settings = Settings::discover(self.config.as_deref())?;
        if let Some(conversions) = &self.conversions {
            settings.conversions = conversions.clone();
        }
        if let Some(equation) = &self.equation {
            settings.default_equation = equation.clone();
        }
        if let Some(mode) = self.combine_mode {
            settings.combine_mode = mode;
        }
        if let Some(level) = &self.log_level {
            settings.log_level = level.clone();
        }
        Ok(settings)
    }
}

/// A line of input, either a REPL command (prefixed with `:`) or an assistant command.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Empty,
    Help,
    Quit,

    /// Send the words through the voice path.
    Say(&'a str),
    Command(&'a str),
    Unknown(&'a str),
}

impl<'a> Line<'a> {
    fn classify(input: &'a str) -> Self {
        let trimmed = input.trim();
        let Some(meta) = trimmed.strip_prefix(':') else {
            return if trimmed.is_empty() { Self::Empty } else { Self::Command(input) };
        };

        match meta.split_once(' ') {
            Some(("say", words)) => Self::Say(words.trim()),
            _ => match meta {
                "help" => Self::Help,
                "quit" | "q" => Self::Quit,
                "say" => Self::Say(""),
                _ => Self::Unknown(meta),
            },
        }
    }
}

fn print_help() {
    println!("Commands:");
    for command in HELP {
        println!("  * {}", command);
    }
    println!("Append `on left` or `on right` to apply a command to one side only.");
    println!("REPL commands: `:say <words>` (voice path), `:help`, `:quit`.");
}

/// Runs the words through a loopback voice session, as if they had been spoken.
fn say(session: &Arc<Session>, words: &str, voice: &VoiceSettings) -> Result<String, SayError> {
    let listening = VoiceSession::start(
        Arc::clone(session),
        Box::new(LoopbackInput::saying(words)),
        Arc::new(LoopbackRecognizer),
        voice.clone(),
    )?;
    Ok(listening.stop()?)
}

/// Handles one line of input. Returns false if the REPL should exit.
fn handle_line(input: &str, session: &Arc<Session>, settings: &Settings) -> bool {
    match Line::classify(input) {
        Line::Empty => (),
        Line::Help => print_help(),
        Line::Quit => return false,
        Line::Say(words) => {
            if let Err(err) = say(session, words, &settings.voice) {
                warn!(error = %err, "voice session failed");
                eprintln!("{}", err);
            }
        },
        Line::Command(command) => session.submit_echoed(command),
        Line::Unknown(meta) => eprintln!("unknown REPL command `:{}`, try `:help`", meta),
    }
    true
}

fn run(args: Args) -> Result<(), ReplError> {
    let settings = args.settings()?;
    logger::init(&settings.log_level)?;
    info!(?settings, "settings loaded");

    let built = Session::builder(StdoutConsole, StdoutDisplay { latex: args.latex })
        .equation(settings.default_equation.clone())
        .substitutions(JsonFileSource::new(&settings.conversions))
        .combine_mode(settings.combine_mode)
        .build();
    let session = match built {
        Ok(session) => Arc::new(session),
        Err(err) => {
            err.report_to_stderr("equation", &settings.default_equation)?;
            return Err(ReplError::Equation(settings.default_equation));
        },
    };

    if !io::stdin().is_terminal() {
        // run commands from stdin, one per line
        for line in io::stdin().lock().lines() {
            if !handle_line(&line?, &session, &settings) {
                break;
            }
        }
        return Ok(());
    }

    println!("Type `:help` for the list of commands.");
    session.refresh();

    let mut rl = DefaultEditor::new()?;
    loop {
        let input = match rl.readline("> ") {
            Ok(input) => input,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => return Ok(()),
            Err(err) => return Err(err.into()),
        };
        if !input.trim().is_empty() {
            rl.add_history_entry(&input)?;
        }
        if !handle_line(&input, &session, &settings) {
            return Ok(());
        }
    }
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn classify_commands() {
        assert_eq!(Line::classify("divide by 2"), Line::Command("divide by 2"));
        assert_eq!(Line::classify("set x = 1;"), Line::Command("set x = 1;"));
        assert_eq!(Line::classify("   "), Line::Empty);
    }

    #[test]
    fn classify_repl_commands() {
        assert_eq!(Line::classify(":help"), Line::Help);
        assert_eq!(Line::classify(":q"), Line::Quit);
        assert_eq!(Line::classify(":say divide by two "), Line::Say("divide by two"));
        assert_eq!(Line::classify(":say"), Line::Say(""));
        assert_eq!(Line::classify(":undo"), Line::Unknown("undo"));
    }

    #[derive(Clone, Default)]
    struct Lines(Arc<std::sync::Mutex<Vec<String>>>);

    impl eqn_session::Console for Lines {
        fn echo(&mut self, line: &str) {
            self.0.lock().unwrap().push(line.to_string());
        }
    }

    impl eqn_session::RenderSink for Lines {
        fn show(&mut self, _: &eqn_compute::Displayable) {}
    }

    #[test]
    fn command_lines_are_echoed() {
        let lines = Lines::default();
        let session = Arc::new(Session::builder(lines.clone(), Lines::default())
            .equation("2x = 4")
            .build()
            .unwrap());
        let settings = Settings::default();

        assert!(handle_line("divide by 2", &session, &settings));
        assert!(handle_line("bogus", &session, &settings));
        assert!(!handle_line(":q", &session, &settings));
        assert_eq!(*lines.0.lock().unwrap(), vec![
            "> divide by 2",
            "> bogus",
            "> Unrecognized command!",
        ]);
    }

    #[test]
    fn cli_overrides_settings() {
        let args = Args::parse_from([
            "eqn-repl",
            "--config", "does/not/exist.toml",
        ]);
        assert!(args.settings().is_err());

        let args = Args::parse_from([
            "eqn-repl",
            "--equation", "2x = 4",
            "--combine-mode", "division",
            "--conversions", "words.json",
        ]);
        assert_eq!(args.combine_mode, Some(CombineMode::Division));
        assert_eq!(args.equation.as_deref(), Some("2x = 4"));
        assert_eq!(args.conversions, Some(PathBuf::from("words.json")));
    }
}
