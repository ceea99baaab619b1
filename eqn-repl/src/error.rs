use eqn_session::{config::SettingsError, voice::VoiceError};
use rustyline::error::ReadlineError;
use std::io;
use thiserror::Error;

/// Errors that end the REPL.
#[derive(Debug, Error)]
pub enum ReplError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("invalid log filter `{filter}`: {reason}")]
    Logger {
        filter: String,
        reason: String,
    },

    /// The initial equation does not parse. The report has already been printed.
    #[error("invalid initial equation `{0}`")]
    Equation(String),

    #[error(transparent)]
    Readline(#[from] ReadlineError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failure of a `:say` command. Reported, but does not end the REPL.
#[derive(Debug, Error)]
#[error("voice session failed: {0}")]
pub struct SayError(#[from] pub VoiceError);
