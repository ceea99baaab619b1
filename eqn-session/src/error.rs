use eqn_compute::RenderError;
use std::{io, path::PathBuf};
use thiserror::Error;

/// The substitution table could not be loaded.
#[derive(Debug, Error)]
pub enum SubstitutionError {
    #[error("cannot read `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: io::Error,
    },

    #[error("`{}` is not valid JSON: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("`{}` must contain a JSON object", .path.display())]
    NotAnObject {
        path: PathBuf,
    },

    #[error("the replacement for `{key}` must be a string")]
    NonStringValue {
        key: String,
    },
}

/// A command failed. The [`Display`](std::fmt::Display) text is the line shown on the console.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Could not load conversions: {0}")]
    ConfigLoad(#[from] SubstitutionError),

    #[error("{message}")]
    ExpressionParse {
        message: &'static str,
        source: eqn_error::Error,
    },

    #[error("Unrecognized command!")]
    UnrecognizedCommand,

    #[error("Could not render equation: {0}")]
    Render(#[from] RenderError),
}

impl CommandError {
    /// The argument of a `set` command is not an equation.
    pub fn invalid_expression(source: eqn_error::Error) -> Self {
        Self::ExpressionParse { message: "Invalid expression!", source }
    }

    /// The factor of a combining command is not an expression.
    pub fn invalid_factor(source: eqn_error::Error) -> Self {
        Self::ExpressionParse { message: "Invalid factor!", source }
    }
}
