//! Conversion of an equation into the forms shown to the user.

use crate::equation::Equation;
use eqn_parser::parser::fmt::Latex;
use thiserror::Error;

/// The renderable forms of an equation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Displayable {
    /// Plain text, readable back by the parser.
    pub text: String,

    /// LaTeX math markup, without surrounding `$` delimiters.
    pub latex: String,
}

/// An equation could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("could not render `{equation}`: {reason}")]
pub struct RenderError {
    /// The plain text of the equation that failed to render.
    pub equation: String,

    /// Why rendering failed.
    pub reason: String,
}

/// Produces a [`Displayable`] from an equation.
pub trait Renderer: Send + Sync {
    fn render(&self, equation: &Equation) -> Result<Displayable, RenderError>;
}

/// Renders equations as plain text and LaTeX markup.
///
/// Front ends with limited room can set a maximum length; longer renderings are rejected so that
/// the previous output stays on screen.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainRenderer {
    /// The maximum length, in characters, of either rendered form.
    pub max_len: Option<usize>,
}

impl PlainRenderer {
    pub fn with_max_len(max_len: usize) -> Self {
        Self { max_len: Some(max_len) }
    }
}

impl Renderer for PlainRenderer {
    fn render(&self, equation: &Equation) -> Result<Displayable, RenderError> {
        let text = equation.to_string();
        let latex = equation.as_display().to_string();

        if let Some(max_len) = self.max_len {
            let len = text.chars().count().max(latex.chars().count());
            if len > max_len {
                return Err(RenderError {
                    equation: text,
                    reason: format!("rendering is {} characters long, the limit is {}", len, max_len),
                });
            }
        }

        Ok(Displayable { text, latex })
    }
}
