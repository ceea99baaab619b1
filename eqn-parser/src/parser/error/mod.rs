//! Errors produced while parsing expressions and equations.
//!
//! Parse errors are plain [`eqn_error::Error`] values: a list of spans into the parsed source and
//! one of the kinds in [`kind`], which knows how to render itself as an `ariadne` report.

pub mod kind;

pub use eqn_error::Error;
