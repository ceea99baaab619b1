//! The command engine of a voice or text driven algebra assistant.
//!
//! A user issues short imperative commands, such as `set x^2=4;`, `divide by 2 on left` or
//! `simplify`, each of which transforms a single displayed equation. Every command, whether typed
//! or spoken, goes through [`Session::submit`], which runs the same pipeline:
//!
//! 1. [`normalize()`]: spoken-word tokens are rewritten using the substitution table
//!    (`"two"` → `"2"`).
//! 2. [`side::extract_side`]: a trailing `on left` / `left` / `on right` / `right` is stripped.
//! 3. [`command::parse_command`]: the verb is matched and its argument cut out.
//! 4. [`engine::apply`]: the new equation is computed, or the command fails and the equation is
//!    kept.
//!
//! ```
//! use eqn_compute::Displayable;
//! use eqn_session::{Console, RenderSink, Session};
//!
//! struct Stdout;
//!
//! impl Console for Stdout {
//!     fn echo(&mut self, line: &str) {
//!         println!("{}", line);
//!     }
//! }
//!
//! impl RenderSink for Stdout {
//!     fn show(&mut self, displayable: &Displayable) {
//!         println!("{}", displayable.text);
//!     }
//! }
//!
//! let session = Session::builder(Stdout, Stdout).equation("2x = 4").build().unwrap();
//! session.submit("divide by 2");
//! session.submit("simplify");
//! assert_eq!(session.equation().to_string(), "x = 2");
//! ```

pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod session;
pub mod side;
pub mod voice;

pub use command::{Operation, Verb};
pub use config::{Settings, VoiceSettings};
pub use engine::CombineMode;
pub use error::CommandError;
pub use normalize::{normalize, JsonFileSource, StaticSource, SubstitutionSource};
pub use session::{Console, RenderSink, Session, SessionBuilder};
pub use side::Side;
pub use voice::VoiceSession;

/// The commands understood by the assistant, as shown to the user.
pub const HELP: &[&str] = &[
    "Set(expression)",
    "Simplify",
    "Divide by #",
    "Multiply by #",
    "Add #",
    "Subtract #",
];
