use crate::{
    command::parse_command,
    config::DEFAULT_EQUATION,
    engine::{self, CombineMode},
    error::CommandError,
    normalize::{normalize, StaticSource, SubstitutionSource},
    side::extract_side,
};
use eqn_compute::{CasBackend, Displayable, Equation, PlainRenderer, Renderer, SymbolicBackend};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// An append-only output of console lines.
pub trait Console: Send {
    fn echo(&mut self, line: &str);
}

/// Receives the rendered equation after every command.
pub trait RenderSink: Send {
    fn show(&mut self, displayable: &Displayable);
}

/// Everything a command reads or writes, guarded together.
struct State {
    equation: Equation,
    console: Box<dyn Console>,
    display: Box<dyn RenderSink>,
}

/// Owns the current equation and runs commands against it.
///
/// [`Session::submit`] may be called from any thread. Commands run one at a time: the equation is
/// read, replaced, echoed and rendered under a single lock, so two submissions never interleave
/// their effects.
pub struct Session {
    state: Mutex<State>,
    backend: Box<dyn SymbolicBackend>,
    substitutions: Box<dyn SubstitutionSource>,
    renderer: Box<dyn Renderer>,
    mode: CombineMode,
}

impl Session {
    /// Starts building a session that writes to the given console and render sink.
    pub fn builder(
        console: impl Console + 'static,
        display: impl RenderSink + 'static,
    ) -> SessionBuilder {
        SessionBuilder {
            console: Box::new(console),
            display: Box::new(display),
            equation: DEFAULT_EQUATION.to_string(),
            backend: Box::new(CasBackend),
            substitutions: Box::new(StaticSource::default()),
            renderer: Box::new(PlainRenderer::default()),
            mode: CombineMode::default(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // a panic in a sink leaves the equation itself consistent
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a copy of the current equation.
    pub fn equation(&self) -> Equation {
        self.lock().equation.clone()
    }

    pub fn combine_mode(&self) -> CombineMode {
        self.mode
    }

    /// Renders the current equation without running a command.
    pub fn refresh(&self) {
        let mut state = self.lock();
        self.render(&mut state);
    }

    /// Appends `> text` to the console.
    pub fn echo(&self, text: &str) {
        self.lock().console.echo(&format!("> {}", text));
    }

    /// Runs one command.
    ///
    /// If the command fails, its error is echoed and the equation is left as it was; a successful
    /// command echoes nothing. Either way, the current equation is rendered once.
    pub fn submit(&self, raw: &str) {
        let mut state = self.lock();
        self.run(&mut state, raw);
    }

    /// Echoes the raw input, then runs it as a command, with no other command in between.
    ///
    /// Input surfaces, such as the REPL and voice capture, use this instead of [`Session::submit`]
    /// so the console shows what was entered.
    pub fn submit_echoed(&self, raw: &str) {
        let mut state = self.lock();
        state.console.echo(&format!("> {}", raw));
        self.run(&mut state, raw);
    }

    fn run(&self, state: &mut State, raw: &str) {
        info!(command = raw, "command received");

        match self.transition(&state.equation, raw) {
            Ok(equation) => {
                info!(%equation, "transition committed");
                state.equation = equation;
            },
            Err(err) => {
                warn!(error = %err, "transition rejected");
                state.console.echo(&format!("> {}", err));
            },
        }

        self.render(state);
    }

    /// Computes the equation that results from running the command on `current`.
    fn transition(&self, current: &Equation, raw: &str) -> Result<Equation, CommandError> {
        let table = self.substitutions.load()?;
        let normalized = normalize(raw, &table);
        debug!(%normalized, "normalized command");

        let (text, side) = extract_side(&normalized);
        let operation = parse_command(text, side);
        debug!(verb = ?operation.verb, side = ?operation.side, argument = ?operation.argument, "parsed command");

        engine::apply(current, &operation, self.backend.as_ref(), self.mode)
    }

    fn render(&self, state: &mut State) {
        match self.renderer.render(&state.equation) {
            Ok(displayable) => state.display.show(&displayable),
            Err(err) => {
                let err = CommandError::from(err);
                warn!(error = %err, "render failed");
                state.console.echo(&format!("> {}", err));
            },
        }
    }
}

/// Configures a [`Session`]. Created by [`Session::builder`].
pub struct SessionBuilder {
    console: Box<dyn Console>,
    display: Box<dyn RenderSink>,
    equation: String,
    backend: Box<dyn SymbolicBackend>,
    substitutions: Box<dyn SubstitutionSource>,
    renderer: Box<dyn Renderer>,
    mode: CombineMode,
}

impl SessionBuilder {
    /// Sets the initial equation, in the same syntax accepted by `set`. Defaults to `x^2 = 4`.
    pub fn equation(mut self, equation: impl Into<String>) -> Self {
        self.equation = equation.into();
        self
    }

    pub fn backend(mut self, backend: impl SymbolicBackend + 'static) -> Self {
        self.backend = Box::new(backend);
        self
    }

    /// Sets the source of the substitution table. Defaults to an empty table.
    pub fn substitutions(mut self, substitutions: impl SubstitutionSource + 'static) -> Self {
        self.substitutions = Box::new(substitutions);
        self
    }

    pub fn renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn combine_mode(mut self, mode: CombineMode) -> Self {
        self.mode = mode;
        self
    }

    /// Builds the session, failing if the initial equation does not parse.
    pub fn build(self) -> Result<Session, eqn_error::Error> {
        let equation = self.backend.parse_equation(&self.equation)?;
        Ok(Session {
            state: Mutex::new(State {
                equation,
                console: self.console,
                display: self.display,
            }),
            backend: self.backend,
            substitutions: self.substitutions,
            renderer: self.renderer,
            mode: self.mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use eqn_compute::RenderError;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use super::*;

    #[derive(Clone, Default)]
    struct Lines(Arc<Mutex<Vec<String>>>);

    impl Lines {
        fn take(&self) -> Vec<String> {
            std::mem::take(&mut *self.0.lock().unwrap())
        }
    }

    impl Console for Lines {
        fn echo(&mut self, line: &str) {
            self.0.lock().unwrap().push(line.to_string());
        }
    }

    impl RenderSink for Lines {
        fn show(&mut self, displayable: &Displayable) {
            self.0.lock().unwrap().push(displayable.text.clone());
        }
    }

    struct FailingRenderer;

    impl Renderer for FailingRenderer {
        fn render(&self, equation: &Equation) -> Result<Displayable, RenderError> {
            Err(RenderError { equation: equation.to_string(), reason: "no display".to_string() })
        }
    }

    fn session(equation: &str) -> (Session, Lines, Lines) {
        let console = Lines::default();
        let display = Lines::default();
        let session = Session::builder(console.clone(), display.clone())
            .equation(equation)
            .build()
            .unwrap();
        (session, console, display)
    }

    #[test]
    fn default_equation() {
        let session = Session::builder(Lines::default(), Lines::default()).build().unwrap();
        assert_eq!(session.equation().to_string(), "x^2 = 4");
    }

    #[test]
    fn invalid_initial_equation() {
        let result = Session::builder(Lines::default(), Lines::default())
            .equation("x +")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn success_echoes_nothing() {
        let (session, console, display) = session("2x = 4");
        session.submit("divide by 2");
        assert!(console.take().is_empty());
        assert_eq!(display.take(), vec!["2x/2 = 4/2"]);
    }

    #[test]
    fn failure_echoes_error_and_renders_unchanged() {
        let (session, console, display) = session("2x = 4");
        session.submit("divide by");
        assert_eq!(console.take(), vec!["> Invalid factor!"]);
        assert_eq!(display.take(), vec!["2x = 4"]);
        assert_eq!(session.equation().to_string(), "2x = 4");
    }

    #[test]
    fn substitutions_apply_before_parsing() {
        let console = Lines::default();
        let session = Session::builder(console.clone(), Lines::default())
            .equation("2x = 4")
            .substitutions([("two", "2"), ("by", "by")].into_iter().collect::<StaticSource>())
            .build()
            .unwrap();
        session.submit("divide by two on right");
        assert_eq!(session.equation().to_string(), "2x = 4/2");
        assert!(console.take().is_empty());
    }

    #[test]
    fn render_failure_is_reported() {
        let console = Lines::default();
        let display = Lines::default();
        let session = Session::builder(console.clone(), display.clone())
            .renderer(FailingRenderer)
            .build()
            .unwrap();
        session.submit("simplify");
        assert_eq!(console.take(), vec![
            "> Could not render equation: could not render `x^2 = 4`: no display",
        ]);
        assert!(display.take().is_empty());
    }

    #[test]
    fn submit_echoed_writes_input_before_error() {
        let (session, console, display) = session("2x = 4");
        session.submit_echoed("bogus");
        session.submit_echoed("divide by 2");
        assert_eq!(console.take(), vec!["> bogus", "> Unrecognized command!", "> divide by 2"]);
        assert_eq!(display.take(), vec!["2x = 4", "2x/2 = 4/2"]);
    }

    #[test]
    fn echo_writes_one_line() {
        let (session, console, display) = session("x = 1");
        session.echo("hello");
        assert_eq!(console.take(), vec!["> hello"]);
        assert!(display.take().is_empty());
    }

    #[test]
    fn refresh_renders_current() {
        let (session, console, display) = session("x = 1");
        session.refresh();
        assert!(console.take().is_empty());
        assert_eq!(display.take(), vec!["x = 1"]);
    }
}
