use eqn_compute::Displayable;
use eqn_session::{Console, RenderSink, Session, SessionBuilder};
use std::sync::{Arc, Mutex};

/// Records console lines and rendered equations.
#[derive(Clone, Default)]
pub struct Recorder {
    lines: Arc<Mutex<Vec<String>>>,
    renders: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn renders(&self) -> Vec<String> {
        self.renders.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.lines.lock().unwrap().clear();
        self.renders.lock().unwrap().clear();
    }

    /// Starts a session that reports to this recorder.
    pub fn builder(&self) -> SessionBuilder {
        Session::builder(
            ConsoleHalf(Arc::clone(&self.lines)),
            DisplayHalf(Arc::clone(&self.renders)),
        )
    }
}

struct ConsoleHalf(Arc<Mutex<Vec<String>>>);

impl Console for ConsoleHalf {
    fn echo(&mut self, line: &str) {
        self.0.lock().unwrap().push(line.to_string());
    }
}

struct DisplayHalf(Arc<Mutex<Vec<String>>>);

impl RenderSink for DisplayHalf {
    fn show(&mut self, displayable: &Displayable) {
        self.0.lock().unwrap().push(displayable.text.clone());
    }
}
