use eqn_compute::Displayable;
use eqn_session::{Console, RenderSink};

/// Prints console lines to stdout.
#[derive(Debug, Default)]
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn echo(&mut self, line: &str) {
        println!("{}", line);
    }
}

/// Prints the rendered equation, optionally with its LaTeX form.
#[derive(Debug, Default)]
pub struct StdoutDisplay {
    pub latex: bool,
}

impl RenderSink for StdoutDisplay {
    fn show(&mut self, displayable: &Displayable) {
        println!("    {}", displayable.text);
        if self.latex {
            println!("    ${}$", displayable.latex);
        }
    }
}
