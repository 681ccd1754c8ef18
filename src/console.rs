// User-facing stdout lines. Diagnostics go through tracing instead.

use std::io::Write;

use tracing::debug;

pub struct Console<W: Write> {
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn info(&mut self, line: &str) {
        debug!("{}", line);
        self.emit(line);
    }

    pub fn warning(&mut self, line: &str) {
        debug!("{}", line);
        self.emit(&format!("WARNING: {}", line));
    }

    pub fn error(&mut self, line: &str) {
        debug!("{}", line);
        self.emit(&format!("ERROR: {}", line));
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    // A closed stdout is no reason to abandon the window
    fn emit(&mut self, line: &str) {
        if let Err(e) = writeln!(self.out, "{}", line).and_then(|_| self.out.flush()) {
            debug!("Failed to write console line: {}", e);
        }
    }
}
