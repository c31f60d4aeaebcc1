//! Colored terminal status output
//!
//! Writes here are DECORATIVE: if stdout/stderr is closed or redirected to a
//! broken pipe the run carries on without them, so write errors are ignored
//! with `let _ =`. Anything the run depends on goes through `Result` instead.

use std::io::Write;
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Status reporter handed to each step of the run.
pub struct Console {
    stdout: BufferWriter,
    stderr: BufferWriter,
}

impl Console {
    #[must_use]
    pub fn new(choice: ColorChoice) -> Self {
        Self {
            stdout: BufferWriter::stdout(choice),
            stderr: BufferWriter::stderr(choice),
        }
    }

    /// Plain progress line on stdout
    pub fn info(&self, message: &str) {
        let mut buffer = self.stdout.buffer();
        let _ = writeln!(&mut buffer, "{message}");
        let _ = self.stdout.print(&buffer);
    }

    /// Green check mark line on stdout
    pub fn success(&self, message: &str) {
        let mut buffer = self.stdout.buffer();
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
        let _ = write!(&mut buffer, "✓ ");
        let _ = buffer.reset();
        let _ = writeln!(&mut buffer, "{message}");
        let _ = self.stdout.print(&buffer);
    }

    pub fn warn(&self, message: &str) {
        let mut buffer = self.stderr.buffer();
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)));
        let _ = writeln!(&mut buffer, "⚠️  {message}");
        let _ = buffer.reset();
        let _ = self.stderr.print(&buffer);
    }

    /// Red failure line on stderr, with an optional indented detail.
    pub fn error(&self, message: &str, detail: Option<&str>) {
        let mut buffer = self.stderr.buffer();
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
        let _ = writeln!(&mut buffer, "❌ {message}");
        let _ = buffer.reset();
        if let Some(detail) = detail {
            let _ = writeln!(&mut buffer, "   {detail}");
        }
        let _ = self.stderr.print(&buffer);
    }

    /// Multi-line block on stdout (dry-run output)
    pub fn block(&self, title: &str, body: &str) {
        let mut buffer = self.stdout.buffer();
        let _ = buffer.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true));
        let _ = writeln!(&mut buffer, "{title}");
        let _ = buffer.reset();
        let _ = writeln!(&mut buffer, "{body}");
        let _ = self.stdout.print(&buffer);
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new(ColorChoice::Auto)
    }
}
