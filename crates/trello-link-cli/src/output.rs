//! Workflow command output
//!
//! GitHub reads `::notice::` and `::error::` lines from stdout and turns them
//! into run annotations.

use std::io::{self, Write};

/// Escape a message for a workflow command
pub fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Format a notice annotation
pub fn notice_line(message: &str) -> String {
    format!("::notice::{}", escape_data(message))
}

/// Format an error annotation
pub fn error_line(message: &str) -> String {
    format!("::error::{}", escape_data(message))
}

/// Writes annotations to a sink and remembers whether any error was reported
pub struct Annotations<W: Write> {
    out: W,
    failed: bool,
}

impl Annotations<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Annotations<W> {
    pub fn new(out: W) -> Self {
        Self { out, failed: false }
    }

    /// Emit a notice annotation
    pub fn notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", notice_line(message))
    }

    /// Emit an error annotation and mark the run as failed
    pub fn error(&mut self, message: &str) -> io::Result<()> {
        self.failed = true;
        writeln!(self.out, "{}", error_line(message))
    }

    /// Whether an error annotation was emitted
    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_data() {
        assert_eq!(escape_data("100% done\nnext"), "100%25 done%0Anext");
        assert_eq!(escape_data("a\r\nb"), "a%0D%0Ab");
    }

    #[test]
    fn test_annotations() {
        let mut annotations = Annotations::new(Vec::new());
        annotations.notice("Using title regex: \\[(.*)\\]").unwrap();
        assert!(!annotations.failed());
        annotations.error("boom").unwrap();
        assert!(annotations.failed());

        let text = String::from_utf8(annotations.into_inner()).unwrap();
        assert_eq!(text, "::notice::Using title regex: \\[(.*)\\]\n::error::boom\n");
    }
}
