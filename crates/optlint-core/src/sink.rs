//! # Diagnostic Sinks
//!
//! Validators push every [`Diagnostic`] into a [`DiagnosticSink`]. The CLI
//! writes them to stderr through a [`WriterSink`]; tests and embedding
//! callers keep them in a [`CollectingSink`].
//!
//! Sinks keep a [`Tally`] so that the caller, not the validator, decides
//! what counts as failure.

use std::io::{self, Write};

use crate::diagnostic::{Diagnostic, DiagnosticCode, Severity};

/// Receiver of diagnostics, in emission order.
pub trait DiagnosticSink {
    /// Accept one diagnostic.
    fn emit(&mut self, diagnostic: Diagnostic);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn emit(&mut self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic);
    }
}

/// Running count of emitted diagnostics by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Number of errors.
    pub errors: usize,
    /// Number of warnings.
    pub warnings: usize,
}

impl Tally {
    /// Count one diagnostic.
    pub fn record(&mut self, diagnostic: &Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
        }
    }

    /// Returns true if at least one error was recorded.
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Total diagnostics recorded.
    pub fn total(&self) -> usize {
        self.errors + self.warnings
    }

    /// Sum of two tallies.
    pub fn merge(self, other: Tally) -> Tally {
        Tally {
            errors: self.errors + other.errors,
            warnings: self.warnings + other.warnings,
        }
    }
}

/// Writes one line per diagnostic to an [`io::Write`].
///
/// A write failure does not abort validation. The first failure is kept
/// and surfaced by [`WriterSink::finish`]; later lines are dropped.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
    tally: Tally,
    failure: Option<io::Error>,
}

impl<W: Write> WriterSink<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            tally: Tally::default(),
            failure: None,
        }
    }

    /// Counts so far.
    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Flush and return the final tally, or the first write error.
    pub fn finish(mut self) -> io::Result<Tally> {
        if let Some(e) = self.failure.take() {
            return Err(e);
        }
        self.writer.flush()?;
        Ok(self.tally)
    }
}

impl WriterSink<io::Stderr> {
    /// Sink writing to the process's standard error.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> DiagnosticSink for WriterSink<W> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        tracing::trace!(code = ?diagnostic.code, "{diagnostic}");
        self.tally.record(&diagnostic);
        if self.failure.is_some() {
            return;
        }
        if let Err(e) = writeln!(self.writer, "{diagnostic}") {
            tracing::warn!(error = %e, "failed to write diagnostic");
            self.failure = Some(e);
        }
    }
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All diagnostics, in emission order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Returns true if nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Diagnostics of the given severity.
    pub fn with_severity(&self, severity: Severity) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .collect()
    }

    /// Diagnostics carrying the given code.
    pub fn with_code(&self, code: DiagnosticCode) -> Vec<&Diagnostic> {
        self.diagnostics.iter().filter(|d| d.code == code).collect()
    }

    /// Rendered lines, as a [`WriterSink`] would print them.
    pub fn lines(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }

    /// Counts by severity.
    pub fn tally(&self) -> Tally {
        let mut tally = Tally::default();
        for d in &self.diagnostics {
            tally.record(d);
        }
        tally
    }
}

impl DiagnosticSink for CollectingSink {
    fn emit(&mut self, diagnostic: Diagnostic) {
        tracing::trace!(code = ?diagnostic.code, "{diagnostic}");
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::SymbolPath;

    fn sample(severity: Severity) -> Diagnostic {
        Diagnostic::new(
            severity,
            DiagnosticCode::EmptyValue,
            SymbolPath::key("extensions"),
            "is empty",
        )
    }

    #[test]
    fn writer_sink_writes_lines_and_counts() {
        let mut buf = Vec::new();
        let mut sink = WriterSink::new(&mut buf);
        sink.emit(sample(Severity::Warning));
        sink.emit(sample(Severity::Error));
        let tally = sink.finish().unwrap();
        assert_eq!(tally, Tally { errors: 1, warnings: 1 });

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "[WARNING] -> 'extensions' is empty\n[ERROR] -> 'extensions' is empty\n"
        );
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn writer_sink_keeps_counting_after_failure() {
        let mut sink = WriterSink::new(BrokenWriter);
        sink.emit(sample(Severity::Error));
        sink.emit(sample(Severity::Error));
        assert_eq!(sink.tally().errors, 2);
        let err = sink.finish().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn collecting_sink_filters() {
        let mut sink = CollectingSink::new();
        sink.emit(sample(Severity::Warning));
        sink.emit(sample(Severity::Error));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.with_severity(Severity::Error).len(), 1);
        assert_eq!(sink.with_code(DiagnosticCode::EmptyValue).len(), 2);
        assert_eq!(sink.tally().total(), 2);
        assert!(sink.tally().has_errors());
    }

    #[test]
    fn forwarding_through_mut_ref() {
        let mut inner = CollectingSink::new();
        {
            let mut forward: &mut CollectingSink = &mut inner;
            forward.emit(sample(Severity::Warning));
        }
        assert_eq!(inner.len(), 1);
    }

    #[test]
    fn tally_merge() {
        let a = Tally { errors: 1, warnings: 2 };
        let b = Tally { errors: 3, warnings: 0 };
        assert_eq!(a.merge(b), Tally { errors: 4, warnings: 2 });
    }
}
